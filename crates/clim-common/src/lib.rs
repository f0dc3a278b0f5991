//! Common types and utilities shared across the climatology raster crates.

pub mod error;
pub mod grid;
pub mod ramp;
pub mod style;

pub use error::{ClimError, ClimResult};
pub use grid::{
    ClimatologyMarker, Coordinates, Dimension, Grid, GridAccessor, HeaderAccessor,
    VariableMetadata,
};
pub use ramp::{Color, ColorRamp};
pub use style::{BackdropTheme, OverlayLayer, StyleOptions};
