//! Climatology grid to spatial raster preparation.
//!
//! This crate turns a climatology grid (a per-cell statistic indexed by
//! variable/member/lat/lon) into the container a plotting backend needs:
//! explicit raster geometry plus one flattened, named column per panel.
//!
//! # Architecture
//!
//! ```text
//! Grid (climatology)
//!      │
//!      ▼
//! classify()        is it a multigrid? does it carry members?
//!      │
//!      ▼
//! normalize()       ensemble mean per variable, variable → member,
//!      │            singleton time, axes [member, time, lat, lon]
//!      ▼
//! assemble()        per panel: slice → flatten (lat outer, lon inner)
//!      │            → rows reordered north-to-south, west-to-east
//!      ▼
//! panel_names() + build_geometry()
//!      │
//!      ▼
//! SpatialRaster ──► RasterRenderer::render(raster, style)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use clim_raster::{RasterConfig, RasterPipeline};
//!
//! let pipeline = RasterPipeline::new(RasterConfig::from_env())?;
//! let prepared = pipeline.prepare_plot(&climatology, "coastline", StyleOptions::default())?;
//!
//! for (name, column) in prepared.raster.columns() {
//!     // ...
//! }
//! ```

pub mod aggregate;
pub mod assemble;
pub mod backdrop;
pub mod classify;
pub mod config;
pub mod geometry;
pub mod labels;
pub mod normalize;
pub mod pipeline;
pub mod raster;
pub mod render;

// Re-export commonly used types at crate root
pub use aggregate::{AggregateOp, GridAggregator, ReduceAggregator};
pub use assemble::{assemble, cell_index, coordinate_pairs, flatten_slice, scan_order, unflatten, Assembled};
pub use backdrop::{BackdropProvider, StaticBackdrops};
pub use classify::{classify, Classification};
pub use config::RasterConfig;
pub use geometry::{build_geometry, RasterGeometry};
pub use labels::{make_unique, panel_names, variable_label};
pub use normalize::{normalize, Normalized, Notice, PANEL_LAYOUT};
pub use pipeline::{Prepared, PreparedPlot, RasterPipeline};
pub use raster::SpatialRaster;
pub use render::RasterRenderer;

pub use clim_common::{ClimError, ClimResult};
