//! Render collaborator seam.

use crate::raster::SpatialRaster;
use clim_common::{ClimResult, StyleOptions};

/// A plotting backend. Receives the finished raster and resolved style
/// options and returns whatever handle it uses for a plot.
pub trait RasterRenderer {
    type Plot;

    fn render(&self, raster: &SpatialRaster, style: &StyleOptions) -> ClimResult<Self::Plot>;
}
