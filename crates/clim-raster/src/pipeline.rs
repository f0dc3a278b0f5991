//! End-to-end pipeline: classify, normalize, assemble, label, hand off.
//!
//! Every stage either succeeds or aborts the whole call; no partial raster
//! is ever returned.

use crate::aggregate::{GridAggregator, ReduceAggregator};
use crate::assemble::assemble;
use crate::backdrop::{BackdropProvider, StaticBackdrops};
use crate::classify::{classify, Classification};
use crate::config::RasterConfig;
use crate::geometry::build_geometry;
use crate::labels::panel_names;
use crate::normalize::{normalize, Notice};
use crate::raster::SpatialRaster;
use crate::render::RasterRenderer;
use clim_common::{BackdropTheme, ClimResult, Grid, GridAccessor, HeaderAccessor, StyleOptions};

/// A raster ready for rendering.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub raster: SpatialRaster,
    pub classification: Classification,
    pub notices: Vec<Notice>,
}

/// A raster plus the style options to render it with.
#[derive(Debug, Clone)]
pub struct PreparedPlot {
    pub raster: SpatialRaster,
    pub style: StyleOptions,
    pub notices: Vec<Notice>,
}

/// Raster preparation with its collaborators.
#[derive(Debug, Clone)]
pub struct RasterPipeline<G = ReduceAggregator, B = StaticBackdrops, A = HeaderAccessor> {
    config: RasterConfig,
    aggregator: G,
    backdrops: B,
    accessor: A,
}

impl RasterPipeline {
    /// Create a pipeline with the in-memory aggregator, the field accessor
    /// and no backdrop assets registered.
    pub fn new(config: RasterConfig) -> ClimResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            aggregator: ReduceAggregator,
            backdrops: StaticBackdrops::new(),
            accessor: HeaderAccessor,
        })
    }
}

impl<G: GridAggregator, B: BackdropProvider, A: GridAccessor> RasterPipeline<G, B, A> {
    pub fn with_aggregator<G2: GridAggregator>(self, aggregator: G2) -> RasterPipeline<G2, B, A> {
        RasterPipeline {
            config: self.config,
            aggregator,
            backdrops: self.backdrops,
            accessor: self.accessor,
        }
    }

    pub fn with_backdrops<B2: BackdropProvider>(self, backdrops: B2) -> RasterPipeline<G, B2, A> {
        RasterPipeline {
            config: self.config,
            aggregator: self.aggregator,
            backdrops,
            accessor: self.accessor,
        }
    }

    pub fn with_accessor<A2: GridAccessor>(self, accessor: A2) -> RasterPipeline<G, B, A2> {
        RasterPipeline {
            config: self.config,
            aggregator: self.aggregator,
            backdrops: self.backdrops,
            accessor,
        }
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Turn a climatology grid into a spatial raster.
    pub fn prepare(&self, grid: &Grid) -> ClimResult<Prepared> {
        let classification = classify(grid, &self.accessor)?;
        let normalized = normalize(
            grid,
            &classification,
            &self.accessor,
            &self.aggregator,
            &self.config,
        )?;
        let assembled = assemble(&normalized.grid, &self.accessor, &self.config)?;

        let geometry = build_geometry(self.accessor.coordinates(&normalized.grid))?;
        let names = panel_names(
            normalized.grid.variables(),
            normalized.is_multigrid,
            assembled.panel_count(),
        );
        let raster = SpatialRaster::new(geometry, names, &assembled.matrix, assembled.coordinates)?;

        tracing::debug!(
            panels = raster.panel_count(),
            cells = raster.cell_count(),
            "prepared spatial raster"
        );

        Ok(Prepared {
            raster,
            classification,
            notices: normalized.notices,
        })
    }

    /// Prepare the raster and the style options for `backdrop_theme`.
    ///
    /// The theme is checked before any array work, so an unknown theme fails
    /// without touching the grid.
    pub fn prepare_plot(
        &self,
        grid: &Grid,
        backdrop_theme: &str,
        mut style: StyleOptions,
    ) -> ClimResult<PreparedPlot> {
        let theme: BackdropTheme = backdrop_theme.parse()?;

        let prepared = self.prepare(grid)?;

        if let Some(layer) = self.backdrops.layer(theme)? {
            style.push_backdrop(layer);
        }
        style.color_ramp = Some(style.resolved_ramp());
        style.reverse_colors = false;

        Ok(PreparedPlot {
            raster: prepared.raster,
            style,
            notices: prepared.notices,
        })
    }

    /// Prepare and hand the raster to `renderer`.
    pub fn plot<R: RasterRenderer>(
        &self,
        renderer: &R,
        grid: &Grid,
        backdrop_theme: &str,
        style: StyleOptions,
    ) -> ClimResult<R::Plot> {
        let prepared = self.prepare_plot(grid, backdrop_theme, style)?;
        renderer.render(&prepared.raster, &prepared.style)
    }
}
