//! Input shape classification.

use clim_common::{ClimError, ClimResult, Dimension, Grid, GridAccessor};

/// What kind of grid the pipeline was handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// The grid carries a `variable` axis.
    pub is_multigrid: bool,
    /// The grid carries a `member` axis.
    pub has_members: bool,
    /// Length of the member axis, 1 when absent.
    pub member_count: usize,
}

/// Classify a climatology grid.
///
/// Fails with [`ClimError::NotAClimatology`] when the grid has no
/// climatology marker.
pub fn classify(grid: &Grid, accessor: &impl GridAccessor) -> ClimResult<Classification> {
    if grid.climatology().is_none() {
        return Err(ClimError::NotAClimatology);
    }

    let labels = accessor.dimension_labels(grid);
    let class = Classification {
        is_multigrid: labels.contains(&Dimension::Variable),
        has_members: labels.contains(&Dimension::Member),
        member_count: accessor.axis_length(grid, Dimension::Member).unwrap_or(1),
    };

    tracing::debug!(
        multigrid = class.is_multigrid,
        members = class.member_count,
        "classified grid"
    );

    Ok(class)
}
