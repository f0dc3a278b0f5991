//! Dimension normalization.
//!
//! After this stage every grid has the same layout, [`PANEL_LAYOUT`]:
//! one panel axis (`member`), a singleton `time` axis and the two spatial
//! axes. Multigrids get their `variable` axis relabeled to `member`, after an
//! ensemble mean when they also carry members.

use crate::aggregate::{AggregateOp, GridAggregator};
use crate::classify::Classification;
use crate::config::RasterConfig;
use clim_common::{ClimError, ClimResult, Dimension, Grid, GridAccessor};
use std::fmt;

/// Axis order of a normalized grid.
pub const PANEL_LAYOUT: [Dimension; 4] = [
    Dimension::Member,
    Dimension::Time,
    Dimension::Lat,
    Dimension::Lon,
];

/// Informational, non-fatal conditions met while normalizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A multigrid carried several realizations; each variable panel shows
    /// their mean.
    EnsembleMeanPerVariable { members: usize },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::EnsembleMeanPerVariable { members } => write!(
                f,
                "multigrid has {} members: the ensemble mean is displayed for each variable",
                members
            ),
        }
    }
}

/// A grid in [`PANEL_LAYOUT`] plus what happened on the way there.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub grid: Grid,
    pub is_multigrid: bool,
    pub notices: Vec<Notice>,
}

/// Normalize a classified grid. The input grid is not modified.
pub fn normalize(
    grid: &Grid,
    class: &Classification,
    accessor: &impl GridAccessor,
    aggregator: &impl GridAggregator,
    config: &RasterConfig,
) -> ClimResult<Normalized> {
    let mut notices = Vec::new();

    let mut out = match (class.is_multigrid, class.has_members) {
        (true, true) => {
            let reduced = aggregator.aggregate(grid, Dimension::Member, AggregateOp::Mean, true)?;
            if class.member_count > 1 {
                let notice = Notice::EnsembleMeanPerVariable {
                    members: class.member_count,
                };
                if !config.quiet {
                    tracing::info!(members = class.member_count, "{}", notice);
                }
                notices.push(notice);
            }
            reduced.relabeled(Dimension::Variable, Dimension::Member)?
        }
        (true, false) => grid.relabeled(Dimension::Variable, Dimension::Member)?,
        (false, true) => grid.clone(),
        (false, false) => grid.with_singleton_axis(Dimension::Member)?,
    };

    match accessor.axis_length(&out, Dimension::Time) {
        None => out = out.with_singleton_axis(Dimension::Time)?,
        Some(1) => {}
        Some(n) => {
            return Err(ClimError::malformed(format!(
                "climatology has {} time steps, expected 1",
                n
            )))
        }
    }

    let labels = accessor.dimension_labels(&out);
    for dim in [Dimension::Member, Dimension::Lat, Dimension::Lon] {
        if !labels.contains(&dim) {
            return Err(ClimError::malformed(format!(
                "normalized grid has no '{}' axis (axes: {:?})",
                dim, labels
            )));
        }
    }

    let out = out.permuted(&PANEL_LAYOUT)?;

    tracing::debug!(
        panels = accessor.axis_length(&out, Dimension::Member).unwrap_or(0),
        shape = ?out.shape(),
        "normalized grid"
    );

    Ok(Normalized {
        grid: out,
        is_multigrid: class.is_multigrid,
        notices,
    })
}
