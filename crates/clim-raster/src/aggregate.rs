//! Reduction of a grid along one named axis.
//!
//! The pipeline only needs an ensemble mean across `member`, but reduction
//! sits behind [`GridAggregator`] so callers can plug in their own operator.

use clim_common::{ClimError, ClimResult, Dimension, Grid};
use ndarray::{ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// Reduction applied along an axis. The ensemble mean is the statistic
/// shown for multigrids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    #[default]
    Mean,
}

/// Collapses one axis of a grid.
pub trait GridAggregator {
    /// Return a new grid without `axis`. With `skip_missing`, NaN cells are
    /// ignored; a lane with no valid value reduces to NaN.
    fn aggregate(
        &self,
        grid: &Grid,
        axis: Dimension,
        op: AggregateOp,
        skip_missing: bool,
    ) -> ClimResult<Grid>;
}

/// In-memory reduction over the grid's array.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReduceAggregator;

impl GridAggregator for ReduceAggregator {
    fn aggregate(
        &self,
        grid: &Grid,
        axis: Dimension,
        op: AggregateOp,
        skip_missing: bool,
    ) -> ClimResult<Grid> {
        let idx = grid
            .axis_index(axis)
            .ok_or_else(|| ClimError::malformed(format!("cannot aggregate missing axis '{}'", axis)))?;

        let reduced = grid
            .data()
            .map_axis(Axis(idx), |lane| reduce_lane(lane, op, skip_missing));

        let dimensions = grid
            .dimensions()
            .iter()
            .copied()
            .filter(|d| *d != axis)
            .collect();

        tracing::debug!(axis = %axis, op = ?op, "aggregated grid");

        grid.with_data(reduced, dimensions)
    }
}

/// Reduce one lane. NaN handling follows `skip_missing`.
fn reduce_lane(lane: ArrayView1<'_, f64>, op: AggregateOp, skip_missing: bool) -> f64 {
    if !skip_missing && lane.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }

    let mut valid = lane.iter().copied().filter(|v| !v.is_nan()).peekable();
    if valid.peek().is_none() {
        return f64::NAN;
    }

    match op {
        AggregateOp::Mean => {
            let (sum, count) = valid.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
            sum / count as f64
        }
    }
}
