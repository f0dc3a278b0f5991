//! Array to raster reshaping.
//!
//! Each panel's `lat × lon` slice is flattened with lat as the outer loop
//! and lon as the inner loop. The coordinate pairs are generated with the
//! same loop order through the same [`cell_index`] function, so value `k` of
//! every column always belongs to coordinate pair `k`. Rows are then put in
//! raster scan order: north to south, and west to east within a row.

use crate::config::RasterConfig;
use crate::normalize::PANEL_LAYOUT;
use clim_common::{ClimError, ClimResult, Coordinates, Dimension, Grid, GridAccessor};
use ndarray::{Array2, ArrayView1, ArrayView2, Axis, Ix2};
use rayon::prelude::*;

/// Position of cell `(lat_i, lon_i)` in a flattened slice.
#[inline]
pub fn cell_index(lat_i: usize, lon_i: usize, nlon: usize) -> usize {
    lat_i * nlon + lon_i
}

/// Flatten a `lat × lon` slice into native order.
pub fn flatten_slice(slice: ArrayView2<'_, f64>) -> Vec<f64> {
    let (nlat, nlon) = slice.dim();
    let mut out = vec![f64::NAN; nlat * nlon];
    for ((lat_i, lon_i), v) in slice.indexed_iter() {
        out[cell_index(lat_i, lon_i, nlon)] = *v;
    }
    out
}

/// Inverse of [`flatten_slice`].
pub fn unflatten(column: &[f64], nlat: usize, nlon: usize) -> ClimResult<Array2<f64>> {
    if column.len() != nlat * nlon {
        return Err(ClimError::malformed(format!(
            "column of {} values cannot be reshaped to {} x {}",
            column.len(),
            nlat,
            nlon
        )));
    }
    Ok(Array2::from_shape_fn((nlat, nlon), |(i, j)| {
        column[cell_index(i, j, nlon)]
    }))
}

/// `(lon, lat)` pair of every cell, in native order.
pub fn coordinate_pairs(coords: &Coordinates) -> Vec<(f64, f64)> {
    let nlon = coords.lon.len();
    let mut pairs = vec![(0.0, 0.0); coords.cell_count()];
    for (lat_i, &lat) in coords.lat.iter().enumerate() {
        for (lon_i, &lon) in coords.lon.iter().enumerate() {
            pairs[cell_index(lat_i, lon_i, nlon)] = (lon, lat);
        }
    }
    pairs
}

/// Row permutation into scan order: descending lat, then ascending lon.
/// The sort is stable, so exact duplicates keep their native order.
pub fn scan_order(pairs: &[(f64, f64)]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..pairs.len()).collect();
    order.sort_by(|&a, &b| {
        let (xa, ya) = pairs[a];
        let (xb, yb) = pairs[b];
        yb.total_cmp(&ya).then(xa.total_cmp(&xb))
    });
    order
}

/// Panel values in raster scan order.
#[derive(Debug, Clone)]
pub struct Assembled {
    /// `cells × panels`; column `i` holds panel `i`.
    pub matrix: Array2<f64>,
    /// `(x, y)` of each matrix row.
    pub coordinates: Vec<(f64, f64)>,
}

impl Assembled {
    pub fn cell_count(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn panel_count(&self) -> usize {
        self.matrix.ncols()
    }
}

/// Flatten every panel of a normalized grid and reorder the rows.
pub fn assemble(
    grid: &Grid,
    accessor: &impl GridAccessor,
    config: &RasterConfig,
) -> ClimResult<Assembled> {
    if accessor.dimension_labels(grid) != PANEL_LAYOUT {
        return Err(ClimError::malformed(format!(
            "grid is not normalized: axes {:?}",
            grid.dimensions()
        )));
    }

    let n_mem = accessor.axis_length(grid, Dimension::Member).unwrap_or(0);
    if n_mem == 0 {
        return Err(ClimError::EmptyPanelAxis);
    }

    let coords = accessor.coordinates(grid);
    let le = coords.cell_count();

    let extract = |i: usize| -> ClimResult<Vec<f64>> {
        // [time, lat, lon] -> [lat, lon]
        let slice = grid
            .data()
            .index_axis(Axis(0), i)
            .index_axis_move(Axis(0), 0)
            .into_dimensionality::<Ix2>()
            .map_err(|e| ClimError::malformed(format!("panel {} is not 2-D: {}", i, e)))?;

        let mut column = flatten_slice(slice);
        if config.clamps() {
            column.iter_mut().for_each(|v| *v = config.clamp(*v));
        }
        Ok(column)
    };

    let columns: Vec<Vec<f64>> = if config.parallel {
        (0..n_mem).into_par_iter().map(&extract).collect::<ClimResult<_>>()?
    } else {
        (0..n_mem).map(&extract).collect::<ClimResult<_>>()?
    };

    let mut native = Array2::from_elem((le, n_mem), f64::NAN);
    for (i, column) in columns.iter().enumerate() {
        native
            .column_mut(i)
            .assign(&ArrayView1::from(column.as_slice()));
    }

    let pairs = coordinate_pairs(coords);
    let order = scan_order(&pairs);
    let matrix = native.select(Axis(0), &order);
    let coordinates = order.iter().map(|&k| pairs[k]).collect();

    tracing::debug!(cells = le, panels = n_mem, "assembled raster matrix");

    Ok(Assembled {
        matrix,
        coordinates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_flatten_is_lat_outer() {
        let slice = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert_eq!(flatten_slice(slice.view()), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_flatten_transposed_view() {
        // a non-standard layout view still flattens in logical order
        let stored = array![[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]];
        let slice = stored.t();
        assert_eq!(flatten_slice(slice), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_unflatten_wrong_length() {
        assert!(unflatten(&[1.0, 2.0, 3.0], 2, 2).is_err());
    }

    #[test]
    fn test_pairs_aligned_with_flatten() {
        let coords = Coordinates::new(vec![10.0, 20.0], vec![1.0, 2.0, 3.0]);
        let pairs = coordinate_pairs(&coords);
        assert_eq!(pairs[0], (1.0, 10.0));
        assert_eq!(pairs[2], (3.0, 10.0));
        assert_eq!(pairs[3], (1.0, 20.0));
        assert_eq!(pairs[cell_index(1, 2, 3)], (3.0, 20.0));
    }

    #[test]
    fn test_scan_order() {
        let coords = Coordinates::new(vec![10.0, 20.0], vec![1.0, 2.0]);
        let pairs = coordinate_pairs(&coords);
        let order = scan_order(&pairs);
        let sorted: Vec<(f64, f64)> = order.iter().map(|&k| pairs[k]).collect();
        assert_eq!(
            sorted,
            vec![(1.0, 20.0), (2.0, 20.0), (1.0, 10.0), (2.0, 10.0)]
        );
    }

    #[test]
    fn test_scan_order_is_stable() {
        let pairs = vec![(0.0, 1.0), (0.0, 1.0), (0.0, 2.0)];
        assert_eq!(scan_order(&pairs), vec![2, 0, 1]);
    }
}
