//! Synthetic climatology generators.
//!
//! Cell values encode their position so that a test can tell from a value
//! alone which panel and which cell it came from:
//!
//! `value = panel * 10_000 + lat_index * 100 + lon_index`
//!
//! Ensemble members add their member index on top, so the mean over `m`
//! members of a cell is `base + (m - 1) / 2`.

use clim_common::{ClimatologyMarker, Coordinates, Dimension, Grid, VariableMetadata};
use ndarray::{ArrayD, IxDyn};

/// Latitude of the first (southernmost) row of generated grids.
pub const TEST_LAT0: f64 = 40.0;
/// Longitude of the first (westernmost) column of generated grids.
pub const TEST_LON0: f64 = -5.0;
/// Spacing of generated grids on both axes, in degrees.
pub const TEST_SPACING: f64 = 0.5;

/// Encoded value of a cell; see the module docs.
pub fn encoded_value(panel: usize, lat: usize, lon: usize) -> f64 {
    (panel * 10_000 + lat * 100 + lon) as f64
}

/// Ascending regular coordinates starting at ([`TEST_LAT0`], [`TEST_LON0`]).
pub fn regular_coordinates(nlat: usize, nlon: usize) -> Coordinates {
    Coordinates::regular(TEST_LAT0, TEST_SPACING, nlat, TEST_LON0, TEST_SPACING, nlon)
}

/// Creates an ensemble climatology with axes `[member, lat, lon]`.
///
/// # Example
///
/// ```
/// use test_utils::create_ensemble_climatology;
///
/// let grid = create_ensemble_climatology(3, 2, 2);
/// assert_eq!(grid.shape(), &[3, 2, 2]);
/// assert!(grid.climatology().is_some());
/// ```
pub fn create_ensemble_climatology(members: usize, nlat: usize, nlon: usize) -> Grid {
    create_raw_ensemble(members, nlat, nlon).with_climatology(ClimatologyMarker::mean())
}

/// Creates an ensemble grid with axes `[member, lat, lon]` that carries no
/// climatology marker (raw, not yet aggregated).
pub fn create_raw_ensemble(members: usize, nlat: usize, nlon: usize) -> Grid {
    let data = ArrayD::from_shape_fn(IxDyn(&[members, nlat, nlon]), |ix| {
        encoded_value(ix[0], ix[1], ix[2])
    });
    Grid::new(
        data,
        vec![Dimension::Member, Dimension::Lat, Dimension::Lon],
        regular_coordinates(nlat, nlon),
    )
    .expect("generated grid is well formed")
}

/// Creates a single-variable, single-realization climatology with axes
/// `[lat, lon]` and no member or time axis.
pub fn create_single_climatology(nlat: usize, nlon: usize) -> Grid {
    let data = ArrayD::from_shape_fn(IxDyn(&[nlat, nlon]), |ix| encoded_value(0, ix[0], ix[1]));
    Grid::new(
        data,
        vec![Dimension::Lat, Dimension::Lon],
        regular_coordinates(nlat, nlon),
    )
    .expect("generated grid is well formed")
    .with_climatology(ClimatologyMarker::mean())
}

/// Creates a multigrid climatology with axes `[variable, member, lat, lon]`
/// (or `[variable, lat, lon]` when `members` is `None`).
///
/// Variable `k` is described as `var{k}` with long name `Variable {k}`.
pub fn create_multigrid_climatology(
    variables: usize,
    members: Option<usize>,
    nlat: usize,
    nlon: usize,
) -> Grid {
    let metadata: Vec<VariableMetadata> = (0..variables)
        .map(|k| VariableMetadata::new(format!("var{}", k)).with_long_name(format!("Variable {}", k)))
        .collect();

    let grid = match members {
        Some(m) => {
            let data = ArrayD::from_shape_fn(IxDyn(&[variables, m, nlat, nlon]), |ix| {
                encoded_value(ix[0], ix[2], ix[3]) + ix[1] as f64
            });
            Grid::new(
                data,
                vec![Dimension::Variable, Dimension::Member, Dimension::Lat, Dimension::Lon],
                regular_coordinates(nlat, nlon),
            )
        }
        None => {
            let data = ArrayD::from_shape_fn(IxDyn(&[variables, nlat, nlon]), |ix| {
                encoded_value(ix[0], ix[1], ix[2])
            });
            Grid::new(
                data,
                vec![Dimension::Variable, Dimension::Lat, Dimension::Lon],
                regular_coordinates(nlat, nlon),
            )
        }
    };

    grid.expect("generated grid is well formed")
        .with_climatology(ClimatologyMarker::mean())
        .with_variables(metadata)
}

/// Creates an ensemble climatology where every `stride`-th cell of every
/// member is NaN.
pub fn create_grid_with_nans(members: usize, nlat: usize, nlon: usize, stride: usize) -> Grid {
    let stride = stride.max(1);
    let data = ArrayD::from_shape_fn(IxDyn(&[members, nlat, nlon]), |ix| {
        if (ix[1] * nlon + ix[2]) % stride == 0 {
            f64::NAN
        } else {
            encoded_value(ix[0], ix[1], ix[2])
        }
    });
    Grid::new(
        data,
        vec![Dimension::Member, Dimension::Lat, Dimension::Lon],
        regular_coordinates(nlat, nlon),
    )
    .expect("generated grid is well formed")
    .with_climatology(ClimatologyMarker::mean())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_value() {
        assert_eq!(encoded_value(0, 0, 0), 0.0);
        assert_eq!(encoded_value(2, 1, 3), 20_103.0);
    }

    #[test]
    fn test_ensemble_values() {
        let grid = create_ensemble_climatology(2, 3, 4);
        assert_eq!(grid.data()[[1, 2, 3]], 10_203.0);
        assert_eq!(grid.coordinates().lat, vec![40.0, 40.5, 41.0]);
    }

    #[test]
    fn test_multigrid_with_members() {
        let grid = create_multigrid_climatology(2, Some(4), 3, 3);
        assert_eq!(grid.shape(), &[2, 4, 3, 3]);
        assert_eq!(grid.data()[[1, 3, 0, 2]], 10_005.0);
        assert_eq!(grid.variables().len(), 2);
    }

    #[test]
    fn test_multigrid_without_members() {
        let grid = create_multigrid_climatology(3, None, 2, 2);
        assert_eq!(grid.dimensions()[0], Dimension::Variable);
        assert_eq!(grid.shape(), &[3, 2, 2]);
    }

    #[test]
    fn test_grid_with_nans() {
        let grid = create_grid_with_nans(1, 2, 2, 2);
        assert!(grid.data()[[0, 0, 0]].is_nan());
        assert_eq!(grid.data()[[0, 0, 1]], 1.0);
        assert!(grid.data()[[0, 1, 0]].is_nan());
    }
}
