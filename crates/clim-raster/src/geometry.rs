//! Raster geometry derived from the grid's coordinate vectors.

use clim_common::{ClimError, ClimResult, Coordinates};
use serde::{Deserialize, Serialize};

/// Topology of a regular raster: cell-centre origin, cell size and cell
/// counts, `x` being longitude and `y` latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterGeometry {
    /// Centre of the first cell on each axis.
    pub origin: (f64, f64),
    /// Spacing between neighbouring cell centres.
    pub cell_size: (f64, f64),
    /// Number of cells along x and y.
    pub dims: (usize, usize),
}

impl RasterGeometry {
    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.dims.0 * self.dims.1
    }
}

/// Build the geometry from the lat/lon vectors. Grids are assumed regular;
/// only the first spacing of each axis is read.
pub fn build_geometry(coords: &Coordinates) -> ClimResult<RasterGeometry> {
    let dx = axis_spacing("lon", &coords.lon)?;
    let dy = axis_spacing("lat", &coords.lat)?;

    Ok(RasterGeometry {
        origin: (coords.lon[0], coords.lat[0]),
        cell_size: (dx, dy),
        dims: (coords.lon.len(), coords.lat.len()),
    })
}

fn axis_spacing(axis: &str, values: &[f64]) -> ClimResult<f64> {
    match values {
        [first, second, ..] => {
            let spacing = second - first;
            if spacing.is_finite() && spacing > 0.0 {
                Ok(spacing)
            } else {
                Err(ClimError::invalid_geometry(
                    axis,
                    format!("cell spacing must be positive, got {}", spacing),
                ))
            }
        }
        _ => Err(ClimError::invalid_geometry(
            axis,
            format!("need at least 2 coordinates to infer spacing, got {}", values.len()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_geometry() {
        let coords = Coordinates::regular(36.0, 0.5, 4, -10.0, 0.25, 8);
        let geom = build_geometry(&coords).unwrap();
        assert_eq!(geom.origin, (-10.0, 36.0));
        assert_eq!(geom.cell_size, (0.25, 0.5));
        assert_eq!(geom.dims, (8, 4));
        assert_eq!(geom.cell_count(), 32);
    }

    #[test]
    fn test_zero_spacing() {
        let coords = Coordinates::new(vec![1.0, 2.0], vec![5.0, 5.0]);
        let err = build_geometry(&coords).unwrap_err();
        assert!(matches!(err, ClimError::InvalidGeometry { ref axis, .. } if axis == "lon"));
    }

    #[test]
    fn test_negative_spacing() {
        let coords = Coordinates::new(vec![45.0, 44.0], vec![0.0, 1.0]);
        let err = build_geometry(&coords).unwrap_err();
        assert!(matches!(err, ClimError::InvalidGeometry { ref axis, .. } if axis == "lat"));
    }

    #[test]
    fn test_single_point_axis() {
        let coords = Coordinates::new(vec![10.0], vec![0.0, 1.0]);
        assert!(build_geometry(&coords).is_err());
    }
}
