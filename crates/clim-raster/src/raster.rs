//! The spatial raster handed to the render collaborator.

use crate::geometry::RasterGeometry;
use clim_common::{ClimError, ClimResult};
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One named panel column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterColumn {
    pub name: String,
    pub values: Vec<f64>,
}

/// Geometry plus one column per panel, rows in scan order (north to south,
/// west to east).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialRaster {
    geometry: RasterGeometry,
    coordinates: Vec<(f64, f64)>,
    columns: Vec<RasterColumn>,
}

impl SpatialRaster {
    /// Build a raster from a `cells × panels` matrix.
    ///
    /// Fails when names are not unique, when their count differs from the
    /// matrix columns, or when the row count differs from the geometry's
    /// cell count.
    pub fn new(
        geometry: RasterGeometry,
        names: Vec<String>,
        matrix: &Array2<f64>,
        coordinates: Vec<(f64, f64)>,
    ) -> ClimResult<Self> {
        if names.len() != matrix.ncols() {
            return Err(ClimError::malformed(format!(
                "{} panel names for {} columns",
                names.len(),
                matrix.ncols()
            )));
        }

        if matrix.nrows() != geometry.cell_count() || coordinates.len() != matrix.nrows() {
            return Err(ClimError::malformed(format!(
                "geometry has {} cells but matrix has {} rows and {} coordinates",
                geometry.cell_count(),
                matrix.nrows(),
                coordinates.len()
            )));
        }

        {
            let mut seen = HashSet::with_capacity(names.len());
            if let Some(dup) = names.iter().find(|n| !seen.insert(n.as_str())) {
                return Err(ClimError::malformed(format!("duplicate panel name '{}'", dup)));
            }
        }

        let columns = names
            .into_iter()
            .zip(matrix.axis_iter(Axis(1)))
            .map(|(name, col)| RasterColumn {
                name,
                values: col.to_vec(),
            })
            .collect();

        Ok(Self {
            geometry,
            coordinates,
            columns,
        })
    }

    pub fn geometry(&self) -> &RasterGeometry {
        &self.geometry
    }

    /// `(x, y)` of every row.
    pub fn coordinates(&self) -> &[(f64, f64)] {
        &self.coordinates
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> + '_ {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), c.values.as_slice()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn panel_count(&self) -> usize {
        self.columns.len()
    }

    pub fn cell_count(&self) -> usize {
        self.coordinates.len()
    }

    /// Finite min and max across all panels, `None` when every value is NaN.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.columns
            .iter()
            .flat_map(|c| c.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn geometry(nx: usize, ny: usize) -> RasterGeometry {
        RasterGeometry {
            origin: (0.0, 0.0),
            cell_size: (1.0, 1.0),
            dims: (nx, ny),
        }
    }

    fn coords(n: usize) -> Vec<(f64, f64)> {
        (0..n).map(|i| (i as f64, 0.0)).collect()
    }

    #[test]
    fn test_columns_by_name() {
        let matrix = array![[1.0, 10.0], [2.0, 20.0]];
        let raster = SpatialRaster::new(
            geometry(2, 1),
            vec!["a".into(), "b".into()],
            &matrix,
            coords(2),
        )
        .unwrap();

        assert_eq!(raster.names(), vec!["a", "b"]);
        assert_eq!(raster.column("b"), Some(&[10.0, 20.0][..]));
        assert_eq!(raster.column("c"), None);
        assert_eq!(raster.panel_count(), 2);
        assert_eq!(raster.cell_count(), 2);
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let matrix = array![[1.0, 10.0]];
        let err = SpatialRaster::new(
            geometry(1, 1),
            vec!["a".into(), "a".into()],
            &matrix,
            coords(1),
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_rejects_cell_count_mismatch() {
        let matrix = array![[1.0], [2.0], [3.0]];
        assert!(SpatialRaster::new(geometry(2, 2), vec!["a".into()], &matrix, coords(3)).is_err());
    }

    #[test]
    fn test_value_range_skips_nan() {
        let matrix = array![[f64::NAN, 4.0], [-1.0, f64::NAN]];
        let raster = SpatialRaster::new(
            geometry(2, 1),
            vec!["a".into(), "b".into()],
            &matrix,
            coords(2),
        )
        .unwrap();
        assert_eq!(raster.value_range(), Some((-1.0, 4.0)));
    }

    #[test]
    fn test_serializes_to_json() {
        let matrix = array![[1.5]];
        let raster =
            SpatialRaster::new(geometry(1, 1), vec!["Member_1".into()], &matrix, coords(1)).unwrap();
        let json = serde_json::to_value(&raster).unwrap();
        assert_eq!(json["columns"][0]["name"], "Member_1");
        assert_eq!(json["geometry"]["dims"][0], 1);
    }
}
