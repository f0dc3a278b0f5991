//! The climatology grid entity and its header accessor.

use crate::{ClimError, ClimResult};
use ndarray::{ArrayD, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named array axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Time,
    Member,
    Variable,
    Lat,
    Lon,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Member => "member",
            Self::Variable => "variable",
            Self::Lat => "lat",
            Self::Lon => "lon",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = ClimError;

    /// Parse an axis label (case-insensitive). `var` is accepted for `variable`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "time" => Ok(Self::Time),
            "member" => Ok(Self::Member),
            "variable" | "var" => Ok(Self::Variable),
            "lat" => Ok(Self::Lat),
            "lon" => Ok(Self::Lon),
            other => Err(ClimError::malformed(format!(
                "unrecognized dimension label '{}'",
                other
            ))),
        }
    }
}

/// Provenance tag recording that a grid already holds an aggregated statistic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClimatologyMarker {
    /// Name of the aggregation function (e.g. "mean").
    pub function: String,
}

impl ClimatologyMarker {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
        }
    }

    /// Marker for a per-cell mean climatology.
    pub fn mean() -> Self {
        Self::new("mean")
    }
}

/// Cell-centre coordinate vectors of the spatial axes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
}

impl Coordinates {
    pub fn new(lat: Vec<f64>, lon: Vec<f64>) -> Self {
        Self { lat, lon }
    }

    /// Regularly spaced coordinates starting at the given origin.
    pub fn regular(lat0: f64, dlat: f64, nlat: usize, lon0: f64, dlon: f64, nlon: usize) -> Self {
        Self {
            lat: (0..nlat).map(|i| lat0 + i as f64 * dlat).collect(),
            lon: (0..nlon).map(|i| lon0 + i as f64 * dlon).collect(),
        }
    }

    /// Number of spatial cells (lat × lon).
    pub fn cell_count(&self) -> usize {
        self.lat.len() * self.lon.len()
    }
}

/// Descriptor of one variable in a multigrid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableMetadata {
    /// Short variable name (e.g. "tas").
    pub name: String,
    /// Human-readable name (e.g. "Near surface air temperature").
    #[serde(default)]
    pub long_name: Option<String>,
    /// Vertical level, when the variable is defined on one.
    #[serde(default)]
    pub level: Option<f64>,
}

impl VariableMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            long_name: None,
            level: None,
        }
    }

    pub fn with_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.long_name = Some(long_name.into());
        self
    }

    pub fn with_level(mut self, level: f64) -> Self {
        self.level = Some(level);
        self
    }
}

/// A spatially referenced n-dimensional array with named axes.
///
/// Invariants enforced on construction:
/// - one label per array axis, no label repeated;
/// - the `lat`/`lon` extents match the coordinate vectors.
///
/// Transformations never mutate a grid in place; they return a new value
/// whose labels are recomputed from the operation.
#[derive(Debug, Clone)]
pub struct Grid {
    data: ArrayD<f64>,
    dimensions: Vec<Dimension>,
    coordinates: Coordinates,
    climatology: Option<ClimatologyMarker>,
    variables: Vec<VariableMetadata>,
}

impl Grid {
    /// Create a new grid, validating labels against the array shape.
    pub fn new(
        data: ArrayD<f64>,
        dimensions: Vec<Dimension>,
        coordinates: Coordinates,
    ) -> ClimResult<Self> {
        validate_layout(&data, &dimensions, &coordinates)?;
        Ok(Self {
            data,
            dimensions,
            coordinates,
            climatology: None,
            variables: Vec::new(),
        })
    }

    /// Create a grid from string axis labels such as `["member", "lat", "lon"]`.
    pub fn from_labels(
        data: ArrayD<f64>,
        labels: &[&str],
        coordinates: Coordinates,
    ) -> ClimResult<Self> {
        let dimensions = labels
            .iter()
            .map(|l| l.parse())
            .collect::<ClimResult<Vec<Dimension>>>()?;
        Self::new(data, dimensions, coordinates)
    }

    pub fn with_climatology(mut self, marker: ClimatologyMarker) -> Self {
        self.climatology = Some(marker);
        self
    }

    pub fn with_variables(mut self, variables: Vec<VariableMetadata>) -> Self {
        self.variables = variables;
        self
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn climatology(&self) -> Option<&ClimatologyMarker> {
        self.climatology.as_ref()
    }

    pub fn variables(&self) -> &[VariableMetadata] {
        &self.variables
    }

    /// Position of the axis in the array, if present.
    pub fn axis_index(&self, dim: Dimension) -> Option<usize> {
        self.dimensions.iter().position(|d| *d == dim)
    }

    /// Length of the axis, if present.
    pub fn axis_len(&self, dim: Dimension) -> Option<usize> {
        self.axis_index(dim).map(|i| self.data.len_of(Axis(i)))
    }

    pub fn has_dimension(&self, dim: Dimension) -> bool {
        self.dimensions.contains(&dim)
    }

    /// Build a grid carrying this grid's coordinates, provenance and variable
    /// metadata around new data.
    pub fn with_data(&self, data: ArrayD<f64>, dimensions: Vec<Dimension>) -> ClimResult<Grid> {
        validate_layout(&data, &dimensions, &self.coordinates)?;
        Ok(Grid {
            data,
            dimensions,
            coordinates: self.coordinates.clone(),
            climatology: self.climatology.clone(),
            variables: self.variables.clone(),
        })
    }

    /// Rename axis `from` to `to`. Data is untouched.
    pub fn relabeled(&self, from: Dimension, to: Dimension) -> ClimResult<Grid> {
        let idx = self
            .axis_index(from)
            .ok_or_else(|| ClimError::malformed(format!("cannot relabel missing axis '{}'", from)))?;
        if self.has_dimension(to) {
            return Err(ClimError::malformed(format!(
                "cannot relabel '{}' to '{}': axis already present",
                from, to
            )));
        }
        let mut dimensions = self.dimensions.clone();
        dimensions[idx] = to;
        self.with_data(self.data.clone(), dimensions)
    }

    /// Prepend a length-1 axis.
    pub fn with_singleton_axis(&self, dim: Dimension) -> ClimResult<Grid> {
        if self.has_dimension(dim) {
            return Err(ClimError::malformed(format!("axis '{}' already present", dim)));
        }
        let data = self.data.clone().insert_axis(Axis(0));
        let mut dimensions = Vec::with_capacity(self.dimensions.len() + 1);
        dimensions.push(dim);
        dimensions.extend_from_slice(&self.dimensions);
        self.with_data(data, dimensions)
    }

    /// Reorder axes to `order`, which must name every axis exactly once.
    pub fn permuted(&self, order: &[Dimension]) -> ClimResult<Grid> {
        if order.len() != self.dimensions.len() {
            return Err(ClimError::malformed(format!(
                "permutation {:?} does not match axes {:?}",
                order, self.dimensions
            )));
        }
        let axes = order
            .iter()
            .map(|d| {
                self.axis_index(*d)
                    .ok_or_else(|| ClimError::malformed(format!("axis '{}' not in grid", d)))
            })
            .collect::<ClimResult<Vec<usize>>>()?;
        let data = self
            .data
            .clone()
            .permuted_axes(axes)
            .as_standard_layout()
            .into_owned();
        self.with_data(data, order.to_vec())
    }
}

fn validate_layout(
    data: &ArrayD<f64>,
    dimensions: &[Dimension],
    coordinates: &Coordinates,
) -> ClimResult<()> {
    if data.ndim() != dimensions.len() {
        return Err(ClimError::malformed(format!(
            "array rank {} does not match {} dimension labels",
            data.ndim(),
            dimensions.len()
        )));
    }

    for (i, dim) in dimensions.iter().enumerate() {
        if dimensions[..i].contains(dim) {
            return Err(ClimError::malformed(format!("duplicate dimension '{}'", dim)));
        }
    }

    for (dim, coords) in [
        (Dimension::Lat, &coordinates.lat),
        (Dimension::Lon, &coordinates.lon),
    ] {
        if let Some(i) = dimensions.iter().position(|d| *d == dim) {
            let extent = data.len_of(Axis(i));
            if extent != coords.len() {
                return Err(ClimError::malformed(format!(
                    "'{}' extent {} does not match {} coordinates",
                    dim,
                    extent,
                    coords.len()
                )));
            }
        }
    }

    Ok(())
}

/// Read access to a grid's header: axis labels, extents and coordinates.
pub trait GridAccessor {
    fn dimension_labels(&self, grid: &Grid) -> Vec<Dimension>;

    fn axis_length(&self, grid: &Grid, dim: Dimension) -> Option<usize>;

    fn coordinates<'g>(&self, grid: &'g Grid) -> &'g Coordinates;
}

/// Accessor reading straight from the [`Grid`] fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderAccessor;

impl GridAccessor for HeaderAccessor {
    fn dimension_labels(&self, grid: &Grid) -> Vec<Dimension> {
        grid.dimensions().to_vec()
    }

    fn axis_length(&self, grid: &Grid, dim: Dimension) -> Option<usize> {
        grid.axis_len(dim)
    }

    fn coordinates<'g>(&self, grid: &'g Grid) -> &'g Coordinates {
        grid.coordinates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, IxDyn};

    fn sample(shape: &[usize]) -> ArrayD<f64> {
        let n: usize = shape.iter().product();
        Array::from_shape_vec(IxDyn(shape), (0..n).map(|v| v as f64).collect()).unwrap()
    }

    #[test]
    fn test_parse_dimension_labels() {
        assert_eq!("member".parse::<Dimension>().unwrap(), Dimension::Member);
        assert_eq!("var".parse::<Dimension>().unwrap(), Dimension::Variable);
        assert_eq!("LAT".parse::<Dimension>().unwrap(), Dimension::Lat);
        assert!("level".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_rank_mismatch_rejected() {
        let coords = Coordinates::regular(0.0, 1.0, 2, 0.0, 1.0, 2);
        let err = Grid::new(sample(&[2, 2]), vec![Dimension::Member, Dimension::Lat, Dimension::Lon], coords)
            .unwrap_err();
        assert!(matches!(err, ClimError::MalformedGrid(_)));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let coords = Coordinates::regular(0.0, 1.0, 2, 0.0, 1.0, 2);
        let err = Grid::from_labels(sample(&[2, 2]), &["lat", "lat"], coords).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_coordinate_length_mismatch_rejected() {
        let coords = Coordinates::regular(0.0, 1.0, 3, 0.0, 1.0, 2);
        assert!(Grid::from_labels(sample(&[2, 2]), &["lat", "lon"], coords).is_err());
    }

    #[test]
    fn test_relabel_keeps_data() {
        let coords = Coordinates::regular(0.0, 1.0, 2, 0.0, 1.0, 3);
        let grid = Grid::from_labels(sample(&[4, 2, 3]), &["variable", "lat", "lon"], coords)
            .unwrap()
            .with_climatology(ClimatologyMarker::mean());
        let relabeled = grid.relabeled(Dimension::Variable, Dimension::Member).unwrap();

        assert_eq!(relabeled.dimensions(), &[Dimension::Member, Dimension::Lat, Dimension::Lon]);
        assert_eq!(relabeled.data(), grid.data());
        assert!(relabeled.climatology().is_some());
        // The source grid is untouched
        assert_eq!(grid.dimensions()[0], Dimension::Variable);
    }

    #[test]
    fn test_relabel_onto_existing_axis_rejected() {
        let coords = Coordinates::regular(0.0, 1.0, 2, 0.0, 1.0, 2);
        let grid = Grid::from_labels(sample(&[2, 3, 2, 2]), &["variable", "member", "lat", "lon"], coords)
            .unwrap();
        assert!(grid.relabeled(Dimension::Variable, Dimension::Member).is_err());
    }

    #[test]
    fn test_singleton_axis_and_permute() {
        let coords = Coordinates::regular(0.0, 1.0, 2, 0.0, 1.0, 3);
        let grid = Grid::from_labels(sample(&[3, 2]), &["lon", "lat"], coords).unwrap();
        let grid = grid.with_singleton_axis(Dimension::Time).unwrap();
        assert_eq!(grid.shape(), &[1, 3, 2]);

        let grid = grid
            .permuted(&[Dimension::Time, Dimension::Lat, Dimension::Lon])
            .unwrap();
        assert_eq!(grid.shape(), &[1, 2, 3]);
        // (lon=2, lat=1) was at flat index 2*2+1 = 5
        assert_eq!(grid.data()[[0, 1, 2]], 5.0);
    }

    #[test]
    fn test_header_accessor() {
        let coords = Coordinates::regular(10.0, 1.0, 2, 20.0, 1.0, 3);
        let grid = Grid::from_labels(sample(&[5, 2, 3]), &["member", "lat", "lon"], coords).unwrap();
        let accessor = HeaderAccessor;
        assert_eq!(accessor.axis_length(&grid, Dimension::Member), Some(5));
        assert_eq!(accessor.axis_length(&grid, Dimension::Time), None);
        assert_eq!(accessor.coordinates(&grid).lon, vec![20.0, 21.0, 22.0]);
        assert_eq!(accessor.dimension_labels(&grid).len(), 3);
    }
}
