//! Error types for climatology raster preparation.

use thiserror::Error;

/// Result type alias using ClimError.
pub type ClimResult<T> = Result<T, ClimError>;

/// Primary error type for the raster pipeline.
///
/// Every variant is fatal for the call that raised it: stages return the
/// error immediately and no partial raster is produced.
#[derive(Debug, Error)]
pub enum ClimError {
    // === Input Errors ===
    #[error("Input grid is not a climatology: aggregate it first (e.g. per-cell mean)")]
    NotAClimatology,

    #[error("Malformed grid: {0}")]
    MalformedGrid(String),

    #[error("Grid has no panels to render")]
    EmptyPanelAxis,

    // === Geometry Errors ===
    #[error("Invalid geometry on axis '{axis}': {message}")]
    InvalidGeometry { axis: String, message: String },

    // === Style Errors ===
    #[error("Unknown backdrop theme '{0}' (expected none, coastline or countries)")]
    UnknownBackdropTheme(String),

    // === Infrastructure Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Rendering failed: {0}")]
    Render(String),
}

impl ClimError {
    /// Create a MalformedGrid error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedGrid(msg.into())
    }

    /// Create an InvalidGeometry error.
    pub fn invalid_geometry(axis: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            axis: axis.into(),
            message: msg.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Stable error code, suitable for logs and for callers that dispatch on
    /// the failure kind without matching the enum.
    pub fn code(&self) -> &'static str {
        match self {
            ClimError::NotAClimatology => "NotAClimatologyError",
            ClimError::MalformedGrid(_) => "MalformedGridError",
            ClimError::EmptyPanelAxis => "EmptyPanelAxisError",
            ClimError::InvalidGeometry { .. } => "InvalidGeometryError",
            ClimError::UnknownBackdropTheme(_) => "UnknownBackdropThemeError",
            ClimError::InvalidConfig(_) => "InvalidConfigError",
            ClimError::Render(_) => "RenderError",
        }
    }
}

impl From<serde_json::Error> for ClimError {
    fn from(err: serde_json::Error) -> Self {
        ClimError::InvalidConfig(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ClimError::NotAClimatology.code(), "NotAClimatologyError");
        assert_eq!(ClimError::malformed("x").code(), "MalformedGridError");
        assert_eq!(ClimError::EmptyPanelAxis.code(), "EmptyPanelAxisError");
        assert_eq!(
            ClimError::invalid_geometry("lat", "zero spacing").code(),
            "InvalidGeometryError"
        );
        assert_eq!(
            ClimError::UnknownBackdropTheme("ocean".into()).code(),
            "UnknownBackdropThemeError"
        );
    }

    #[test]
    fn test_display_includes_context() {
        let err = ClimError::invalid_geometry("lat", "spacing is zero");
        assert_eq!(
            err.to_string(),
            "Invalid geometry on axis 'lat': spacing is zero"
        );
    }
}
