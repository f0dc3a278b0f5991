//! Configuration for raster preparation.

use clim_common::{ClimError, ClimResult};
use serde::{Deserialize, Serialize};

/// Configuration for the raster pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterConfig {
    /// Values below this are raised to it before rendering.
    #[serde(default)]
    pub set_min: Option<f64>,

    /// Values above this are lowered to it before rendering.
    #[serde(default)]
    pub set_max: Option<f64>,

    /// Suppress the informational ensemble-mean notice in the log.
    #[serde(default)]
    pub quiet: bool,

    /// Extract panels in parallel.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_parallel() -> bool {
    true
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            set_min: None,
            set_max: None,
            quiet: false,
            parallel: default_parallel(),
        }
    }
}

impl RasterConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("CLIM_RASTER_SET_MIN") {
            match val.parse() {
                Ok(v) => config.set_min = Some(v),
                Err(_) => tracing::warn!(value = %val, "ignoring unparseable CLIM_RASTER_SET_MIN"),
            }
        }

        if let Ok(val) = std::env::var("CLIM_RASTER_SET_MAX") {
            match val.parse() {
                Ok(v) => config.set_max = Some(v),
                Err(_) => tracing::warn!(value = %val, "ignoring unparseable CLIM_RASTER_SET_MAX"),
            }
        }

        if let Ok(val) = std::env::var("CLIM_RASTER_QUIET") {
            config.quiet = parse_flag(&val);
        }

        if let Ok(val) = std::env::var("CLIM_RASTER_PARALLEL") {
            config.parallel = parse_flag(&val);
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ClimResult<()> {
        for (name, bound) in [("set_min", self.set_min), ("set_max", self.set_max)] {
            if let Some(v) = bound {
                if !v.is_finite() {
                    return Err(ClimError::invalid_config(format!("{} must be finite", name)));
                }
            }
        }

        if let (Some(min), Some(max)) = (self.set_min, self.set_max) {
            if min > max {
                return Err(ClimError::invalid_config(format!(
                    "set_min ({}) must not exceed set_max ({})",
                    min, max
                )));
            }
        }

        Ok(())
    }

    /// Whether any clamping bound is configured.
    pub fn clamps(&self) -> bool {
        self.set_min.is_some() || self.set_max.is_some()
    }

    /// Clamp a value to the configured bounds. NaN passes through.
    pub fn clamp(&self, value: f64) -> f64 {
        let mut v = value;
        if let Some(min) = self.set_min {
            if v < min {
                v = min;
            }
        }
        if let Some(max) = self.set_max {
            if v > max {
                v = max;
            }
        }
        v
    }
}

fn parse_flag(val: &str) -> bool {
    val.to_lowercase() == "true" || val == "1"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RasterConfig::default();
        assert_eq!(config.set_min, None);
        assert_eq!(config.set_max, None);
        assert!(!config.quiet);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
        assert!(!config.clamps());
    }

    #[test]
    fn test_config_validation() {
        let mut config = RasterConfig {
            set_min: Some(10.0),
            set_max: Some(5.0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ClimError::InvalidConfig(_))));

        config.set_max = Some(10.0);
        assert!(config.validate().is_ok());

        config.set_min = Some(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamp() {
        let config = RasterConfig {
            set_min: Some(0.0),
            set_max: Some(1.0),
            ..Default::default()
        };
        assert_eq!(config.clamp(-3.0), 0.0);
        assert_eq!(config.clamp(0.5), 0.5);
        assert_eq!(config.clamp(7.0), 1.0);
        assert!(config.clamp(f64::NAN).is_nan());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("no"));
    }

    #[test]
    fn test_config_from_json() {
        let config: RasterConfig = serde_json::from_str(r#"{"set_max": 30.0}"#).unwrap();
        assert_eq!(config.set_max, Some(30.0));
        assert!(config.parallel);
    }
}
