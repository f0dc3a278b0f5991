//! Style options handed to the render collaborator.
//!
//! The raster pipeline never interprets styling beyond resolving the color
//! ramp and merging backdrop layers; everything else is forwarded as typed
//! fields or through the `extra_render_hints` passthrough map.

use crate::{ClimError, ColorRamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Static vector backdrop drawn under the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackdropTheme {
    #[default]
    None,
    Coastline,
    Countries,
}

impl BackdropTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Coastline => "coastline",
            Self::Countries => "countries",
        }
    }
}

impl fmt::Display for BackdropTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BackdropTheme {
    type Err = ClimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "coastline" => Ok(Self::Coastline),
            "countries" => Ok(Self::Countries),
            _ => Err(ClimError::UnknownBackdropTheme(s.to_string())),
        }
    }
}

/// An opaque overlay layer. The payload is owned by the render collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayLayer {
    pub name: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl OverlayLayer {
    pub fn new(name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// Typed render options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleOptions {
    /// Caller-supplied ramp; the default ramp is used when absent.
    #[serde(default)]
    pub color_ramp: Option<ColorRamp>,

    /// Reverse the resolved ramp.
    #[serde(default)]
    pub reverse_colors: bool,

    /// Layers drawn with the raster, in order.
    #[serde(default)]
    pub overlay_layers: Vec<OverlayLayer>,

    /// Aspect ratio hint for the plot.
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: f64,

    /// Passthrough options the pipeline does not interpret.
    #[serde(default)]
    pub extra_render_hints: BTreeMap<String, serde_json::Value>,
}

fn default_aspect_ratio() -> f64 {
    1.0
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            color_ramp: None,
            reverse_colors: false,
            overlay_layers: Vec::new(),
            aspect_ratio: default_aspect_ratio(),
            extra_render_hints: BTreeMap::new(),
        }
    }
}

impl StyleOptions {
    /// Parse style options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ClimError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_color_ramp(mut self, ramp: ColorRamp) -> Self {
        self.color_ramp = Some(ramp);
        self
    }

    pub fn with_hint(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra_render_hints.insert(key.into(), value);
        self
    }

    /// The ramp the renderer should use.
    pub fn resolved_ramp(&self) -> ColorRamp {
        let ramp = self.color_ramp.clone().unwrap_or_default();
        if self.reverse_colors {
            ramp.reversed()
        } else {
            ramp
        }
    }

    /// Append a backdrop layer after any caller-supplied layers.
    pub fn push_backdrop(&mut self, layer: OverlayLayer) {
        self.overlay_layers.push(layer);
    }
}
