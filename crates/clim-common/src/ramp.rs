//! Color ramps for continuous raster rendering.

use serde::{Deserialize, Serialize};

/// Number of colors in the default ramp.
pub const DEFAULT_RAMP_STEPS: usize = 101;

/// Anchor colors of the default ramp: dark blue through cyan, yellow and red
/// to dark red.
const DEFAULT_ANCHORS: [&str; 9] = [
    "#00007F", "#0000FF", "#007FFF", "#00FFFF", "#7FFF7F", "#FFFF00", "#FF7F00", "#FF0000",
    "#7F0000",
];

/// Color value in RGBA format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse "#RRGGBB" or "#RRGGBBAA".
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 && hex.len() != 8 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// "#RRGGBB" form, alpha omitted when opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Linear interpolation between two colors, `t` clamped to [0, 1].
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| ((a as f64) * (1.0 - t) + (b as f64) * t).round() as u8;
        Color::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

/// An ordered sequence of colors mapped onto a value range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    colors: Vec<Color>,
}

impl ColorRamp {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// Spread `steps` colors evenly across the anchors, interpolating linearly
    /// in RGB between neighbouring anchors.
    pub fn interpolate(anchors: &[Color], steps: usize) -> Self {
        let colors = match (anchors.len(), steps) {
            (0, _) | (_, 0) => Vec::new(),
            (1, _) => vec![anchors[0]; steps],
            (_, 1) => vec![anchors[0]],
            (n, _) => {
                let segments = (n - 1) as f64;
                (0..steps)
                    .map(|i| {
                        let pos = i as f64 / (steps - 1) as f64 * segments;
                        let seg = (pos.floor() as usize).min(n - 2);
                        anchors[seg].lerp(&anchors[seg + 1], pos - seg as f64)
                    })
                    .collect()
            }
        };
        Self { colors }
    }

    /// The 101-step default ramp.
    pub fn default_ramp() -> Self {
        let anchors: Vec<Color> = DEFAULT_ANCHORS
            .iter()
            .filter_map(|h| Color::from_hex(h))
            .collect();
        Self::interpolate(&anchors, DEFAULT_RAMP_STEPS)
    }

    pub fn reversed(&self) -> Self {
        Self {
            colors: self.colors.iter().rev().copied().collect(),
        }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::default_ramp()
    }
}
