//! Backdrop overlay assets.

use clim_common::{BackdropTheme, ClimResult, OverlayLayer};
use std::collections::HashMap;

/// Supplies the vector layer drawn for a backdrop theme.
pub trait BackdropProvider {
    /// The layer for `theme`, `None` for [`BackdropTheme::None`].
    fn layer(&self, theme: BackdropTheme) -> ClimResult<Option<OverlayLayer>>;
}

/// Backdrop layers registered up front, keyed by theme.
#[derive(Debug, Clone, Default)]
pub struct StaticBackdrops {
    layers: HashMap<BackdropTheme, OverlayLayer>,
}

impl StaticBackdrops {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, theme: BackdropTheme, layer: OverlayLayer) -> Self {
        self.layers.insert(theme, layer);
        self
    }
}

impl BackdropProvider for StaticBackdrops {
    fn layer(&self, theme: BackdropTheme) -> ClimResult<Option<OverlayLayer>> {
        if theme == BackdropTheme::None {
            return Ok(None);
        }
        let layer = self.layers.get(&theme).cloned();
        if layer.is_none() {
            tracing::warn!(theme = %theme, "no asset registered for backdrop theme");
        }
        Ok(layer)
    }
}
