//! Common test fixtures for clim-raster tests.
//!
//! This module provides pre-defined metadata and coordinate sets that
//! represent common scenarios in climatology plotting.

/// Common coordinate sets for testing.
pub mod coords {
    use clim_common::Coordinates;

    /// A 1-degree grid over the Iberian peninsula (lat 36..=43, lon -10..=3).
    pub fn iberia() -> Coordinates {
        Coordinates::regular(36.0, 1.0, 8, -10.0, 1.0, 14)
    }

    /// Latitudes stored north to south (descending).
    pub fn descending_lat() -> Coordinates {
        Coordinates::new(vec![45.0, 44.0, 43.0], vec![0.0, 1.0])
    }

    /// Two identical longitudes (zero spacing).
    pub fn zero_lon_spacing() -> Coordinates {
        Coordinates::new(vec![10.0, 11.0], vec![5.0, 5.0])
    }

    /// A single latitude row.
    pub fn single_row() -> Coordinates {
        Coordinates::new(vec![10.0], vec![0.0, 2.0, 4.0])
    }
}

/// Common variable metadata for testing.
pub mod variables {
    use clim_common::VariableMetadata;

    /// Near-surface temperature, no vertical level.
    pub fn tas() -> VariableMetadata {
        VariableMetadata::new("tas").with_long_name("Near surface air temperature")
    }

    /// Air temperature on the 850 hPa level.
    pub fn ta850() -> VariableMetadata {
        VariableMetadata::new("ta")
            .with_long_name("Air temperature")
            .with_level(850.0)
    }

    /// Air temperature on the 500 hPa level.
    pub fn ta500() -> VariableMetadata {
        VariableMetadata::new("ta")
            .with_long_name("Air temperature")
            .with_level(500.0)
    }

    /// Precipitation with no long name.
    pub fn pr() -> VariableMetadata {
        VariableMetadata::new("pr")
    }
}

/// Common overlay layers for testing.
pub mod layers {
    use clim_common::OverlayLayer;

    /// A stand-in coastline geometry.
    pub fn coastline() -> OverlayLayer {
        OverlayLayer::new(
            "coastline",
            serde_json::json!({"type": "MultiLineString", "coordinates": [[[0.0, 0.0], [1.0, 1.0]]]}),
        )
    }

    /// A stand-in country borders geometry.
    pub fn countries() -> OverlayLayer {
        OverlayLayer::new(
            "countries",
            serde_json::json!({"type": "MultiPolygon", "coordinates": []}),
        )
    }

    /// A caller-supplied layer (e.g. station markers).
    pub fn stations() -> OverlayLayer {
        OverlayLayer::new(
            "stations",
            serde_json::json!({"type": "MultiPoint", "coordinates": [[-3.7, 40.4]]}),
        )
    }
}
