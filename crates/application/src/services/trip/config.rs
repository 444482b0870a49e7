//! Trip orchestrator configuration

use std::time::Duration;

use domain::value_objects::{BoundingBox, GeoLocation};
use serde::{Deserialize, Serialize};

/// Configuration for a trip planning session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripConfig {
    /// Destination routed to before the user picks one
    #[serde(default = "default_destination")]
    pub default_destination: GeoLocation,

    /// Radius of the search bias region around the origin, in kilometers
    #[serde(default = "default_bias_radius_km")]
    pub bias_radius_km: f64,

    /// Region fuel stations are fetched for
    #[serde(default = "default_poi_region")]
    pub poi_region: BoundingBox,

    /// Ask the routing engine for alternative routes
    #[serde(default = "default_true")]
    pub enable_alternative_routes: bool,

    /// Fetch and show fuel stations
    #[serde(default = "default_true")]
    pub poi_overlay_enabled: bool,

    /// Quiet period after a keystroke before searching (0 searches immediately)
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Zoom level of the map once the origin is known
    #[serde(default = "default_map_zoom")]
    pub map_zoom: u8,
}

const fn default_destination() -> GeoLocation {
    GeoLocation::new_unchecked(10.7867, 76.6548)
}

const fn default_bias_radius_km() -> f64 {
    50.0
}

const fn default_poi_region() -> BoundingBox {
    BoundingBox::kerala()
}

const fn default_true() -> bool {
    true
}

const fn default_search_debounce_ms() -> u64 {
    300
}

const fn default_map_zoom() -> u8 {
    11
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            default_destination: default_destination(),
            bias_radius_km: default_bias_radius_km(),
            poi_region: default_poi_region(),
            enable_alternative_routes: true,
            poi_overlay_enabled: true,
            search_debounce_ms: default_search_debounce_ms(),
            map_zoom: default_map_zoom(),
        }
    }
}

impl TripConfig {
    /// Create a configuration suitable for testing (no debounce)
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            search_debounce_ms: 0,
            ..Default::default()
        }
    }

    /// Debounce interval as a duration
    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        let dest = self.default_destination;
        if GeoLocation::new(dest.latitude(), dest.longitude()).is_err() {
            return Err(format!("default_destination {dest} is out of range"));
        }

        if !self.bias_radius_km.is_finite() || self.bias_radius_km <= 0.0 {
            return Err("bias_radius_km must be a positive number".to_string());
        }

        let region = self.poi_region;
        if BoundingBox::new(region.south(), region.west(), region.north(), region.east()).is_err()
            || region.is_empty()
        {
            return Err(format!("poi_region {region} is not a valid non-empty box"));
        }

        if self.map_zoom > 19 {
            return Err("map_zoom must be 19 or less".to_string());
        }

        Ok(())
    }
}
