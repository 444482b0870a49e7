//! Device position configuration.

use domain::value_objects::GeoLocation;
use serde::{Deserialize, Serialize};

/// Geographic location configuration (latitude/longitude pair)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocationConfig {
    /// Latitude (-90.0 to 90.0)
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    pub longitude: f64,
}

impl GeoLocationConfig {
    /// Convert to domain `GeoLocation` value object
    ///
    /// Returns `None` if coordinates are invalid.
    #[must_use]
    pub fn to_geo_location(&self) -> Option<GeoLocation> {
        GeoLocation::new(self.latitude, self.longitude).ok()
    }
}

/// Where the device position comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Device position; unset means location access is denied
    #[serde(default)]
    pub position: Option<GeoLocationConfig>,

    /// Upper bound for acquiring a position
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Simulated time to first fix in milliseconds
    #[serde(default)]
    pub fix_delay_ms: u64,
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            position: None,
            timeout_secs: default_timeout_secs(),
            fix_delay_ms: 0,
        }
    }
}

impl LocationConfig {
    /// The configured position as a domain value, if valid
    #[must_use]
    pub fn position(&self) -> Option<GeoLocation> {
        self.position.as_ref().and_then(GeoLocationConfig::to_geo_location)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if let Some(position) = self.position {
            if position.to_geo_location().is_none() {
                return Err(format!(
                    "position ({}, {}) is out of range",
                    position.latitude, position.longitude
                ));
            }
        }
        Ok(())
    }
}
