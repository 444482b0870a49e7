//! Application configuration
//!
//! Sections:
//! - `trip`: orchestrator behavior
//! - `location`: device position source
//! - `nominatim`, `overpass`, `osrm`: OpenStreetMap services
//! - `logging`: log filter and format
//!
//! Values are layered: built-in defaults, then `fuelroute.toml` (or an explicit
//! file), then `FUELROUTE_*` environment variables with `__` between nested keys.

mod location;
mod logging;

use std::path::Path;

use application::services::TripConfig;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use integration_osm::{NominatimConfig, OsrmConfig, OverpassConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use location::{GeoLocationConfig, LocationConfig};
pub use logging::{LogFormat, LoggingConfig};

/// Base name of the optional configuration file
pub const DEFAULT_CONFIG_FILE: &str = "fuelroute";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "FUELROUTE";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Trip orchestrator configuration
    #[serde(default)]
    pub trip: TripConfig,

    /// Device position configuration
    #[serde(default)]
    pub location: LocationConfig,

    /// Geocoding service configuration
    #[serde(default)]
    pub nominatim: NominatimConfig,

    /// Fuel station service configuration
    #[serde(default)]
    pub overpass: OverpassConfig,

    /// Route engine configuration
    #[serde(default)]
    pub osrm: OsrmConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Without `path`, `fuelroute.toml` in the working directory is used if it
    /// exists. An explicit `path` must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read, a value has the wrong type
    /// or the result fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            .add_source(Self::environment());

        Self::from_builder(builder)
    }

    /// Environment source, e.g. `FUELROUTE_OSRM__BASE_URL`
    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate().map_err(ConfigError::Message)?;
        debug!(
            nominatim = %config.nominatim.base_url,
            overpass = %config.overpass.base_url,
            osrm = %config.osrm.base_url,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Configuration for tests: no debounce, caching or request spacing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            trip: TripConfig::for_testing(),
            location: LocationConfig::default(),
            nominatim: NominatimConfig::for_testing(),
            overpass: OverpassConfig::for_testing(),
            osrm: OsrmConfig::for_testing(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first failing section as `section: reason`.
    pub fn validate(&self) -> Result<(), String> {
        self.trip.validate().map_err(|e| format!("trip: {e}"))?;
        self.location.validate().map_err(|e| format!("location: {e}"))?;
        self.nominatim
            .validate()
            .map_err(|e| format!("nominatim: {e}"))?;
        self.overpass
            .validate()
            .map_err(|e| format!("overpass: {e}"))?;
        self.osrm.validate().map_err(|e| format!("osrm: {e}"))?;
        Ok(())
    }
}
