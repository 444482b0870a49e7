//! OSM service configuration

use serde::{Deserialize, Serialize};

const DEFAULT_USER_AGENT: &str = concat!("fuelroute/", env!("CARGO_PKG_VERSION"));

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn validate_common(base_url: &str, timeout_secs: u64) -> Result<(), String> {
    if base_url.is_empty() {
        return Err("base_url must not be empty".to_string());
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(format!("base_url must be an http(s) URL: {base_url}"));
    }
    if timeout_secs == 0 {
        return Err("timeout_secs must be greater than 0".to_string());
    }
    Ok(())
}

// ── Nominatim ───────────────────────────────────────────────────

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_nominatim_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of suggestions per search
    #[serde(default = "default_max_results")]
    pub max_results: u8,

    /// Cache TTL in minutes (0 to disable caching)
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u64,

    /// Minimum spacing between two requests, per the Nominatim usage policy
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_results() -> u8 {
    5
}

const fn default_cache_ttl_minutes() -> u64 {
    60
}

const fn default_min_request_interval_ms() -> u64 {
    1100
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_nominatim_base_url(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
            min_request_interval_ms: default_min_request_interval_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            cache_ttl_minutes: 0,
            min_request_interval_ms: 0,
            ..Default::default()
        }
    }

    /// Check if caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_minutes > 0
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_common(&self.base_url, self.timeout_secs)?;

        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }

        if self.max_results > 50 {
            return Err("max_results must be 50 or less".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }
}

// ── Overpass ────────────────────────────────────────────────────

/// Configuration for the Overpass spatial query service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverpassConfig {
    /// Base URL for the Overpass API (the `interpreter` endpoint is appended)
    #[serde(default = "default_overpass_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_overpass_timeout_secs")]
    pub timeout_secs: u64,

    /// Server-side query timeout passed in the Overpass QL header
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u32,

    /// Name used for elements without a usable `name` tag
    #[serde(default = "default_placeholder_name")]
    pub placeholder_name: String,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_overpass_base_url() -> String {
    "https://overpass-api.de/api".to_string()
}

const fn default_overpass_timeout_secs() -> u64 {
    30
}

const fn default_query_timeout_secs() -> u32 {
    25
}

fn default_placeholder_name() -> String {
    domain::entities::DEFAULT_POI_NAME.to_string()
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: default_overpass_base_url(),
            timeout_secs: default_overpass_timeout_secs(),
            query_timeout_secs: default_query_timeout_secs(),
            placeholder_name: default_placeholder_name(),
            user_agent: default_user_agent(),
        }
    }
}

impl OverpassConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            query_timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_common(&self.base_url, self.timeout_secs)?;

        if self.query_timeout_secs == 0 {
            return Err("query_timeout_secs must be greater than 0".to_string());
        }

        if self.placeholder_name.trim().is_empty() {
            return Err("placeholder_name must not be empty".to_string());
        }

        Ok(())
    }
}

// ── OSRM ────────────────────────────────────────────────────────

/// Configuration for the OSRM route engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsrmConfig {
    /// Base URL for the OSRM HTTP API
    #[serde(default = "default_osrm_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Routing profile (`driving`, `cycling`, `foot`)
    #[serde(default = "default_profile")]
    pub profile: String,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_osrm_base_url() -> String {
    "https://router.project-osrm.org".to_string()
}

fn default_profile() -> String {
    "driving".to_string()
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: default_osrm_base_url(),
            timeout_secs: default_timeout_secs(),
            profile: default_profile(),
            user_agent: default_user_agent(),
        }
    }
}

impl OsrmConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_common(&self.base_url, self.timeout_secs)?;

        let profile_ok = !self.profile.is_empty()
            && self
                .profile
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !profile_ok {
            return Err(format!("invalid routing profile: {:?}", self.profile));
        }

        Ok(())
    }
}
