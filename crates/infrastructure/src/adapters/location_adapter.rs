//! Location adapter - Implements LocationPort from a configured position
//!
//! A terminal has no positioning hardware, so the device position is taken
//! from configuration or the command line. An absent position behaves like a
//! refused permission prompt.

use std::time::Duration;

use application::error::LocationError;
use application::ports::LocationPort;
use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use tracing::{debug, instrument, warn};

use crate::config::LocationConfig;

/// Location provider backed by a configured position
#[derive(Debug, Clone)]
pub struct ConfiguredLocationProvider {
    position: Option<GeoLocation>,
    fix_delay: Duration,
    timeout: Duration,
}

impl ConfiguredLocationProvider {
    /// Create a provider from the `location` config section
    #[must_use]
    pub fn new(config: &LocationConfig) -> Self {
        Self {
            position: config.position(),
            fix_delay: Duration::from_millis(config.fix_delay_ms),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Replace the configured position (e.g. from `--origin`)
    #[must_use]
    pub const fn with_position(mut self, position: Option<GeoLocation>) -> Self {
        if position.is_some() {
            self.position = position;
        }
        self
    }

    /// Position this provider reports, if any
    #[must_use]
    pub const fn position(&self) -> Option<GeoLocation> {
        self.position
    }

    async fn fix(&self) -> Result<GeoLocation, LocationError> {
        if !self.fix_delay.is_zero() {
            tokio::time::sleep(self.fix_delay).await;
        }
        self.position.ok_or(LocationError::PermissionDenied)
    }
}

#[async_trait]
impl LocationPort for ConfiguredLocationProvider {
    #[instrument(skip(self))]
    async fn acquire(&self) -> Result<GeoLocation, LocationError> {
        let result = match tokio::time::timeout(self.timeout, self.fix()).await {
            Ok(result) => result,
            Err(_) => Err(LocationError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }),
        };

        match &result {
            Ok(position) => debug!(%position, "Position acquired"),
            Err(e) => warn!(error = %e, "Position unavailable"),
        }
        result
    }
}
