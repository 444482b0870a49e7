//! Device geolocation port

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::LocationError;

/// Port for one-shot acquisition of the user's position
///
/// Implementations make a single attempt (high accuracy where the host
/// supports it) and never retry; the orchestrator calls this once per session.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationPort: Send + Sync {
    /// Acquire the current position
    async fn acquire(&self) -> Result<GeoLocation, LocationError>;
}
