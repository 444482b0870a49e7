//! Geocoding adapter - Implements GeocodingPort using integration_osm

use application::error::GeocodeError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::entities::CandidateLocation;
use domain::value_objects::BoundingBox;
use integration_osm::{GeocodingClient, NominatimClient, NominatimConfig, OsmError};
use tracing::{debug, instrument, warn};

/// Adapter for destination search using Nominatim
pub struct GeocodingAdapter {
    client: NominatimClient,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"NominatimClient")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: &NominatimConfig) -> Result<Self, OsmError> {
        Ok(Self {
            client: NominatimClient::new(config)?,
        })
    }

    /// Map integration errors to search errors
    fn map_error(err: OsmError) -> GeocodeError {
        match err {
            OsmError::RateLimitExceeded { .. } => GeocodeError::RateLimited,
            OsmError::Timeout { .. } => GeocodeError::Timeout,
            OsmError::ParseError(msg) => GeocodeError::Malformed(msg),
            other => GeocodeError::Network(other.to_string()),
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self, bias), fields(bounded = bias.is_some()))]
    async fn search(
        &self,
        query: &str,
        bias: Option<BoundingBox>,
    ) -> Result<Vec<CandidateLocation>, GeocodeError> {
        match self.client.search(query, bias.as_ref()).await {
            Ok(candidates) => {
                debug!(count = candidates.len(), "Search completed");
                Ok(candidates)
            },
            Err(OsmError::Superseded) => {
                debug!("Search superseded by a newer one");
                Err(Self::map_error(OsmError::Superseded))
            },
            Err(e) => {
                warn!(error = %e, retryable = e.is_retryable(), "Destination search failed");
                Err(Self::map_error(e))
            },
        }
    }
}
