//! POI adapter - Implements PoiPort using the Overpass client

use application::error::PoiFetchError;
use application::ports::PoiPort;
use async_trait::async_trait;
use domain::entities::PointOfInterest;
use domain::value_objects::BoundingBox;
use integration_osm::{AmenityClient, FUEL_AMENITY, OsmError, OverpassClient, OverpassConfig};
use tracing::{info, instrument, warn};

/// Adapter for fuel station lookup using Overpass
pub struct PoiAdapter {
    client: OverpassClient,
}

impl std::fmt::Debug for PoiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoiAdapter")
            .field("client", &"OverpassClient")
            .finish()
    }
}

impl PoiAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: &OverpassConfig) -> Result<Self, OsmError> {
        Ok(Self {
            client: OverpassClient::new(config)?,
        })
    }

    fn map_error(err: OsmError) -> PoiFetchError {
        match err {
            OsmError::Timeout { .. } => PoiFetchError::Timeout,
            OsmError::ParseError(msg) => PoiFetchError::Malformed(msg),
            other => PoiFetchError::Network(other.to_string()),
        }
    }
}

#[async_trait]
impl PoiPort for PoiAdapter {
    #[instrument(skip(self, region), fields(region = %region))]
    async fn fetch_fuel_stations(
        &self,
        region: &BoundingBox,
    ) -> Result<Vec<PointOfInterest>, PoiFetchError> {
        let stations = self
            .client
            .fetch_amenities(FUEL_AMENITY, region)
            .await
            .map_err(|e| {
                warn!(error = %e, "Fuel station lookup failed");
                Self::map_error(e)
            })?;

        info!(count = stations.len(), "Fuel stations loaded");
        Ok(stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_error_variants() {
        assert_eq!(
            PoiAdapter::map_error(OsmError::Timeout { timeout_secs: 30 }),
            PoiFetchError::Timeout
        );
        assert_eq!(
            PoiAdapter::map_error(OsmError::ParseError("eof".into())),
            PoiFetchError::Malformed("eof".to_string())
        );
        assert!(matches!(
            PoiAdapter::map_error(OsmError::ServiceUnavailable("HTTP 504".into())),
            PoiFetchError::Network(_)
        ));
    }
}
