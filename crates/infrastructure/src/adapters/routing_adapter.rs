//! Routing adapter - Implements RoutingPort using the OSRM client

use application::error::RouteError;
use application::ports::{RouteRequest, RoutingPort};
use async_trait::async_trait;
use domain::entities::RouteResult;
use integration_osm::{OsmError, OsrmClient, OsrmConfig, RouteClient};
use tracing::{debug, instrument, warn};

/// Adapter for road routing using OSRM
pub struct RoutingAdapter {
    client: OsrmClient,
}

impl std::fmt::Debug for RoutingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingAdapter")
            .field("client", &"OsrmClient")
            .finish()
    }
}

impl RoutingAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: &OsrmConfig) -> Result<Self, OsmError> {
        Ok(Self {
            client: OsrmClient::new(config)?,
        })
    }

    fn map_error(err: OsmError) -> RouteError {
        match err {
            OsmError::NoRoute { from, to } => RouteError::NoRoute { from, to },
            OsmError::InvalidDistance(meters) => RouteError::InvalidDistance(meters),
            OsmError::Timeout { .. } => RouteError::Timeout,
            OsmError::ParseError(msg) => RouteError::Malformed(msg),
            other => RouteError::Network(other.to_string()),
        }
    }
}

#[async_trait]
impl RoutingPort for RoutingAdapter {
    #[instrument(skip(self, request), fields(from = %request.from, to = %request.to))]
    async fn compute_route(&self, request: &RouteRequest) -> Result<RouteResult, RouteError> {
        let route = self
            .client
            .route(&request.from, &request.to, request.alternatives)
            .await
            .map_err(|e| {
                warn!(error = %e, "Route computation failed");
                Self::map_error(e)
            })?;

        debug!(distance = %route.distance_label(), "Route ready");
        Ok(route)
    }
}
