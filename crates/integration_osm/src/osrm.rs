//! OSRM route engine client
//!
//! Computes road routes with the OSRM `route` service and converts the
//! engine's meters into kilometers rounded to two decimals.

use async_trait::async_trait;
use domain::DomainError;
use domain::entities::{RouteAlternative, RouteResult, meters_to_km};
use domain::value_objects::GeoLocation;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::OsrmConfig;
use crate::error::OsmError;
use crate::http::{build_client, endpoint, get_text};
use crate::models::{OsrmGeometry, OsrmResponse};

/// Trait for route engine clients
#[async_trait]
pub trait RouteClient: Send + Sync {
    /// Compute the best route from `from` to `to`, plus alternatives if asked
    async fn route(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
        alternatives: bool,
    ) -> Result<RouteResult, OsmError>;
}

/// OSRM HTTP API client
#[derive(Debug)]
pub struct OsrmClient {
    client: Client,
    config: OsrmConfig,
}

impl OsrmClient {
    /// Create a new OSRM client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OsrmConfig) -> Result<Self, OsmError> {
        let client = build_client(config.timeout_secs, &config.user_agent)?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// URL path of a route request; OSRM takes `lon,lat` pairs
    fn route_path(&self, from: &GeoLocation, to: &GeoLocation) -> String {
        format!(
            "route/v1/{}/{},{};{},{}",
            self.config.profile,
            from.longitude(),
            from.latitude(),
            to.longitude(),
            to.latitude()
        )
    }

    fn convert_geometry(geometry: OsrmGeometry) -> Result<Vec<GeoLocation>, OsmError> {
        geometry
            .coordinates
            .into_iter()
            .map(|[lon, lat]| {
                GeoLocation::new(lat, lon).map_err(|e| OsmError::ParseError(e.to_string()))
            })
            .collect()
    }

    fn parse_response(
        body: &str,
        from: &GeoLocation,
        to: &GeoLocation,
        alternatives: bool,
    ) -> Result<RouteResult, OsmError> {
        let response: OsrmResponse =
            serde_json::from_str(body).map_err(|e| OsmError::ParseError(e.to_string()))?;

        if response.code != "Ok" || response.routes.is_empty() {
            debug!(code = %response.code, message = ?response.message, "Route engine found no route");
            return Err(OsmError::NoRoute {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        let mut routes = response.routes.into_iter();
        let Some(primary) = routes.next() else {
            return Err(OsmError::NoRoute {
                from: from.to_string(),
                to: to.to_string(),
            });
        };

        let geometry = Self::convert_geometry(primary.geometry)?;
        let route = RouteResult::from_meters(*from, *to, geometry, primary.distance)
            .map_err(invalid_distance)?;

        if !alternatives {
            return Ok(route);
        }

        // A broken alternative never costs the caller the primary route
        let alternatives: Vec<RouteAlternative> = routes
            .enumerate()
            .filter_map(|(index, alt)| {
                let converted = meters_to_km(alt.distance)
                    .map_err(invalid_distance)
                    .and_then(|total_distance_km| {
                        Ok(RouteAlternative {
                            total_distance_km,
                            geometry: Self::convert_geometry(alt.geometry)?,
                        })
                    });
                match converted {
                    Ok(alternative) => Some(alternative),
                    Err(e) => {
                        warn!(index = index + 1, error = %e, "Dropping unusable alternative route");
                        None
                    },
                }
            })
            .collect();

        Ok(route.with_alternatives(alternatives))
    }
}

fn invalid_distance(e: DomainError) -> OsmError {
    match e {
        DomainError::InvalidDistance(meters) => OsmError::InvalidDistance(meters),
        other => OsmError::ParseError(other.to_string()),
    }
}

#[async_trait]
impl RouteClient for OsrmClient {
    #[instrument(skip(self, from, to), fields(from = %from, to = %to))]
    async fn route(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
        alternatives: bool,
    ) -> Result<RouteResult, OsmError> {
        let url = endpoint(&self.config.base_url, &self.route_path(from, to));
        let params = [
            ("overview", "full"),
            ("geometries", "geojson"),
            ("alternatives", if alternatives { "true" } else { "false" }),
        ];

        debug!(%url, "Requesting route");

        let reply = get_text(&self.client, &url, &params, self.config.timeout_secs).await?;

        // OSRM reports NoRoute/NoSegment as 400 with a JSON body
        if !reply.status.is_success() && reply.status != StatusCode::BAD_REQUEST {
            warn!(status = %reply.status, "Route engine request failed");
            return Err(OsmError::RequestFailed(format!("HTTP {}", reply.status)));
        }

        let route = Self::parse_response(&reply.body, from, to, alternatives)?;
        debug!(
            distance_km = route.total_distance_km,
            alternatives = route.alternatives.len(),
            "Route computed"
        );
        Ok(route)
    }
}
