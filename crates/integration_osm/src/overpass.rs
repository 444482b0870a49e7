//! Overpass amenity client
//!
//! Fetches OSM nodes tagged `amenity=<kind>` inside a bounding box through the
//! [Overpass API](https://overpass-api.de).

use async_trait::async_trait;
use domain::entities::PointOfInterest;
use domain::value_objects::{BoundingBox, GeoLocation};
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::OverpassConfig;
use crate::error::OsmError;
use crate::http::{build_client, endpoint, get_text};
use crate::models::{OverpassElement, OverpassResponse};

/// Amenity value for fuel stations
pub const FUEL_AMENITY: &str = "fuel";

/// Trait for amenity lookup clients
#[async_trait]
pub trait AmenityClient: Send + Sync {
    /// Fetch every node with `amenity=<amenity>` inside `region`
    ///
    /// Every returned point lies inside `region`.
    async fn fetch_amenities(
        &self,
        amenity: &str,
        region: &BoundingBox,
    ) -> Result<Vec<PointOfInterest>, OsmError>;
}

/// Overpass API client
#[derive(Debug)]
pub struct OverpassClient {
    client: Client,
    config: OverpassConfig,
}

impl OverpassClient {
    /// Create a new Overpass client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OverpassConfig) -> Result<Self, OsmError> {
        let client = build_client(config.timeout_secs, &config.user_agent)?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Build the Overpass QL query for an amenity inside a box
    #[must_use]
    pub fn build_query(&self, amenity: &str, region: &BoundingBox) -> String {
        let amenity = amenity.replace('\\', "\\\\").replace('"', "\\\"");
        format!(
            "[out:json][timeout:{}];node[\"amenity\"=\"{amenity}\"]({});out body;",
            self.config.query_timeout_secs,
            region.to_overpass_bbox()
        )
    }

    fn convert_elements(
        &self,
        elements: Vec<OverpassElement>,
        region: &BoundingBox,
    ) -> Vec<PointOfInterest> {
        let mut skipped = 0_usize;
        let points: Vec<PointOfInterest> = elements
            .into_iter()
            .filter_map(|element| {
                let (Some(lat), Some(lon)) = (element.lat, element.lon) else {
                    skipped += 1;
                    return None;
                };
                let Ok(location) = GeoLocation::new(lat, lon) else {
                    warn!(id = ?element.id, lat, lon, "Skipping element with invalid coordinates");
                    skipped += 1;
                    return None;
                };
                if !region.contains(&location) {
                    skipped += 1;
                    return None;
                }
                let name = element.tags.get("name").map(String::as_str);
                Some(PointOfInterest::new(
                    location,
                    name,
                    &self.config.placeholder_name,
                ))
            })
            .collect();

        if skipped > 0 {
            debug!(skipped, "Skipped elements without usable coordinates");
        }
        points
    }
}

#[async_trait]
impl AmenityClient for OverpassClient {
    #[instrument(skip(self, region), fields(region = %region))]
    async fn fetch_amenities(
        &self,
        amenity: &str,
        region: &BoundingBox,
    ) -> Result<Vec<PointOfInterest>, OsmError> {
        let url = endpoint(&self.config.base_url, "interpreter");
        let query = self.build_query(amenity, region);

        debug!(%query, "Querying Overpass");

        let body = get_text(
            &self.client,
            &url,
            &[("data", query.as_str())],
            self.config.timeout_secs,
        )
        .await?
        .into_success_body()?;

        let response: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| OsmError::ParseError(e.to_string()))?;
        let points = self.convert_elements(response.elements, region);

        debug!(count = points.len(), %amenity, "Amenities found");
        Ok(points)
    }
}
