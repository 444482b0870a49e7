//! Nominatim geocoding client
//!
//! Turns free-text queries into ranked candidate destinations using the
//! [Nominatim](https://nominatim.openstreetmap.org) search API.
//!
//! Implements the usage policy's request spacing and a result cache keyed by
//! query and bias region. A search still waiting for its request slot when a
//! newer one arrives is dropped with [`OsmError::Superseded`], so type-ahead
//! input only pays the spacing delay once.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use domain::entities::CandidateLocation;
use domain::value_objects::{BoundingBox, GeoLocation};
use moka::future::Cache;
use reqwest::Client;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use crate::config::NominatimConfig;
use crate::error::OsmError;
use crate::http::{build_client, endpoint, get_text};
use crate::models::NominatimPlace;

/// Trait for free-text geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search for places matching `query`, best match first
    ///
    /// With a `bias`, the service is asked to bound results to the box and
    /// anything it still returns outside the box is dropped.
    async fn search(
        &self,
        query: &str,
        bias: Option<&BoundingBox>,
    ) -> Result<Vec<CandidateLocation>, OsmError>;
}

/// Nominatim-based geocoding client with rate limiting and caching
#[derive(Debug)]
pub struct NominatimClient {
    client: Client,
    config: NominatimConfig,
    cache: Option<Cache<String, Vec<CandidateLocation>>>,
    last_request: Arc<Mutex<Option<Instant>>>,
    latest_search: AtomicU64,
}

impl NominatimClient {
    /// Create a new Nominatim client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, OsmError> {
        let client = build_client(config.timeout_secs, &config.user_agent)?;

        let cache = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(config.cache_ttl_minutes * 60))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Arc::new(Mutex::new(None)),
            latest_search: AtomicU64::new(0),
        })
    }

    /// Keep at least `min_request_interval_ms` between two requests
    ///
    /// Fails with [`OsmError::Superseded`] once a search newer than `ticket`
    /// has started; a superseded search never claims the request slot.
    async fn rate_limit(&self, ticket: u64) -> Result<(), OsmError> {
        let interval = Duration::from_millis(self.config.min_request_interval_ms);
        let mut last = self.last_request.lock().await;
        self.ensure_latest(ticket)?;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < interval {
                let wait = interval.saturating_sub(elapsed);
                debug!(?wait, "Rate limiting geocoding request");
                tokio::time::sleep(wait).await;
                self.ensure_latest(ticket)?;
            }
        }
        *last = Some(Instant::now());
        Ok(())
    }

    fn ensure_latest(&self, ticket: u64) -> Result<(), OsmError> {
        if self.latest_search.load(Ordering::SeqCst) == ticket {
            Ok(())
        } else {
            debug!(ticket, "Dropping superseded search");
            Err(OsmError::Superseded)
        }
    }

    fn cache_key(query: &str, bias: Option<&BoundingBox>) -> String {
        let bias = bias.map(BoundingBox::to_viewbox).unwrap_or_default();
        format!("{}|{bias}", query.to_lowercase())
    }

    /// Convert raw hits, skipping records without usable coordinates
    fn convert_places(
        places: Vec<NominatimPlace>,
        bias: Option<&BoundingBox>,
    ) -> Vec<CandidateLocation> {
        places
            .into_iter()
            .filter_map(|place| {
                let location = match GeoLocation::parse(&place.lat, &place.lon) {
                    Ok(location) => location,
                    Err(e) => {
                        warn!(lat = %place.lat, lon = %place.lon, error = %e, "Skipping unparsable place");
                        return None;
                    },
                };
                if bias.is_some_and(|region| !region.contains(&location)) {
                    debug!(%location, "Dropping place outside bias region");
                    return None;
                }
                Some(CandidateLocation::new(
                    location,
                    place.display_name.unwrap_or_default(),
                ))
            })
            .collect()
    }
}

#[async_trait]
impl GeocodingClient for NominatimClient {
    #[instrument(skip(self, bias), fields(bounded = bias.is_some()))]
    async fn search(
        &self,
        query: &str,
        bias: Option<&BoundingBox>,
    ) -> Result<Vec<CandidateLocation>, OsmError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let cache_key = Self::cache_key(query, bias);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&cache_key).await {
                debug!(%query, "Geocoding cache hit");
                return Ok(hit);
            }
        }

        let ticket = self.latest_search.fetch_add(1, Ordering::SeqCst) + 1;
        self.rate_limit(ticket).await?;

        let url = endpoint(&self.config.base_url, "search");
        let mut params = vec![
            ("q", query.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", self.config.max_results.to_string()),
        ];
        if let Some(region) = bias {
            params.push(("viewbox", region.to_viewbox()));
            params.push(("bounded", "1".to_string()));
        }

        debug!(%query, "Searching destinations");

        let body = get_text(&self.client, &url, &params, self.config.timeout_secs)
            .await?
            .into_success_body()?;

        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| OsmError::ParseError(e.to_string()))?;
        let candidates = Self::convert_places(places, bias);

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, candidates.clone()).await;
        }
        debug!(count = candidates.len(), "Destinations found");
        Ok(candidates)
    }
}
