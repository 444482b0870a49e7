//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod geocoding_adapter;
mod location_adapter;
mod poi_adapter;
mod routing_adapter;

use std::sync::Arc;

use application::ports::MapSurfacePort;
use application::services::TripPorts;
use domain::value_objects::GeoLocation;
use integration_osm::OsmError;

pub use geocoding_adapter::GeocodingAdapter;
pub use location_adapter::ConfiguredLocationProvider;
pub use poi_adapter::PoiAdapter;
pub use routing_adapter::RoutingAdapter;

use crate::config::AppConfig;

/// Wire the trip ports from the application configuration
///
/// `origin` replaces the configured device position when given.
///
/// # Errors
///
/// Returns an error if one of the HTTP clients fails to initialize.
pub fn build_trip_ports(
    config: &AppConfig,
    origin: Option<GeoLocation>,
    map_surface: Option<Arc<dyn MapSurfacePort>>,
) -> Result<TripPorts, OsmError> {
    let location = ConfiguredLocationProvider::new(&config.location).with_position(origin);

    Ok(TripPorts {
        location: Arc::new(location),
        geocoding: Arc::new(GeocodingAdapter::with_config(&config.nominatim)?),
        pois: Arc::new(PoiAdapter::with_config(&config.overpass)?),
        routing: Arc::new(RoutingAdapter::with_config(&config.osrm)?),
        map_surface,
    })
}
