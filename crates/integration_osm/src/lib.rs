//! OpenStreetMap service clients for fuelroute
//!
//! Three public OSM services back the trip planner:
//!
//! - [Nominatim](https://nominatim.openstreetmap.org) for free-text
//!   destination search ([`NominatimClient`])
//! - [Overpass](https://overpass-api.de) for amenity lookups inside a
//!   bounding box ([`OverpassClient`])
//! - [OSRM](https://project-osrm.org) for road routing ([`OsrmClient`])
//!
//! # Architecture
//!
//! Each service has a client trait ([`GeocodingClient`], [`AmenityClient`],
//! [`RouteClient`]) and one HTTP implementation. All of them share
//! [`OsmError`]; the infrastructure layer maps it onto the application's
//! per-source error types.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_osm::{OsrmClient, OsrmConfig, RouteClient};
//!
//! let client = OsrmClient::new(&OsrmConfig::default())?;
//! let route = client.route(&from, &to, false).await?;
//! println!("{}", route.distance_label());
//! ```

mod config;
mod error;
mod http;
mod models;
mod nominatim;
mod osrm;
mod overpass;

pub use config::{NominatimConfig, OsrmConfig, OverpassConfig};
pub use error::OsmError;
pub use nominatim::{GeocodingClient, NominatimClient};
pub use osrm::{OsrmClient, RouteClient};
pub use overpass::{AmenityClient, FUEL_AMENITY, OverpassClient};
