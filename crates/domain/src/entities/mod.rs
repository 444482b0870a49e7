//! Domain entities - search hits, routes and points of interest

mod candidate_location;
mod point_of_interest;
mod route;

pub use candidate_location::CandidateLocation;
pub use point_of_interest::{DEFAULT_POI_NAME, PointOfInterest};
pub use route::{RouteAlternative, RouteResult, meters_to_km};
