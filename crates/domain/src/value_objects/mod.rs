//! Value Objects - Immutable, identity-less domain primitives

mod bounding_box;
mod geo_location;

pub use bounding_box::BoundingBox;
pub use geo_location::GeoLocation;
