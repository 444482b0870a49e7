//! Domain layer for FuelRoute
//!
//! Contains the geographic value objects and trip entities shared by every
//! other crate. This layer performs no I/O and defines the ubiquitous language:
//! origin, destination, bias region, route and point of interest.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
