//! Application layer - Use cases and orchestration
//!
//! Contains the trip-planning orchestrator and the port definitions it drives.
//! Adapters in the infrastructure layer implement the ports; the display layer
//! consumes the orchestrator's read-only [`TripView`].

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, GeocodeError, LocationError, PoiFetchError, RouteError};
pub use ports::*;
pub use services::*;
