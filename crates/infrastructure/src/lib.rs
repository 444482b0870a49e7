//! Infrastructure layer - Adapters for external systems
//!
//! Implements the trip ports on top of the OpenStreetMap clients, loads the
//! layered configuration and initializes logging.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, GeoLocationConfig, LocationConfig, LogFormat, LoggingConfig};
pub use telemetry::{TelemetryError, init_logging};
