//! Logging initialization
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` takes precedence over
//! the configured filter.

mod logging;

pub use logging::{TelemetryError, init_logging};
