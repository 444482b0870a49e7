//! Application-level errors
//!
//! The four trip errors mirror the four data sources the orchestrator
//! reconciles. Each one is recovered inside the orchestrator and turned into a
//! user-visible notice; none of them stops the event loop.

use thiserror::Error;

/// Errors surfaced to the display layer while driving a session
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The orchestrator is no longer running
    #[error("Trip session closed")]
    SessionClosed,
}

/// Device geolocation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user or host refused access to the position
    #[error("Location permission denied")]
    PermissionDenied,

    /// The host could not determine a position
    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    /// No position arrived in time
    #[error("Location request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl LocationError {
    /// Origin acquisition is a single attempt per session
    pub const fn is_retryable(&self) -> bool {
        false
    }
}

/// Destination search failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// Network or HTTP failure
    #[error("Geocoding request failed: {0}")]
    Network(String),

    /// The service answered with something unreadable
    #[error("Geocoding response malformed: {0}")]
    Malformed(String),

    /// The service asked us to slow down
    #[error("Geocoding rate limit exceeded")]
    RateLimited,

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

impl GeocodeError {
    /// Returns true if a later keystroke may succeed
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::Malformed(_))
    }
}

/// Route computation failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// The engine found no path between the endpoints
    #[error("No route found from {from} to {to}")]
    NoRoute {
        /// Origin description
        from: String,
        /// Destination description
        to: String,
    },

    /// Network or HTTP failure
    #[error("Routing request failed: {0}")]
    Network(String),

    /// The engine answered with something unreadable
    #[error("Routing response malformed: {0}")]
    Malformed(String),

    /// The engine reported a negative or non-finite distance
    #[error("Routing engine reported invalid distance {0}")]
    InvalidDistance(f64),

    /// Request timeout
    #[error("Routing request timed out")]
    Timeout,
}

impl RouteError {
    /// Returns true if the same request may succeed later
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout)
    }
}

/// Fuel station retrieval failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoiFetchError {
    /// Network or HTTP failure
    #[error("Fuel station request failed: {0}")]
    Network(String),

    /// The service answered with something unreadable
    #[error("Fuel station response malformed: {0}")]
    Malformed(String),

    /// Request timeout
    #[error("Fuel station request timed out")]
    Timeout,
}

impl PoiFetchError {
    /// Returns true if a later fetch may succeed
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::Malformed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_session_display() {
        assert_eq!(ApplicationError::SessionClosed.to_string(), "Trip session closed");
    }

    #[test]
    fn location_errors_never_retry() {
        assert!(!LocationError::PermissionDenied.is_retryable());
        assert!(!LocationError::Timeout { timeout_secs: 10 }.is_retryable());
    }

    #[test]
    fn geocode_retryable_errors() {
        assert!(GeocodeError::Network("reset".to_string()).is_retryable());
        assert!(GeocodeError::RateLimited.is_retryable());
        assert!(!GeocodeError::Malformed("not json".to_string()).is_retryable());
    }

    #[test]
    fn route_error_display() {
        let err = RouteError::NoRoute {
            from: "10.5, 76.2".to_string(),
            to: "10.78, 76.65".to_string(),
        };
        assert!(err.to_string().contains("10.5, 76.2"));
        assert!(!err.is_retryable());
        assert!(RouteError::Timeout.is_retryable());
    }

    #[test]
    fn malformed_poi_response_is_final() {
        assert!(PoiFetchError::Timeout.is_retryable());
        assert!(!PoiFetchError::Malformed("truncated".to_string()).is_retryable());
    }

    #[test]
    fn timeout_display_contains_seconds() {
        let err = LocationError::Timeout { timeout_secs: 15 };
        assert!(err.to_string().contains("15"));
    }
}
