//! OSM client error types

use thiserror::Error;

/// Errors that can occur when talking to an OSM service
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OsmError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the service)
        retry_after_secs: Option<u64>,
    },

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The route engine found no path
    #[error("No route found from {from} to {to}")]
    NoRoute {
        /// Origin description
        from: String,
        /// Destination description
        to: String,
    },

    /// The route engine reported a negative or non-finite distance
    #[error("Invalid route distance: {0} m")]
    InvalidDistance(f64),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A newer search was issued while this one waited for its request slot
    #[error("Search superseded before it was sent")]
    Superseded,
}

impl OsmError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::ServiceUnavailable(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }
}
