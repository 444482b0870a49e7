//! Route engine port

use async_trait::async_trait;
use domain::entities::RouteResult;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::RouteError;

/// A route computation request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    /// Start of the route
    pub from: GeoLocation,
    /// End of the route
    pub to: GeoLocation,
    /// Ask the engine for alternative routes as well
    pub alternatives: bool,
}

impl RouteRequest {
    /// Create a request for the primary route only
    #[must_use]
    pub const fn new(from: GeoLocation, to: GeoLocation) -> Self {
        Self {
            from,
            to,
            alternatives: false,
        }
    }

    /// Request alternatives as well
    #[must_use]
    pub const fn with_alternatives(mut self, alternatives: bool) -> Self {
        self.alternatives = alternatives;
        self
    }
}

/// Port wrapping the third-party routing engine
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Compute a route between the request's endpoints
    ///
    /// The returned route records the requested endpoints and its distance in
    /// kilometers rounded to two decimals.
    async fn compute_route(&self, request: &RouteRequest) -> Result<RouteResult, RouteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn RoutingPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn RoutingPort>();
    }

    #[test]
    fn request_defaults_to_primary_only() {
        let from = GeoLocation::new_unchecked(10.50, 76.20);
        let to = GeoLocation::new_unchecked(10.7867, 76.6548);
        let request = RouteRequest::new(from, to);
        assert!(!request.alternatives);
        assert!(request.with_alternatives(true).alternatives);
    }
}
