//! Destination search port

use async_trait::async_trait;
use domain::entities::CandidateLocation;
use domain::value_objects::BoundingBox;
#[cfg(test)]
use mockall::automock;

use crate::error::GeocodeError;

/// Port for free-text destination search
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Search for candidate destinations
    ///
    /// Results keep the service's relevance order. A blank query yields an
    /// empty list without contacting the service. When `bias` is given, every
    /// result lies inside it.
    async fn search(
        &self,
        query: &str,
        bias: Option<BoundingBox>,
    ) -> Result<Vec<CandidateLocation>, GeocodeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn GeocodingPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn GeocodingPort>();
    }
}
