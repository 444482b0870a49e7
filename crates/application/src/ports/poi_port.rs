//! Fuel station retrieval port

use async_trait::async_trait;
use domain::entities::PointOfInterest;
use domain::value_objects::BoundingBox;
#[cfg(test)]
use mockall::automock;

use crate::error::PoiFetchError;

/// Port for fetching fuel stations inside a region
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PoiPort: Send + Sync {
    /// Fetch every fuel station inside `region`
    ///
    /// Every returned point lies inside `region` and carries a non-empty name.
    async fn fetch_fuel_stations(
        &self,
        region: &BoundingBox,
    ) -> Result<Vec<PointOfInterest>, PoiFetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn PoiPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn PoiPort>();
    }

    #[test]
    fn mock_reports_timeout() {
        let mut mock = MockPoiPort::new();
        mock.expect_fetch_fuel_stations()
            .times(1)
            .returning(|_| Err(PoiFetchError::Timeout));

        let result = tokio_test::block_on(mock.fetch_fuel_stations(&BoundingBox::kerala()));
        assert_eq!(result, Err(PoiFetchError::Timeout));
    }
}
