//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::entities::{PointOfInterest, RouteResult, meters_to_km};
use domain::value_objects::{BoundingBox, GeoLocation};
use proptest::prelude::*;

// ============================================================================
// GeoLocation Property Tests
// ============================================================================

mod geo_location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_ok());

            let loc = result.unwrap();
            prop_assert!((loc.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((loc.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_err());
        }

        #[test]
        fn invalid_longitude_rejected(
            lat in -90.0f64..=90.0f64,
            lon in prop_oneof![
                (-1000.0f64..-180.1f64),
                (180.1f64..1000.0f64)
            ]
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_err());
        }

        #[test]
        fn parsing_formatted_floats_is_lossless(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let parsed = GeoLocation::parse(&lat.to_string(), &lon.to_string()).unwrap();
            prop_assert_eq!(parsed.latitude(), lat);
            prop_assert_eq!(parsed.longitude(), lon);
        }
    }
}

// ============================================================================
// BoundingBox Property Tests
// ============================================================================

mod bounding_box_tests {
    use super::*;

    proptest! {
        #[test]
        fn box_around_contains_its_center(
            lat in -89.0f64..=89.0f64,
            lon in -179.0f64..=179.0f64,
            radius in 0.0f64..500.0f64
        ) {
            let center = GeoLocation::new(lat, lon).unwrap();
            let bbox = BoundingBox::around(center, radius).unwrap();
            prop_assert!(bbox.contains(&center));
            prop_assert!(bbox.south() <= bbox.north());
            prop_assert!(bbox.west() <= bbox.east());
        }

        #[test]
        fn box_edges_always_valid(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64,
            radius in 0.0f64..5000.0f64
        ) {
            let center = GeoLocation::new(lat, lon).unwrap();
            let bbox = BoundingBox::around(center, radius).unwrap();
            prop_assert!(BoundingBox::new(bbox.south(), bbox.west(), bbox.north(), bbox.east()).is_ok());
        }
    }
}

// ============================================================================
// Route and POI Property Tests
// ============================================================================

mod route_tests {
    use super::*;

    proptest! {
        #[test]
        fn km_conversion_is_non_negative_and_close(meters in 0.0f64..10_000_000.0f64) {
            let km = meters_to_km(meters).unwrap();
            prop_assert!(km >= 0.0);
            prop_assert!((km - meters / 1000.0).abs() <= 0.005 + 1e-9);
        }

        #[test]
        fn km_conversion_is_deterministic(meters in 0.0f64..10_000_000.0f64) {
            let from = GeoLocation::new_unchecked(10.50, 76.20);
            let to = GeoLocation::new_unchecked(10.7867, 76.6548);
            let a = RouteResult::from_meters(from, to, vec![], meters).unwrap();
            let b = RouteResult::from_meters(from, to, vec![], meters).unwrap();
            prop_assert_eq!(a.total_distance_km, b.total_distance_km);
        }

        #[test]
        fn negative_meters_rejected(meters in -1_000_000.0f64..-0.001f64) {
            prop_assert!(meters_to_km(meters).is_err());
        }

        #[test]
        fn poi_name_never_empty(name in proptest::option::of("[ a-zA-Z]{0,12}")) {
            let loc = GeoLocation::new_unchecked(10.0, 76.0);
            let poi = PointOfInterest::named_or_default(loc, name.as_deref());
            prop_assert!(!poi.name.trim().is_empty());
        }
    }
}
