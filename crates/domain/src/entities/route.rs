//! Computed routes

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::GeoLocation;

/// Convert a routing engine distance in meters to kilometers rounded to two decimals
///
/// # Errors
///
/// Returns `DomainError::InvalidDistance` if `meters` is negative or not finite.
pub fn meters_to_km(meters: f64) -> Result<f64, DomainError> {
    if !meters.is_finite() || meters < 0.0 {
        return Err(DomainError::InvalidDistance(meters));
    }
    // Whole meters divide exactly into tens, so half-way values round up
    Ok((meters / 10.0).round() / 100.0)
}

/// An additional route the engine proposed besides the primary one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAlternative {
    /// Ordered path of the alternative
    pub geometry: Vec<GeoLocation>,
    /// Total length in kilometers, two decimals
    pub total_distance_km: f64,
}

/// The result of a route computation between two endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Requested start of the route
    pub from: GeoLocation,
    /// Requested end of the route
    pub to: GeoLocation,
    /// Ordered path of the primary route
    pub geometry: Vec<GeoLocation>,
    /// Total length of the primary route in kilometers, two decimals
    pub total_distance_km: f64,
    /// Alternatives, empty unless requested
    #[serde(default)]
    pub alternatives: Vec<RouteAlternative>,
}

impl RouteResult {
    /// Create a route result from an engine distance in meters
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDistance` if the distance is negative or not finite.
    pub fn from_meters(
        from: GeoLocation,
        to: GeoLocation,
        geometry: Vec<GeoLocation>,
        distance_meters: f64,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            from,
            to,
            geometry,
            total_distance_km: meters_to_km(distance_meters)?,
            alternatives: Vec::new(),
        })
    }

    /// Attach alternative routes
    #[must_use]
    pub fn with_alternatives(mut self, alternatives: Vec<RouteAlternative>) -> Self {
        self.alternatives = alternatives;
        self
    }

    /// Whether this route was computed for exactly these endpoints
    #[must_use]
    pub fn connects(&self, from: &GeoLocation, to: &GeoLocation) -> bool {
        self.from == *from && self.to == *to
    }

    /// Display label for the total distance, e.g. `"42.17 km"`
    #[must_use]
    pub fn distance_label(&self) -> String {
        format!("{:.2} km", self.total_distance_km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> (GeoLocation, GeoLocation) {
        (
            GeoLocation::new_unchecked(10.50, 76.20),
            GeoLocation::new_unchecked(10.7867, 76.6548),
        )
    }

    #[test]
    fn meters_are_rounded_to_two_decimals() {
        assert_eq!(meters_to_km(42_170.0).unwrap(), 42.17);
        assert_eq!(meters_to_km(42_174.9).unwrap(), 42.17);
        assert_eq!(meters_to_km(42_176.0).unwrap(), 42.18);
        assert_eq!(meters_to_km(0.0).unwrap(), 0.0);
        assert_eq!(meters_to_km(1005.0).unwrap(), 1.01);
        assert_eq!(meters_to_km(145.0).unwrap(), 0.15);
    }

    #[test]
    fn invalid_meters_rejected() {
        assert!(meters_to_km(-1.0).is_err());
        assert!(meters_to_km(f64::NAN).is_err());
        assert!(meters_to_km(f64::INFINITY).is_err());
    }

    #[test]
    fn distance_label_has_two_decimals() {
        let (from, to) = endpoints();
        let route = RouteResult::from_meters(from, to, vec![from, to], 42_170.0).unwrap();
        assert_eq!(route.distance_label(), "42.17 km");

        let route = RouteResult::from_meters(from, to, vec![from, to], 5_000.0).unwrap();
        assert_eq!(route.distance_label(), "5.00 km");
    }

    #[test]
    fn connects_checks_both_endpoints() {
        let (from, to) = endpoints();
        let route = RouteResult::from_meters(from, to, vec![], 1.0).unwrap();
        assert!(route.connects(&from, &to));
        assert!(!route.connects(&to, &from));
    }

    #[test]
    fn alternatives_default_empty() {
        let (from, to) = endpoints();
        let route = RouteResult::from_meters(from, to, vec![], 1.0).unwrap();
        assert!(route.alternatives.is_empty());

        let route = route.with_alternatives(vec![RouteAlternative {
            geometry: vec![from, to],
            total_distance_km: 50.0,
        }]);
        assert_eq!(route.alternatives.len(), 1);
    }
}
