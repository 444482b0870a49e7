//! Points of interest shown on the map overlay

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// Label used when a fuel station record carries no name
pub const DEFAULT_POI_NAME: &str = "Unknown Fuel Station";

/// A point of interest (here: a fuel station)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    /// Position of the station
    pub location: GeoLocation,
    /// Station name, never empty
    pub name: String,
}

impl PointOfInterest {
    /// Create a point of interest, substituting `placeholder` for a missing or blank name
    ///
    /// If `placeholder` is blank too, [`DEFAULT_POI_NAME`] is used.
    #[must_use]
    pub fn new(location: GeoLocation, name: Option<&str>, placeholder: &str) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .or_else(|| Some(placeholder.trim()).filter(|p| !p.is_empty()))
            .unwrap_or(DEFAULT_POI_NAME)
            .to_string();
        Self { location, name }
    }

    /// Create a point of interest with the default placeholder
    #[must_use]
    pub fn named_or_default(location: GeoLocation, name: Option<&str>) -> Self {
        Self::new(location, name, DEFAULT_POI_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> GeoLocation {
        GeoLocation::new_unchecked(10.0, 76.3)
    }

    #[test]
    fn keeps_given_name() {
        let poi = PointOfInterest::named_or_default(loc(), Some("Indian Oil"));
        assert_eq!(poi.name, "Indian Oil");
    }

    #[test]
    fn missing_name_uses_placeholder() {
        let poi = PointOfInterest::named_or_default(loc(), None);
        assert_eq!(poi.name, DEFAULT_POI_NAME);
    }

    #[test]
    fn blank_name_uses_placeholder() {
        let poi = PointOfInterest::new(loc(), Some("  "), "Fuel");
        assert_eq!(poi.name, "Fuel");
    }

    #[test]
    fn blank_placeholder_never_yields_empty_name() {
        let poi = PointOfInterest::new(loc(), None, "");
        assert_eq!(poi.name, DEFAULT_POI_NAME);
    }
}
