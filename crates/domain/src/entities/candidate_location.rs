//! Geocoder search hits

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::GeoLocation;

/// A destination candidate returned by a geocoding search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateLocation {
    /// Where the candidate lies
    pub location: GeoLocation,
    /// Human-readable label shown in the suggestion list
    pub display_name: String,
}

impl CandidateLocation {
    /// Create a new candidate
    ///
    /// A blank display name is replaced by the formatted coordinate so the
    /// suggestion list never shows an empty row.
    #[must_use]
    pub fn new(location: GeoLocation, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        let display_name = if display_name.trim().is_empty() {
            location.to_string()
        } else {
            display_name
        };
        Self {
            location,
            display_name,
        }
    }
}

impl fmt::Display for CandidateLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}
