//! Geographic bounding box value object

use serde::{Deserialize, Serialize};
use std::fmt;

use super::geo_location::{EARTH_RADIUS_KM, GeoLocation};
use crate::errors::DomainError;

/// An axis-aligned latitude/longitude rectangle
///
/// Edges are inclusive. A box never crosses the antimeridian: `west <= east`
/// and `south <= north` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

impl BoundingBox {
    /// Create a new bounding box with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBoundingBox` if an edge is out of range,
    /// not finite, or the box is inverted.
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self, DomainError> {
        let corners_valid =
            GeoLocation::new(south, west).is_ok() && GeoLocation::new(north, east).is_ok();
        if !corners_valid {
            return Err(DomainError::InvalidBoundingBox(format!(
                "edges out of range: {south},{west},{north},{east}"
            )));
        }
        if south > north {
            return Err(DomainError::InvalidBoundingBox(format!(
                "south {south} is above north {north}"
            )));
        }
        if west > east {
            return Err(DomainError::InvalidBoundingBox(format!(
                "west {west} is east of {east}"
            )));
        }
        Ok(Self {
            south,
            west,
            north,
            east,
        })
    }

    /// Box of `radius_km` around `center`, clamped to the valid coordinate ranges
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDistance` if the radius is negative or not finite.
    pub fn around(center: GeoLocation, radius_km: f64) -> Result<Self, DomainError> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(DomainError::InvalidDistance(radius_km));
        }

        let km_per_degree = EARTH_RADIUS_KM.to_radians();
        let delta_lat = radius_km / km_per_degree;
        // Near the poles a degree of longitude shrinks to nothing; cover all of it.
        let cos_lat = center.latitude().to_radians().cos();
        let delta_lon = if cos_lat < 1e-6 {
            180.0
        } else {
            (radius_km / (km_per_degree * cos_lat)).min(180.0)
        };

        Ok(Self {
            south: (center.latitude() - delta_lat).max(-90.0),
            west: (center.longitude() - delta_lon).max(-180.0),
            north: (center.latitude() + delta_lat).min(90.0),
            east: (center.longitude() + delta_lon).min(180.0),
        })
    }

    /// The fixed region fuel stations are fetched for (Kerala, India)
    #[must_use]
    pub const fn kerala() -> Self {
        Self {
            south: 8.0883,
            west: 74.5236,
            north: 12.8185,
            east: 77.5857,
        }
    }

    /// Southern edge (minimum latitude)
    #[must_use]
    pub const fn south(&self) -> f64 {
        self.south
    }

    /// Western edge (minimum longitude)
    #[must_use]
    pub const fn west(&self) -> f64 {
        self.west
    }

    /// Northern edge (maximum latitude)
    #[must_use]
    pub const fn north(&self) -> f64 {
        self.north
    }

    /// Eastern edge (maximum longitude)
    #[must_use]
    pub const fn east(&self) -> f64 {
        self.east
    }

    /// Whether the box encloses a non-zero area
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.south >= self.north || self.west >= self.east
    }

    /// Check whether a location lies inside the box (edges inclusive)
    #[must_use]
    pub fn contains(&self, location: &GeoLocation) -> bool {
        (self.south..=self.north).contains(&location.latitude())
            && (self.west..=self.east).contains(&location.longitude())
    }

    /// Geocoder `viewbox` format: `minLon,minLat,maxLon,maxLat`
    #[must_use]
    pub fn to_viewbox(&self) -> String {
        format!("{},{},{},{}", self.west, self.south, self.east, self.north)
    }

    /// Overpass QL bbox format: `south,west,north,east`
    #[must_use]
    pub fn to_overpass_bbox(&self) -> String {
        format!("{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.4}, {:.4}] - [{:.4}, {:.4}]",
            self.south, self.west, self.north, self.east
        )
    }
}
