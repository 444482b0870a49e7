//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range, or not finite
    #[error(
        "Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180"
    )]
    InvalidCoordinates {
        /// Offending latitude
        latitude: f64,
        /// Offending longitude
        longitude: f64,
    },

    /// Bounding box edges out of range or inverted
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// Route distance negative or not finite
    #[error("Invalid distance: {0}")]
    InvalidDistance(f64),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid coordinates error
    #[must_use]
    pub const fn invalid_coordinates(latitude: f64, longitude: f64) -> Self {
        Self::InvalidCoordinates {
            latitude,
            longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_coordinates_message_contains_values() {
        let err = DomainError::invalid_coordinates(91.0, 10.0);
        let msg = err.to_string();
        assert!(msg.contains("91"));
        assert!(msg.contains("-90 to 90"));
    }

    #[test]
    fn invalid_bounding_box_message() {
        let err = DomainError::InvalidBoundingBox("south > north".to_string());
        assert_eq!(err.to_string(), "Invalid bounding box: south > north");
    }

    #[test]
    fn invalid_distance_message() {
        let err = DomainError::InvalidDistance(-1.0);
        assert_eq!(err.to_string(), "Invalid distance: -1");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("field is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: field is required");
    }
}
