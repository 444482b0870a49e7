//! Map surface port
//!
//! The map surface is the display layer's drawing area. The orchestrator only
//! needs it to attach and detach the single active route control.

use std::fmt;

use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

/// Identifier of a route control attached to a map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteControlId(pub u64);

impl fmt::Display for RouteControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route-control-{}", self.0)
    }
}

/// Port for the map display surface
#[cfg_attr(test, automock)]
pub trait MapSurfacePort: Send + Sync {
    /// Attach a route control with the given waypoints
    fn attach_route_control(&self, from: &GeoLocation, to: &GeoLocation) -> RouteControlId;

    /// Remove a previously attached route control
    fn detach_route_control(&self, id: RouteControlId);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn MapSurfacePort) {}

    #[test]
    fn control_id_display() {
        assert_eq!(RouteControlId(7).to_string(), "route-control-7");
    }
}
