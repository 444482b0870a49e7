//! The single route control attached to the map surface

use std::fmt;
use std::sync::Arc;

use domain::value_objects::GeoLocation;
use tracing::debug;

use crate::ports::{MapSurfacePort, RouteControlId};

/// A route control attached to a map surface, detached when dropped
///
/// The orchestrator keeps at most one of these alive; replacing it drops the
/// previous control before the next one is attached.
pub struct RouteControl {
    surface: Arc<dyn MapSurfacePort>,
    id: RouteControlId,
    from: GeoLocation,
    to: GeoLocation,
}

impl RouteControl {
    /// Attach a new route control to `surface`
    pub fn acquire(surface: Arc<dyn MapSurfacePort>, from: GeoLocation, to: GeoLocation) -> Self {
        let id = surface.attach_route_control(&from, &to);
        debug!(%id, %from, %to, "Attached route control");
        Self {
            surface,
            id,
            from,
            to,
        }
    }

    /// Identifier assigned by the surface
    #[must_use]
    pub const fn id(&self) -> RouteControlId {
        self.id
    }

    /// Start and end waypoints
    #[must_use]
    pub const fn waypoints(&self) -> (GeoLocation, GeoLocation) {
        (self.from, self.to)
    }
}

impl Drop for RouteControl {
    fn drop(&mut self) {
        debug!(id = %self.id, "Detaching route control");
        self.surface.detach_route_control(self.id);
    }
}

impl fmt::Debug for RouteControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteControl")
            .field("id", &self.id)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}
