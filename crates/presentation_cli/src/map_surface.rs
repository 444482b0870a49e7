//! Terminal stand-in for the map's route control slot

use std::sync::atomic::{AtomicU64, Ordering};

use application::ports::{MapSurfacePort, RouteControlId};
use domain::value_objects::GeoLocation;
use parking_lot::Mutex;
use tracing::debug;

/// Tracks which route control is drawn on the (textual) map
#[derive(Debug, Default)]
pub struct TerminalMapSurface {
    next_id: AtomicU64,
    attached: Mutex<Vec<(RouteControlId, GeoLocation, GeoLocation)>>,
}

impl TerminalMapSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Endpoints of every control currently attached
    pub fn attached(&self) -> Vec<(GeoLocation, GeoLocation)> {
        self.attached
            .lock()
            .iter()
            .map(|(_, from, to)| (*from, *to))
            .collect()
    }
}

impl MapSurfacePort for TerminalMapSurface {
    fn attach_route_control(&self, from: &GeoLocation, to: &GeoLocation) -> RouteControlId {
        let id = RouteControlId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.attached.lock().push((id, *from, *to));
        debug!(%id, %from, %to, "Route control attached");
        id
    }

    fn detach_route_control(&self, id: RouteControlId) {
        self.attached.lock().retain(|(attached, _, _)| *attached != id);
        debug!(%id, "Route control detached");
    }
}
