//! Application services

pub mod trip;
pub mod trip_formatter;

pub use trip::{
    MapViewport, Notice, NoticeKind, RequestSequence, RequestToken, RouteControl, TripCommand,
    TripConfig, TripEvent, TripHandle, TripMachine, TripOrchestrator, TripPhase, TripPorts,
    TripState, TripView,
};
pub use trip_formatter::{ORIGIN_MARKER, format_distance, format_view, map_link};
