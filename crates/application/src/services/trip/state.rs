//! Trip state and its read-only view

use std::fmt;

use domain::entities::{CandidateLocation, PointOfInterest, RouteResult};
use domain::value_objects::{BoundingBox, GeoLocation};
use serde::{Deserialize, Serialize};

/// Phases of a trip planning session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripPhase {
    /// Session not started
    Idle,
    /// Waiting for the device position
    AwaitingOrigin,
    /// Nothing in flight
    Ready,
    /// The user is typing and suggestions are pending or shown
    Searching,
    /// A route computation is in flight
    RouteComputing,
}

impl TripPhase {
    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingOrigin => "awaiting origin",
            Self::Ready => "ready",
            Self::Searching => "searching",
            Self::RouteComputing => "computing route",
        }
    }
}

impl fmt::Display for TripPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which data source a notice is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Origin could not be acquired
    Location,
    /// Destination search failed
    Geocode,
    /// Route computation failed
    Route,
    /// Fuel stations could not be fetched
    PoiFetch,
}

/// A user-visible message about a recovered failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Source of the failure
    pub kind: NoticeKind,
    /// Text shown to the user
    pub message: String,
}

/// Where the map is centered once it can be shown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapViewport {
    /// Map center
    pub center: GeoLocation,
    /// Zoom level
    pub zoom: u8,
}

/// The orchestrator-owned trip aggregate
///
/// Only [`TripMachine`](super::TripMachine) mutates it; everything else reads
/// it through accessors or a [`TripView`] snapshot.
#[derive(Debug, Clone)]
pub struct TripState {
    pub(super) origin: Option<GeoLocation>,
    pub(super) destination: GeoLocation,
    pub(super) search_query: String,
    pub(super) suggestions: Vec<CandidateLocation>,
    pub(super) bias_region: Option<BoundingBox>,
    pub(super) route: Option<RouteResult>,
    pub(super) points_of_interest: Vec<PointOfInterest>,
    pub(super) loading: bool,
    pub(super) notices: Vec<Notice>,
}

impl TripState {
    pub(super) const fn new(default_destination: GeoLocation) -> Self {
        Self {
            origin: None,
            destination: default_destination,
            search_query: String::new(),
            suggestions: Vec::new(),
            bias_region: None,
            route: None,
            points_of_interest: Vec::new(),
            loading: false,
            notices: Vec::new(),
        }
    }

    /// The user's position, once acquired
    #[must_use]
    pub const fn origin(&self) -> Option<GeoLocation> {
        self.origin
    }

    /// The current destination
    #[must_use]
    pub const fn destination(&self) -> GeoLocation {
        self.destination
    }

    /// Text in the search box
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Suggestions from the newest completed search
    #[must_use]
    pub fn suggestions(&self) -> &[CandidateLocation] {
        &self.suggestions
    }

    /// Region searches are bounded to
    #[must_use]
    pub const fn bias_region(&self) -> Option<BoundingBox> {
        self.bias_region
    }

    /// Last successfully computed route
    #[must_use]
    pub const fn route(&self) -> Option<&RouteResult> {
        self.route.as_ref()
    }

    /// Fuel stations fetched at startup
    #[must_use]
    pub fn points_of_interest(&self) -> &[PointOfInterest] {
        &self.points_of_interest
    }

    /// Whether a search or route request is still unresolved
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Active notices, at most one per kind
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Notice of the given kind, if raised
    #[must_use]
    pub fn notice(&self, kind: NoticeKind) -> Option<&Notice> {
        self.notices.iter().find(|n| n.kind == kind)
    }

    /// Route to display: only one whose endpoints match the current origin and destination
    #[must_use]
    pub fn displayable_route(&self) -> Option<&RouteResult> {
        let origin = self.origin?;
        self.route
            .as_ref()
            .filter(|route| route.connects(&origin, &self.destination))
    }

    pub(super) fn raise(&mut self, kind: NoticeKind, message: impl Into<String>) {
        let notice = Notice {
            kind,
            message: message.into(),
        };
        match self.notices.iter_mut().find(|n| n.kind == kind) {
            Some(existing) => *existing = notice,
            None => self.notices.push(notice),
        }
    }

    pub(super) fn clear_notice(&mut self, kind: NoticeKind) {
        self.notices.retain(|n| n.kind != kind);
    }

    /// Snapshot for the display layer
    #[must_use]
    pub fn view(&self, phase: TripPhase, map_zoom: u8) -> TripView {
        let route = self.displayable_route().cloned();
        TripView {
            phase,
            origin: self.origin,
            destination: self.destination,
            search_query: self.search_query.clone(),
            suggestions: self.suggestions.clone(),
            bias_region: self.bias_region,
            distance_label: route.as_ref().map(RouteResult::distance_label),
            route,
            points_of_interest: self.points_of_interest.clone(),
            loading: self.loading,
            notices: self.notices.clone(),
            map: self.origin.map(|center| MapViewport {
                center,
                zoom: map_zoom,
            }),
        }
    }
}

/// Read-only snapshot of a trip, published after every event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripView {
    /// Current phase
    pub phase: TripPhase,
    /// The user's position
    pub origin: Option<GeoLocation>,
    /// Current destination
    pub destination: GeoLocation,
    /// Search box contents
    pub search_query: String,
    /// Suggestion list
    pub suggestions: Vec<CandidateLocation>,
    /// Search bias region
    pub bias_region: Option<BoundingBox>,
    /// Route matching the current endpoints
    pub route: Option<RouteResult>,
    /// Total distance label such as `"42.17 km"`
    pub distance_label: Option<String>,
    /// Fuel stations
    pub points_of_interest: Vec<PointOfInterest>,
    /// A search or route request is unresolved
    pub loading: bool,
    /// Notices to show as banners
    pub notices: Vec<Notice>,
    /// Map placement; `None` until the origin is known
    pub map: Option<MapViewport>,
}

impl TripView {
    /// Whether the map can be rendered
    #[must_use]
    pub const fn map_visible(&self) -> bool {
        self.map.is_some()
    }
}
