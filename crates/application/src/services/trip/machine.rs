//! Trip state machine

use std::time::Duration;

use domain::entities::{CandidateLocation, PointOfInterest, RouteResult};
use domain::value_objects::{BoundingBox, GeoLocation};
use tracing::{debug, info, warn};

use super::config::TripConfig;
use super::generation::{RequestSequence, RequestToken};
use super::state::{NoticeKind, TripPhase, TripState, TripView};
use crate::error::{GeocodeError, LocationError, PoiFetchError, RouteError};

const LOCATION_NOTICE: &str = "Unable to fetch your location. Please enable location services.";
const PHASE_HISTORY_LIMIT: usize = 64;

/// Inputs to the trip state machine
///
/// User input and lifecycle events come from the display layer; the
/// `*Settled` and `DebounceElapsed` events are produced by the orchestrator
/// when a dispatched command completes.
#[derive(Debug, Clone, PartialEq)]
pub enum TripEvent {
    /// The session started
    Started,
    /// Origin acquisition finished
    OriginSettled(Result<GeoLocation, LocationError>),
    /// Fuel station fetch finished
    PoisSettled(Result<Vec<PointOfInterest>, PoiFetchError>),
    /// The search box text changed
    QueryEdited(String),
    /// A debounce timer fired
    DebounceElapsed(RequestToken),
    /// A search finished
    GeocodeSettled {
        /// Token the search was dispatched with
        token: RequestToken,
        /// Search outcome
        result: Result<Vec<CandidateLocation>, GeocodeError>,
    },
    /// The user picked the suggestion at this index
    SuggestionSelected(usize),
    /// A route computation finished
    RouteSettled {
        /// Token the computation was dispatched with
        token: RequestToken,
        /// Computation outcome
        result: Result<RouteResult, RouteError>,
    },
}

/// Work the orchestrator must start on behalf of the machine
#[derive(Debug, Clone, PartialEq)]
pub enum TripCommand {
    /// Acquire the device position once
    AcquireOrigin,
    /// Fetch fuel stations inside the region
    FetchPois {
        /// Region to query
        region: BoundingBox,
    },
    /// Wait, then report `DebounceElapsed(token)`
    StartDebounce {
        /// Token of the keystroke that started the timer
        token: RequestToken,
        /// How long to wait
        delay: Duration,
    },
    /// Search for destinations
    Geocode {
        /// Dispatch identity
        token: RequestToken,
        /// Trimmed query text
        query: String,
        /// Bias region, if the origin is known
        bias: Option<BoundingBox>,
    },
    /// Compute a route
    ComputeRoute {
        /// Dispatch identity
        token: RequestToken,
        /// Start
        from: GeoLocation,
        /// End
        to: GeoLocation,
        /// Ask for alternative routes
        alternatives: bool,
    },
}

/// The trip state machine, sole mutator of [`TripState`]
#[derive(Debug)]
pub struct TripMachine {
    config: TripConfig,
    state: TripState,
    phase: TripPhase,
    history: Vec<TripPhase>,
    started: bool,
    origin_resolved: bool,
    pois_settled: bool,
    geocode: RequestSequence,
    routing: RequestSequence,
}

impl TripMachine {
    /// Create an idle machine
    #[must_use]
    pub fn new(config: TripConfig) -> Self {
        let state = TripState::new(config.default_destination);
        Self {
            config,
            state,
            phase: TripPhase::Idle,
            history: vec![TripPhase::Idle],
            started: false,
            origin_resolved: false,
            pois_settled: false,
            geocode: RequestSequence::new(),
            routing: RequestSequence::new(),
        }
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> TripPhase {
        self.phase
    }

    /// Phases entered so far, oldest first (bounded)
    #[must_use]
    pub fn phase_history(&self) -> &[TripPhase] {
        &self.history
    }

    /// Read access to the trip state
    #[must_use]
    pub const fn state(&self) -> &TripState {
        &self.state
    }

    /// Configuration the machine runs with
    #[must_use]
    pub const fn config(&self) -> &TripConfig {
        &self.config
    }

    /// Snapshot for the display layer
    #[must_use]
    pub fn view(&self) -> TripView {
        self.state.view(self.phase, self.config.map_zoom)
    }

    /// Apply one event and return the commands to dispatch
    pub fn handle(&mut self, event: TripEvent) -> Vec<TripCommand> {
        let commands = match event {
            TripEvent::Started => self.on_started(),
            TripEvent::OriginSettled(result) => self.on_origin_settled(result),
            TripEvent::PoisSettled(result) => {
                self.on_pois_settled(result);
                Vec::new()
            },
            TripEvent::QueryEdited(text) => self.on_query_edited(text),
            TripEvent::DebounceElapsed(token) => self.on_debounce_elapsed(token),
            TripEvent::GeocodeSettled { token, result } => {
                self.on_geocode_settled(token, result);
                Vec::new()
            },
            TripEvent::SuggestionSelected(index) => self.on_suggestion_selected(index),
            TripEvent::RouteSettled { token, result } => {
                self.on_route_settled(token, result);
                Vec::new()
            },
        };

        self.state.loading = self.geocode.is_pending() || self.routing.is_pending();
        self.enter(self.resting_phase());
        commands
    }

    fn on_started(&mut self) -> Vec<TripCommand> {
        if self.started {
            warn!("Trip session already started");
            return Vec::new();
        }
        self.started = true;
        self.enter(TripPhase::AwaitingOrigin);

        let mut commands = vec![TripCommand::AcquireOrigin];
        if self.config.poi_overlay_enabled {
            commands.push(TripCommand::FetchPois {
                region: self.config.poi_region,
            });
        }
        commands
    }

    fn on_origin_settled(&mut self, result: Result<GeoLocation, LocationError>) -> Vec<TripCommand> {
        if self.origin_resolved {
            warn!("Ignoring repeated origin settlement");
            return Vec::new();
        }
        self.origin_resolved = true;

        match result {
            Ok(origin) => {
                info!(%origin, "Origin acquired");
                self.state.origin = Some(origin);
                self.state.bias_region =
                    match BoundingBox::around(origin, self.config.bias_radius_km) {
                        Ok(region) => Some(region),
                        Err(e) => {
                            warn!(error = %e, "Could not derive bias region");
                            None
                        },
                    };
                self.state.clear_notice(NoticeKind::Location);
                self.enter(TripPhase::Ready);
                self.dispatch_route().into_iter().collect()
            },
            Err(e) => {
                warn!(error = %e, "Origin acquisition failed");
                self.state.raise(NoticeKind::Location, LOCATION_NOTICE);
                Vec::new()
            },
        }
    }

    fn on_pois_settled(&mut self, result: Result<Vec<PointOfInterest>, PoiFetchError>) {
        if self.pois_settled {
            warn!("Ignoring repeated fuel station settlement");
            return;
        }
        self.pois_settled = true;

        match result {
            Ok(pois) => {
                debug!(count = pois.len(), "Fuel stations loaded");
                self.state.points_of_interest = pois;
            },
            Err(e) => {
                warn!(error = %e, "Fuel station fetch failed");
                self.state.points_of_interest.clear();
                self.state
                    .raise(NoticeKind::PoiFetch, "Fuel stations could not be loaded.");
            },
        }
    }

    fn on_query_edited(&mut self, text: String) -> Vec<TripCommand> {
        let query = text.trim().to_string();
        self.state.search_query = text;

        if query.is_empty() {
            self.geocode.invalidate();
            self.state.suggestions.clear();
            return Vec::new();
        }

        let token = self.geocode.issue();
        let delay = self.config.search_debounce();
        if delay.is_zero() {
            vec![self.geocode_command(token, query)]
        } else {
            debug!(%token, ?delay, "Debouncing search");
            vec![TripCommand::StartDebounce { token, delay }]
        }
    }

    fn on_debounce_elapsed(&mut self, token: RequestToken) -> Vec<TripCommand> {
        if !self.geocode.is_current(token) || !self.geocode.is_pending() {
            debug!(%token, current = %self.geocode.current(), "Debounce superseded");
            return Vec::new();
        }
        let query = self.state.search_query.trim().to_string();
        vec![self.geocode_command(token, query)]
    }

    fn on_geocode_settled(
        &mut self,
        token: RequestToken,
        result: Result<Vec<CandidateLocation>, GeocodeError>,
    ) {
        if !self.geocode.settle(token) {
            debug!(%token, current = %self.geocode.current(), "Discarding stale search response");
            return;
        }

        match result {
            Ok(suggestions) => {
                debug!(%token, count = suggestions.len(), "Search settled");
                self.state.suggestions = suggestions;
                self.state.clear_notice(NoticeKind::Geocode);
            },
            Err(e) => {
                warn!(%token, error = %e, "Search failed");
                self.state.suggestions.clear();
                self.state
                    .raise(NoticeKind::Geocode, "Destination search is unavailable right now.");
            },
        }
    }

    fn on_suggestion_selected(&mut self, index: usize) -> Vec<TripCommand> {
        let Some(candidate) = self.state.suggestions.get(index).cloned() else {
            warn!(index, available = self.state.suggestions.len(), "No such suggestion");
            return Vec::new();
        };

        info!(destination = %candidate.location, name = %candidate.display_name, "Destination selected");
        self.state.destination = candidate.location;
        self.state.search_query = candidate.display_name;
        self.state.suggestions.clear();
        self.geocode.invalidate();
        if self
            .state
            .route
            .as_ref()
            .is_some_and(|route| route.to != candidate.location)
        {
            self.state.route = None;
        }

        self.dispatch_route().into_iter().collect()
    }

    fn on_route_settled(&mut self, token: RequestToken, result: Result<RouteResult, RouteError>) {
        if !self.routing.settle(token) {
            debug!(%token, current = %self.routing.current(), "Discarding stale route response");
            return;
        }

        match result {
            Ok(route) => {
                let matches_endpoints = self
                    .state
                    .origin
                    .is_some_and(|origin| route.connects(&origin, &self.state.destination));
                if !matches_endpoints {
                    warn!(%token, "Route endpoints do not match the trip, ignoring");
                    return;
                }
                info!(%token, distance = %route.distance_label(), "Route computed");
                self.state.route = Some(route);
                self.state.clear_notice(NoticeKind::Route);
            },
            Err(e) => {
                warn!(%token, error = %e, "Route computation failed");
                self.state
                    .raise(NoticeKind::Route, format!("Could not compute a route: {e}"));
            },
        }
    }

    fn geocode_command(&self, token: RequestToken, query: String) -> TripCommand {
        TripCommand::Geocode {
            token,
            query,
            bias: self.state.bias_region,
        }
    }

    fn dispatch_route(&mut self) -> Option<TripCommand> {
        let from = self.state.origin?;
        let to = self.state.destination;
        let token = self.routing.issue();
        debug!(%token, %from, %to, "Dispatching route computation");
        self.enter(TripPhase::RouteComputing);
        Some(TripCommand::ComputeRoute {
            token,
            from,
            to,
            alternatives: self.config.enable_alternative_routes,
        })
    }

    fn search_active(&self) -> bool {
        !self.state.search_query.trim().is_empty()
            && (self.geocode.is_pending() || !self.state.suggestions.is_empty())
    }

    fn resting_phase(&self) -> TripPhase {
        if !self.started {
            TripPhase::Idle
        } else if !self.origin_resolved {
            TripPhase::AwaitingOrigin
        } else if self.search_active() {
            TripPhase::Searching
        } else if self.routing.is_pending() {
            TripPhase::RouteComputing
        } else {
            TripPhase::Ready
        }
    }

    fn enter(&mut self, phase: TripPhase) {
        if self.phase == phase {
            return;
        }
        debug!(from = %self.phase, to = %phase, "Trip phase change");
        self.phase = phase;
        if self.history.len() == PHASE_HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(phase);
    }
}
