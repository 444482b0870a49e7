//! Async runtime around [`TripMachine`]

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

use super::config::TripConfig;
use super::machine::{TripCommand, TripEvent, TripMachine};
use super::route_control::RouteControl;
use super::state::TripView;
use crate::error::{ApplicationError, GeocodeError, LocationError, PoiFetchError, RouteError};
use crate::ports::{
    GeocodingPort, LocationPort, MapSurfacePort, PoiPort, RouteRequest, RoutingPort,
};

/// The external systems a trip session talks to
#[derive(Clone)]
pub struct TripPorts {
    /// Device position
    pub location: Arc<dyn LocationPort>,
    /// Destination search
    pub geocoding: Arc<dyn GeocodingPort>,
    /// Fuel stations
    pub pois: Arc<dyn PoiPort>,
    /// Route engine
    pub routing: Arc<dyn RoutingPort>,
    /// Map display surface, if the display layer has one
    pub map_surface: Option<Arc<dyn MapSurfacePort>>,
}

impl std::fmt::Debug for TripPorts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripPorts")
            .field("map_surface", &self.map_surface.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
enum UserInput {
    EditQuery(String),
    SelectSuggestion(usize),
}

/// Input side of a trip session for the display layer
#[derive(Debug, Clone)]
pub struct TripHandle {
    tx: mpsc::UnboundedSender<UserInput>,
}

impl TripHandle {
    /// Replace the search box text
    pub fn edit_query(&self, text: impl Into<String>) -> Result<(), ApplicationError> {
        self.send(UserInput::EditQuery(text.into()))
    }

    /// Pick the suggestion at `index` as destination
    pub fn select_suggestion(&self, index: usize) -> Result<(), ApplicationError> {
        self.send(UserInput::SelectSuggestion(index))
    }

    fn send(&self, input: UserInput) -> Result<(), ApplicationError> {
        self.tx
            .send(input)
            .map_err(|_| ApplicationError::SessionClosed)
    }
}

/// Executes trip commands against the ports and feeds results back
///
/// Port calls run as spawned tasks; their results come back over a channel
/// and are applied one at a time, so the machine never sees concurrent
/// mutation. A task that panics still settles, as a failure of its operation
/// class. A fresh [`TripView`] is published after every event.
pub struct TripOrchestrator {
    machine: TripMachine,
    ports: TripPorts,
    route_control: Option<RouteControl>,
    in_flight: usize,
    settled_tx: mpsc::UnboundedSender<TripEvent>,
    settled_rx: mpsc::UnboundedReceiver<TripEvent>,
    input_tx: mpsc::UnboundedSender<UserInput>,
    input_rx: mpsc::UnboundedReceiver<UserInput>,
    view_tx: watch::Sender<TripView>,
}

impl std::fmt::Debug for TripOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripOrchestrator")
            .field("phase", &self.machine.phase())
            .field("in_flight", &self.in_flight)
            .field("route_control", &self.route_control)
            .finish_non_exhaustive()
    }
}

impl TripOrchestrator {
    /// Create an orchestrator in the idle phase
    pub fn new(config: TripConfig, ports: TripPorts) -> Self {
        let machine = TripMachine::new(config);
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (view_tx, _) = watch::channel(machine.view());
        Self {
            machine,
            ports,
            route_control: None,
            in_flight: 0,
            settled_tx,
            settled_rx,
            input_tx,
            input_rx,
            view_tx,
        }
    }

    /// A handle for feeding user input
    pub fn handle(&self) -> TripHandle {
        TripHandle {
            tx: self.input_tx.clone(),
        }
    }

    /// Receive a [`TripView`] after every event
    pub fn subscribe(&self) -> watch::Receiver<TripView> {
        self.view_tx.subscribe()
    }

    /// Current snapshot
    pub fn view(&self) -> TripView {
        self.machine.view()
    }

    /// The underlying state machine
    pub const fn machine(&self) -> &TripMachine {
        &self.machine
    }

    /// The route control currently attached to the map surface
    pub const fn route_control(&self) -> Option<&RouteControl> {
        self.route_control.as_ref()
    }

    /// Number of dispatched operations that have not settled yet
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start the session: acquire the origin and fetch fuel stations
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        info!("Starting trip session");
        self.dispatch(TripEvent::Started);
    }

    /// Apply one event and execute the commands it yields
    pub fn dispatch(&mut self, event: TripEvent) {
        for command in self.machine.handle(event) {
            self.execute(command);
        }
        self.view_tx.send_replace(self.machine.view());
    }

    /// Wait for the next settlement and apply it
    ///
    /// Returns `false` without waiting when nothing is in flight.
    pub async fn step(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.settled_rx.recv().await {
            Some(event) => {
                self.in_flight -= 1;
                self.dispatch(event);
                true
            },
            None => false,
        }
    }

    /// Apply queued user input and settlements until nothing is in flight
    pub async fn run_until_idle(&mut self) {
        loop {
            self.drain_input();
            if !self.step().await {
                break;
            }
        }
    }

    /// Run until every [`TripHandle`] is dropped and nothing is in flight
    pub async fn run(mut self) {
        // Only handles given out so far keep the input side open
        let (detached, _) = mpsc::unbounded_channel();
        drop(std::mem::replace(&mut self.input_tx, detached));

        let mut input_open = true;
        while input_open || self.in_flight > 0 {
            tokio::select! {
                input = self.input_rx.recv(), if input_open => match input {
                    Some(input) => self.apply_input(input),
                    None => {
                        debug!("All trip handles dropped");
                        input_open = false;
                    },
                },
                Some(event) = self.settled_rx.recv(), if self.in_flight > 0 => {
                    self.in_flight -= 1;
                    self.dispatch(event);
                },
                else => break,
            }
        }
        info!(phase = %self.machine.phase(), "Trip session finished");
    }

    fn drain_input(&mut self) {
        while let Ok(input) = self.input_rx.try_recv() {
            self.apply_input(input);
        }
    }

    fn apply_input(&mut self, input: UserInput) {
        let event = match input {
            UserInput::EditQuery(text) => TripEvent::QueryEdited(text),
            UserInput::SelectSuggestion(index) => TripEvent::SuggestionSelected(index),
        };
        self.dispatch(event);
    }

    fn execute(&mut self, command: TripCommand) {
        match command {
            TripCommand::AcquireOrigin => {
                let port = Arc::clone(&self.ports.location);
                self.spawn(
                    async move { TripEvent::OriginSettled(port.acquire().await) },
                    |reason| {
                        TripEvent::OriginSettled(Err(LocationError::PositionUnavailable(reason)))
                    },
                );
            },
            TripCommand::FetchPois { region } => {
                let port = Arc::clone(&self.ports.pois);
                self.spawn(
                    async move { TripEvent::PoisSettled(port.fetch_fuel_stations(&region).await) },
                    |reason| TripEvent::PoisSettled(Err(PoiFetchError::Network(reason))),
                );
            },
            TripCommand::StartDebounce { token, delay } => {
                self.spawn(
                    async move {
                        tokio::time::sleep(delay).await;
                        TripEvent::DebounceElapsed(token)
                    },
                    move |_| TripEvent::DebounceElapsed(token),
                );
            },
            TripCommand::Geocode { token, query, bias } => {
                debug!(%token, %query, "Dispatching search");
                let port = Arc::clone(&self.ports.geocoding);
                self.spawn(
                    async move {
                        let result = port.search(&query, bias).await;
                        TripEvent::GeocodeSettled { token, result }
                    },
                    move |reason| TripEvent::GeocodeSettled {
                        token,
                        result: Err(GeocodeError::Network(reason)),
                    },
                );
            },
            TripCommand::ComputeRoute {
                token,
                from,
                to,
                alternatives,
            } => {
                self.route_control = None;
                if let Some(surface) = &self.ports.map_surface {
                    self.route_control = Some(RouteControl::acquire(Arc::clone(surface), from, to));
                }
                let port = Arc::clone(&self.ports.routing);
                let request = RouteRequest::new(from, to).with_alternatives(alternatives);
                self.spawn(
                    async move {
                        let result = port.compute_route(&request).await;
                        TripEvent::RouteSettled { token, result }
                    },
                    move |reason| TripEvent::RouteSettled {
                        token,
                        result: Err(RouteError::Network(reason)),
                    },
                );
            },
        }
    }

    /// Run `task` and deliver its event; `on_abort` builds the event when the
    /// task panics or is cancelled, so every dispatch settles exactly once
    fn spawn<F, A>(&mut self, task: F, on_abort: A)
    where
        F: Future<Output = TripEvent> + Send + 'static,
        A: FnOnce(String) -> TripEvent + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.settled_tx.clone();
        let worker = tokio::spawn(task);
        tokio::spawn(async move {
            let event = match worker.await {
                Ok(event) => event,
                Err(e) => {
                    warn!(error = %e, "Trip task aborted");
                    on_abort(format!("task aborted: {e}"))
                },
            };
            if tx.send(event).is_err() {
                debug!("Trip session gone, dropping settlement");
            }
        });
    }
}
