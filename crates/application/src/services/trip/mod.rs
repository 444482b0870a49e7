//! Trip orchestration
//!
//! Reconciles the four independently failing data sources (device location,
//! destination search, route computation, fuel stations) into one consistent
//! [`TripState`].
//!
//! The work is split in two:
//!
//! - [`TripMachine`] is a synchronous state machine. It is the only code that
//!   mutates trip state. Each [`TripEvent`] it handles yields the
//!   [`TripCommand`]s to dispatch next. Every search and route dispatch carries
//!   a [`RequestToken`]; a settlement whose token is no longer the newest for
//!   its operation class is dropped.
//! - [`TripOrchestrator`] executes those commands against the ports, feeds
//!   their settlements back into the machine, owns the active
//!   [`RouteControl`] and publishes a [`TripView`] after every event.

mod config;
mod generation;
mod machine;
mod orchestrator;
mod route_control;
mod state;

pub use config::TripConfig;
pub use generation::{RequestSequence, RequestToken};
pub use machine::{TripCommand, TripEvent, TripMachine};
pub use orchestrator::{TripHandle, TripOrchestrator, TripPorts};
pub use route_control::RouteControl;
pub use state::{MapViewport, Notice, NoticeKind, TripPhase, TripState, TripView};
