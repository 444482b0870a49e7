//! FuelRoute CLI
//!
//! Plans a road trip from the current position, searches destinations and
//! lists fuel stations using OpenStreetMap services.

#![allow(clippy::print_stdout)]

mod map_surface;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use application::ports::{GeocodingPort, MapSurfacePort, PoiPort, RouteRequest, RoutingPort};
use application::services::{TripOrchestrator, TripView, format_distance, format_view};
use clap::{Parser, Subcommand};
use domain::value_objects::{BoundingBox, GeoLocation};
use infrastructure::{
    AppConfig, GeocodingAdapter, LogFormat, PoiAdapter, RoutingAdapter, build_trip_ports,
    init_logging,
};
use tracing::{info, warn};

use crate::map_surface::TerminalMapSurface;

/// FuelRoute CLI
#[derive(Parser)]
#[command(name = "fuelroute")]
#[command(author, version, about = "Road trip planner with fuel stations", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./fuelroute.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a trip from your position
    ///
    /// Without --to the route goes to the configured default destination.
    /// Example: fuelroute plan --to "Kochi" --origin 10.50,76.20
    Plan {
        /// Destination search text
        #[arg(short, long)]
        to: Option<String>,

        /// Which suggestion to pick
        #[arg(short, long, default_value = "0")]
        pick: usize,

        /// Your position as LAT,LON (overrides the configured one)
        #[arg(long, allow_hyphen_values = true)]
        origin: Option<GeoLocation>,
    },

    /// Search destinations
    Search {
        /// Search text
        query: String,

        /// Bias results around LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        origin: Option<GeoLocation>,
    },

    /// List fuel stations in the configured region
    Stations,

    /// Compute the road distance between two points
    Route {
        /// Start as LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        from: GeoLocation,

        /// End as LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        to: GeoLocation,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Load configuration and fold the logging flags into it
fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("Invalid configuration")?;
    if cli.verbose > 0 {
        config.logging.filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    if cli.json_logs {
        config.logging.format = LogFormat::Json;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Plan { to, pick, origin } => {
            let view = plan(&config, to.as_deref(), pick, origin).await?;
            println!("{}", format_view(&view));
        },

        Commands::Search { query, origin } => {
            let adapter = GeocodingAdapter::with_config(&config.nominatim)?;
            let bias = origin
                .map(|origin| BoundingBox::around(origin, config.trip.bias_radius_km))
                .transpose()?;
            let candidates = adapter.search(&query, bias).await?;

            if candidates.is_empty() {
                println!("🔎 No destinations found for \"{query}\"");
            } else {
                println!("🔎 Destinations for \"{query}\":");
                for (index, candidate) in candidates.iter().enumerate() {
                    println!("  [{index}] {candidate}");
                }
            }
        },

        Commands::Stations => {
            let adapter = PoiAdapter::with_config(&config.overpass)?;
            let region = config.trip.poi_region;
            let stations = adapter.fetch_fuel_stations(&region).await?;

            println!("⛽ Fuel stations in {region} ({}):", stations.len());
            for station in &stations {
                println!("  • {} ({})", station.name, station.location);
            }
        },

        Commands::Route { from, to } => {
            let adapter = RoutingAdapter::with_config(&config.osrm)?;
            let request =
                RouteRequest::new(from, to).with_alternatives(config.trip.enable_alternative_routes);
            let route = adapter.compute_route(&request).await?;

            println!("🛣️ {}", format_distance(route.total_distance_km));
            for (index, alternative) in route.alternatives.iter().enumerate() {
                println!(
                    "  Alternative {}: {:.2} km",
                    index + 1,
                    alternative.total_distance_km
                );
            }
        },
    }

    Ok(())
}

/// Run a trip session to completion and return its final view
async fn plan(
    config: &AppConfig,
    destination: Option<&str>,
    pick: usize,
    origin: Option<GeoLocation>,
) -> anyhow::Result<TripView> {
    let surface = Arc::new(TerminalMapSurface::new());
    let map: Arc<dyn MapSurfacePort> = surface.clone();
    let ports = build_trip_ports(config, origin, Some(map))?;
    let mut orchestrator = TripOrchestrator::new(config.trip.clone(), ports);
    let handle = orchestrator.handle();

    orchestrator.start();
    orchestrator.run_until_idle().await;

    if let Some(query) = destination {
        handle.edit_query(query)?;
        orchestrator.run_until_idle().await;

        let suggestions = orchestrator.view().suggestions.len();
        if pick < suggestions {
            handle.select_suggestion(pick)?;
            orchestrator.run_until_idle().await;
        } else {
            warn!(pick, suggestions, "No suggestion to pick, keeping destination");
        }
    }

    info!(attached = surface.attached().len(), "Trip planned");
    Ok(orchestrator.view())
}
