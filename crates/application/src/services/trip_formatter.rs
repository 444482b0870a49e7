//! Trip view formatting utilities
//!
//! Pure functions that render a [`TripView`] as plain text for a terminal or
//! messenger-style display.

use domain::value_objects::GeoLocation;

use super::trip::{MapViewport, TripView};

/// Marker text shown at the user's position
pub const ORIGIN_MARKER: &str = "You are here!";

/// Format a distance label, e.g. `Total Distance: 42.17 km`
#[must_use]
pub fn format_distance(distance_km: f64) -> String {
    format!("Total Distance: {distance_km:.2} km")
}

/// OpenStreetMap link centered on a location
#[must_use]
pub fn map_link(location: &GeoLocation, zoom: u8) -> String {
    format!(
        "https://www.openstreetmap.org/?mlat={lat:.6}&mlon={lon:.6}#map={zoom}/{lat:.6}/{lon:.6}",
        lat = location.latitude(),
        lon = location.longitude(),
    )
}

/// Render a full trip view
#[must_use]
pub fn format_view(view: &TripView) -> String {
    let mut parts = Vec::new();

    // Notices first so failures are not missed
    for notice in &view.notices {
        parts.push(format!("⚠️ {}", notice.message));
    }

    // ── Map ─────────────────────────────────────────────────────
    match (view.origin, view.map) {
        (Some(origin), Some(MapViewport { zoom, .. })) => {
            parts.push(format!("📍 {ORIGIN_MARKER} ({origin})"));
            parts.push(format!("🗺️ {}", map_link(&origin, zoom)));
        },
        _ => parts.push("🗺️ Map unavailable until your location is known".to_string()),
    }
    parts.push(format!("🏁 Destination: {}", view.destination));

    // ── Search ──────────────────────────────────────────────────
    if !view.search_query.trim().is_empty() {
        parts.push(String::new());
        parts.push(format!("🔎 {}", view.search_query));
        for (index, suggestion) in view.suggestions.iter().enumerate() {
            parts.push(format!("  [{index}] {suggestion}"));
        }
    }

    // ── Route ───────────────────────────────────────────────────
    if let Some(route) = &view.route {
        parts.push(String::new());
        parts.push(format!("🛣️ {}", format_distance(route.total_distance_km)));
        for (index, alternative) in route.alternatives.iter().enumerate() {
            parts.push(format!(
                "  Alternative {}: {:.2} km",
                index + 1,
                alternative.total_distance_km
            ));
        }
    }

    // ── Fuel stations ───────────────────────────────────────────
    if !view.points_of_interest.is_empty() {
        parts.push(String::new());
        parts.push(format!("⛽ Fuel stations ({}):", view.points_of_interest.len()));
        for poi in &view.points_of_interest {
            parts.push(format!("  • {} ({})", poi.name, poi.location));
        }
    }

    if view.loading {
        parts.push(String::new());
        parts.push("⏳ Loading…".to_string());
    }

    parts.join("\n")
}
