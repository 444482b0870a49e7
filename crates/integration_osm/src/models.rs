//! Raw response shapes of the OSM services

use std::collections::HashMap;

use serde::Deserialize;

/// One Nominatim search hit (`format=jsonv2`)
#[derive(Debug, Deserialize)]
pub(crate) struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Overpass QL JSON output
#[derive(Debug, Deserialize)]
pub(crate) struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// One Overpass element; only nodes carry `lat`/`lon` directly
#[derive(Debug, Deserialize)]
pub(crate) struct OverpassElement {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// OSRM `route` service response
#[derive(Debug, Deserialize)]
pub(crate) struct OsrmResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmRoute {
    /// Meters
    pub distance: f64,
    pub geometry: OsrmGeometry,
}

/// GeoJSON `LineString`; coordinates are `[lon, lat]`
#[derive(Debug, Deserialize)]
pub(crate) struct OsrmGeometry {
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominatim_place_parsing() {
        let json = r#"[{"place_id": 1, "lat": "9.9312328", "lon": "76.2673041", "display_name": "Kochi, Ernakulam, Kerala, India"}]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(json).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].lat, "9.9312328");
        assert_eq!(
            places[0].display_name.as_deref(),
            Some("Kochi, Ernakulam, Kerala, India")
        );
    }

    #[test]
    fn test_overpass_element_without_coordinates() {
        let json = r#"{"elements": [{"type": "way", "id": 5, "tags": {"amenity": "fuel"}}]}"#;
        let response: OverpassResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.elements.len(), 1);
        assert!(response.elements[0].lat.is_none());
        assert_eq!(response.elements[0].id, Some(5));
    }

    #[test]
    fn test_osrm_error_response() {
        let json = r#"{"code": "NoRoute", "message": "Impossible route between points"}"#;
        let response: OsrmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.code, "NoRoute");
        assert!(response.routes.is_empty());
    }

    #[test]
    fn test_osrm_geometry_is_lon_lat() {
        let json = r#"{"code": "Ok", "routes": [{"distance": 42170.0, "duration": 3000.0,
            "geometry": {"type": "LineString", "coordinates": [[76.2, 10.5], [76.6548, 10.7867]]}}]}"#;
        let response: OsrmResponse = serde_json::from_str(json).unwrap();
        let route = &response.routes[0];
        assert_eq!(route.geometry.coordinates[0], [76.2, 10.5]);
        assert!((route.distance - 42_170.0).abs() < f64::EPSILON);
    }
}
