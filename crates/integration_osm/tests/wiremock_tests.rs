//! Integration tests for the OSM clients (wiremock-based)

use std::time::Duration;

use domain::value_objects::{BoundingBox, GeoLocation};
use wiremock::matchers::{method, path, path_regex, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_osm::{
    AmenityClient, FUEL_AMENITY, GeocodingClient, NominatimClient, NominatimConfig, OsmError,
    OsrmClient, OsrmConfig, OverpassClient, OverpassConfig, RouteClient,
};

fn nominatim_for_mock(base_url: &str) -> NominatimConfig {
    NominatimConfig {
        base_url: base_url.to_string(),
        ..NominatimConfig::for_testing()
    }
}

fn overpass_for_mock(base_url: &str) -> OverpassConfig {
    OverpassConfig {
        base_url: format!("{base_url}/api"),
        ..OverpassConfig::for_testing()
    }
}

fn osrm_for_mock(base_url: &str) -> OsrmConfig {
    OsrmConfig {
        base_url: base_url.to_string(),
        ..OsrmConfig::for_testing()
    }
}

const fn kochi_places_json() -> &'static str {
    r#"[
        {"place_id": 1, "lat": "9.9312328", "lon": "76.2673041", "display_name": "Kochi, Ernakulam, Kerala, India"},
        {"place_id": 2, "lat": "9.9658", "lon": "76.2421", "display_name": "Fort Kochi, Kerala, India"},
        {"place_id": 3, "lat": "oops", "lon": "76.0", "display_name": "Broken"}
    ]"#
}

const fn fuel_stations_json() -> &'static str {
    r#"{
        "version": 0.6,
        "elements": [
            {"type": "node", "id": 101, "lat": 10.0159, "lon": 76.3419, "tags": {"amenity": "fuel", "name": "Indian Oil"}},
            {"type": "node", "id": 102, "lat": 9.9816, "lon": 76.2999, "tags": {"amenity": "fuel"}},
            {"type": "way", "id": 103, "tags": {"amenity": "fuel", "name": "Way station"}}
        ]
    }"#
}

const fn route_json() -> &'static str {
    r#"{
        "code": "Ok",
        "waypoints": [],
        "routes": [
            {"distance": 42170.0, "duration": 3120.5, "weight": 3120.5,
             "geometry": {"type": "LineString", "coordinates": [[76.2, 10.5], [76.41, 10.63], [76.6548, 10.7867]]}},
            {"distance": 51234.0, "duration": 3600.0, "weight": 3600.0,
             "geometry": {"type": "LineString", "coordinates": [[76.2, 10.5], [76.6548, 10.7867]]}}
        ]
    }"#
}

// ── Nominatim ───────────────────────────────────────────────────

#[tokio::test]
async fn test_search_success_keeps_ranking() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Kochi"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("limit", "5"))
        .and(query_param_is_missing("viewbox"))
        .respond_with(ResponseTemplate::new(200).set_body_string(kochi_places_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = NominatimClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let candidates = client.search("  Kochi ", None).await.unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].display_name, "Kochi, Ernakulam, Kerala, India");
    assert_eq!(candidates[1].display_name, "Fort Kochi, Kerala, India");
}

#[tokio::test]
async fn test_search_with_bias_is_bounded() {
    let server = MockServer::start().await;
    let bias = BoundingBox::new(9.5, 76.0, 10.5, 76.5).unwrap();

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("viewbox", "76,9.5,76.5,10.5"))
        .and(query_param("bounded", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(kochi_places_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = NominatimClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let candidates = client.search("Kochi", Some(&bias)).await.unwrap();
    assert!(candidates.iter().all(|c| bias.contains(&c.location)));
}

#[tokio::test]
async fn test_search_blank_query_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let client = NominatimClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    assert!(client.search("   ", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let client = NominatimClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let err = client.search("Kochi", None).await.unwrap_err();
    assert!(matches!(err, OsmError::ParseError(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_search_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let client = NominatimClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let err = client.search("Kochi", None).await.unwrap_err();
    assert_eq!(
        err,
        OsmError::RateLimitExceeded {
            retry_after_secs: Some(30)
        }
    );
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_search_results_are_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(kochi_places_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = NominatimConfig {
        cache_ttl_minutes: 10,
        ..nominatim_for_mock(&server.uri())
    };
    let client = NominatimClient::new(&config).unwrap();

    let first = client.search("Kochi", None).await.unwrap();
    let second = client.search("kochi", None).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_search_requests_are_spaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(2)
        .mount(&server)
        .await;

    let config = NominatimConfig {
        min_request_interval_ms: 200,
        ..nominatim_for_mock(&server.uri())
    };
    let client = NominatimClient::new(&config).unwrap();

    let started = std::time::Instant::now();
    client.search("Kochi", None).await.unwrap();
    client.search("Thrissur", None).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_nominatim_drops_search_superseded_while_waiting() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Thrissur"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Koc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Kochi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(kochi_places_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = NominatimConfig {
        min_request_interval_ms: 300,
        ..nominatim_for_mock(&server.uri())
    };
    let client = NominatimClient::new(&config).unwrap();
    client.search("Thrissur", None).await.unwrap();

    let (stale, latest) = tokio::join!(
        client.search("Koc", None),
        client.search("Kochi", None)
    );
    assert_eq!(stale, Err(OsmError::Superseded));
    assert!(!latest.unwrap().is_empty());
}

// ── Overpass ────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_fuel_stations() {
    let server = MockServer::start().await;
    let expected_query =
        "[out:json][timeout:5];node[\"amenity\"=\"fuel\"](8.0883,74.5236,12.8185,77.5857);out body;";

    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .and(query_param("data", expected_query))
        .respond_with(ResponseTemplate::new(200).set_body_string(fuel_stations_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OverpassClient::new(&overpass_for_mock(&server.uri())).unwrap();
    let region = BoundingBox::kerala();
    let stations = client.fetch_amenities(FUEL_AMENITY, &region).await.unwrap();

    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0].name, "Indian Oil");
    assert_eq!(stations[1].name, "Unknown Fuel Station");
    assert!(stations.iter().all(|s| region.contains(&s.location)));
}

#[tokio::test]
async fn test_fetch_uses_configured_placeholder() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fuel_stations_json()))
        .mount(&server)
        .await;

    let config = OverpassConfig {
        placeholder_name: "Unnamed pump".to_string(),
        ..overpass_for_mock(&server.uri())
    };
    let client = OverpassClient::new(&config).unwrap();
    let stations = client
        .fetch_amenities(FUEL_AMENITY, &BoundingBox::kerala())
        .await
        .unwrap();
    assert_eq!(stations[1].name, "Unnamed pump");
}

#[tokio::test]
async fn test_fetch_gateway_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(504))
        .mount(&server)
        .await;

    let client = OverpassClient::new(&overpass_for_mock(&server.uri())).unwrap();
    let err = client
        .fetch_amenities(FUEL_AMENITY, &BoundingBox::kerala())
        .await
        .unwrap_err();
    assert!(matches!(err, OsmError::ServiceUnavailable(_)));
}

// ── OSRM ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_route_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/76\.2,10\.5;76\.6548,10\.7867$"))
        .and(query_param("overview", "full"))
        .and(query_param("geometries", "geojson"))
        .and(query_param("alternatives", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_string(route_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OsrmClient::new(&osrm_for_mock(&server.uri())).unwrap();
    let from = GeoLocation::new_unchecked(10.50, 76.20);
    let to = GeoLocation::new_unchecked(10.7867, 76.6548);
    let route = client.route(&from, &to, false).await.unwrap();

    assert_eq!(route.total_distance_km, 42.17);
    assert_eq!(route.distance_label(), "42.17 km");
    assert_eq!(route.geometry.len(), 3);
    assert!(route.connects(&from, &to));
    assert!(route.alternatives.is_empty());
}

#[tokio::test]
async fn test_route_with_alternatives() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/"))
        .and(query_param("alternatives", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(route_json()))
        .mount(&server)
        .await;

    let client = OsrmClient::new(&osrm_for_mock(&server.uri())).unwrap();
    let from = GeoLocation::new_unchecked(10.50, 76.20);
    let to = GeoLocation::new_unchecked(10.7867, 76.6548);
    let route = client.route(&from, &to, true).await.unwrap();

    assert_eq!(route.alternatives.len(), 1);
    assert_eq!(route.alternatives[0].total_distance_km, 51.23);
}

#[tokio::test]
async fn test_route_no_route_on_bad_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/"))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"{"code": "NoRoute", "message": "Impossible route between points"}"#,
        ))
        .mount(&server)
        .await;

    let client = OsrmClient::new(&osrm_for_mock(&server.uri())).unwrap();
    let from = GeoLocation::new_unchecked(10.50, 76.20);
    let to = GeoLocation::new_unchecked(-33.86, 151.21);
    let err = client.route(&from, &to, false).await.unwrap_err();
    assert!(matches!(err, OsmError::NoRoute { .. }));
}

#[tokio::test]
async fn test_route_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = OsrmClient::new(&osrm_for_mock(&server.uri())).unwrap();
    let from = GeoLocation::new_unchecked(10.50, 76.20);
    let to = GeoLocation::new_unchecked(10.7867, 76.6548);
    let err = client.route(&from, &to, false).await.unwrap_err();
    assert!(matches!(err, OsmError::RequestFailed(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_connection_refused() {
    let client = OsrmClient::new(&osrm_for_mock("http://127.0.0.1:1")).unwrap();
    let from = GeoLocation::new_unchecked(10.50, 76.20);
    let to = GeoLocation::new_unchecked(10.7867, 76.6548);
    let err = client.route(&from, &to, false).await.unwrap_err();
    assert!(matches!(err, OsmError::ConnectionFailed(_)));
}
