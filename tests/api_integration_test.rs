// API integration tests that verify HTTP endpoints
// Tests the Axum router with real HTTP requests and a mocked upstream

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt; // For `.collect()`
use mockito::{Matcher, Server, ServerGuard};
use serde_json::Value;
use tower::ServiceExt; // For `oneshot`

use bloomwatch_service::api::{create_router, AppState, PHENOLOGY_CACHE_CONTROL};

/// Helper to create test app backed by the in-memory catalog and a mock upstream
async fn create_test_app() -> (axum::Router, ServerGuard) {
    let server = Server::new_async().await;

    let state = AppState {
        phenology_service: common::phenology_service(server.url()),
        species_service: common::species_service(),
    };

    (create_router(state), server)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let cache_control = response
        .headers()
        .get(header::CACHE_CONTROL)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, cache_control, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _server) = create_test_app().await;

    let (status, _, json) = get(app, "/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_phenology_missing_id() {
    let (app, _server) = create_test_app().await;

    let (status, _, json) = get(app, "/api/v1/phenology").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "missing id");
}

#[tokio::test]
async fn test_phenology_blank_id() {
    let (app, _server) = create_test_app().await;

    let (status, _, json) = get(app, "/api/v1/phenology?id=").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "missing id");
}

#[tokio::test]
async fn test_phenology_unknown_id() {
    let (app, _server) = create_test_app().await;

    let (status, _, json) = get(app, "/api/v1/phenology?id=rosa-do-deserto").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "unknown id");
}

#[tokio::test]
async fn test_phenology_padded_id_is_unknown() {
    let (app, _server) = create_test_app().await;

    let (status, _, json) = get(app, "/api/v1/phenology?id=%20ipe-amarelo%20").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "unknown id");
}

#[tokio::test]
async fn test_phenology_whitespace_id_is_unknown() {
    let (app, _server) = create_test_app().await;

    let (status, _, json) = get(app, "/api/v1/phenology?id=%20").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "unknown id");
}

#[tokio::test]
async fn test_species_and_phenology_agree_on_padded_id() {
    let (app, _server) = create_test_app().await;

    let (species_status, _, _) = get(app.clone(), "/api/v1/species/%20ipe-amarelo%20").await;
    let (phenology_status, _, _) = get(app, "/api/v1/phenology?id=%20ipe-amarelo%20").await;

    assert_eq!(species_status, StatusCode::NOT_FOUND);
    assert_eq!(phenology_status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_phenology_from_histogram() {
    let (app, mut server) = create_test_app().await;

    let mock = server
        .mock("GET", common::HISTOGRAM_PATH)
        .match_query(common::taxon_query("Handroanthus albus"))
        .with_status(200)
        .with_body(common::histogram_body(&[(7, 20), (8, 64), (9, 31)]))
        .create_async()
        .await;

    let (status, cache_control, json) = get(app, "/api/v1/phenology?id=ipe-amarelo").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache_control.as_deref(), Some(PHENOLOGY_CACHE_CONTROL));
    assert_eq!(json["id"], "ipe-amarelo");
    assert_eq!(json["sci"], "Handroanthus albus");
    assert_eq!(json["source"], "inat");
    assert_eq!(json["nextBloom"]["month"], 8);
    assert!(json["nextBloom"]["daysUntil"].as_u64().is_some());
    assert_eq!(json["histogram"]["8"], 64);
    assert_eq!(json["histogram"]["1"], 0);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_phenology_upstream_down_uses_season() {
    let (app, mut server) = create_test_app().await;

    let mock = server
        .mock("GET", common::HISTOGRAM_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let (status, _, json) = get(app, "/api/v1/phenology?id=flor-de-maio").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "season");
    assert_eq!(json["histogram"], serde_json::json!({}));
    let month = json["nextBloom"]["month"].as_u64().unwrap();
    assert!((4..=6).contains(&month), "unexpected month {month}");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_phenology_no_prediction_is_ok() {
    let (app, mut server) = create_test_app().await;

    let _mock = server
        .mock("GET", common::HISTOGRAM_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(common::histogram_body(&[]))
        .create_async()
        .await;

    let (status, _, json) = get(app, "/api/v1/phenology?id=caliandra").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "none");
    assert!(json["nextBloom"].is_null());
}

#[tokio::test]
async fn test_phenology_forwards_coordinates() {
    let (app, mut server) = create_test_app().await;

    let mock = server
        .mock("GET", common::HISTOGRAM_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("lat".into(), "-23.55".into()),
            Matcher::UrlEncoded("lng".into(), "-46.63".into()),
            Matcher::UrlEncoded("radius".into(), "200".into()),
        ]))
        .with_status(200)
        .with_body(common::histogram_body(&[(5, 4)]))
        .create_async()
        .await;

    let (status, _, json) =
        get(app, "/api/v1/phenology?id=flor-de-maio&lat=-23.55&lng=-46.63").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "inat");
    assert_eq!(json["nextBloom"]["month"], 5);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_phenology_single_coordinate_is_ignored() {
    let (app, mut server) = create_test_app().await;

    // Any geographic parameter would miss this mock's expectation
    let geo = server
        .mock("GET", common::HISTOGRAM_PATH)
        .match_query(Matcher::UrlEncoded("radius".into(), "200".into()))
        .expect(0)
        .create_async()
        .await;

    let (status, _, json) = get(app, "/api/v1/phenology?id=flor-de-maio&lat=-23.55").await;

    // Unmatched upstream request -> fallback to season text
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "season");

    geo.assert_async().await;
}

#[tokio::test]
async fn test_list_species() {
    let (app, _server) = create_test_app().await;

    let (status, _, json) = get(app, "/api/v1/species").await;

    assert_eq!(status, StatusCode::OK);
    let species = json.as_array().unwrap();
    assert_eq!(species.len(), 4);
    assert_eq!(species[0]["id"], "ipe-amarelo");
    assert_eq!(species[0]["sci"], "Handroanthus albus");
}

#[tokio::test]
async fn test_get_species_by_id() {
    let (app, _server) = create_test_app().await;

    let (status, _, json) = get(app, "/api/v1/species/flor-de-maio").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sci"], "Schlumbergera truncata");
    assert_eq!(json["season"], "floração: abr–jun");
}

#[tokio::test]
async fn test_get_species_not_found() {
    let (app, _server) = create_test_app().await;

    let (status, _, json) = get(app, "/api/v1/species/rosa-do-deserto").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "unknown id");
}

#[tokio::test]
async fn test_get_pollination() {
    let (app, _server) = create_test_app().await;

    let (status, _, json) = get(app, "/api/v1/species/ipe-amarelo/pollination").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["soil"]["texture"], "arenoso");
    assert_eq!(json["totalDaysToBloom"], 90);
}

#[tokio::test]
async fn test_get_pollination_not_found() {
    let (app, _server) = create_test_app().await;

    let (status, _, _) = get(app, "/api/v1/species/rosa-do-deserto/pollination").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn test_openapi_lists_endpoints() {
    let spec = bloomwatch_service::api::generate_openapi_spec();
    let json = serde_json::to_value(&spec).unwrap();

    for path in [
        "/api/v1/health",
        "/api/v1/phenology",
        "/api/v1/species",
        "/api/v1/species/{id}",
        "/api/v1/species/{id}/pollination",
    ] {
        assert!(json["paths"].get(path).is_some(), "missing path {path}");
    }
}
