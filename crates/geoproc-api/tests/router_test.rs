//! Router tests driven through `tower::ServiceExt::oneshot`

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use geoproc_api::{create_router, AppState};
use geoproc_core::{ProcessingDefaults, Processor};
use geoproc_geo::GeoEngine;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    create_router(Arc::new(AppState::new(Processor::new(GeoEngine::new()))))
}

fn app_without_engine() -> Router {
    create_router(Arc::new(AppState::new(Processor::without_engine())))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/process")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn square() -> Value {
    json!({
        "type": "Polygon",
        "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]]
    })
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["engine"], "geo");

    let (status, body) = get(app_without_engine(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert!(body.get("engine").is_none());
}

#[tokio::test]
async fn test_list_operations() {
    let state = AppState::new(
        Processor::new(GeoEngine::new())
            .with_defaults(ProcessingDefaults { offset_distance: 2.5, ..Default::default() }),
    );
    let (status, body) = get(create_router(Arc::new(state)), "/api/v1/operations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], true);
    let operations = body["operations"].as_array().unwrap();
    assert_eq!(operations.len(), 4);
    assert_eq!(operations[2]["name"], "offset_polygon");
    assert_eq!(operations[2]["parameter"], "offsetDistance");
    assert_eq!(operations[2]["default"], 2.5);
    assert!(operations[0].get("parameter").is_none());
}

#[tokio::test]
async fn test_process_feature() {
    let body = json!({
        "operation": "extrude",
        "geojson": {"type": "Feature", "geometry": square(), "properties": {"height_class": "b"}},
        "params": {"extrudeHeight": 3}
    });
    let (status, body) = post(app(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "Feature");
    assert_eq!(body["properties"], json!({"height_class": "b", "processed": true}));
    assert_eq!(body["geometry"]["type"], "MultiPolygon");
}

#[tokio::test]
async fn test_process_without_params_uses_defaults() {
    let (status, body) = post(app(), json!({"operation": "offset_polygon", "geojson": square()})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "MultiPolygon");
}

#[tokio::test]
async fn test_unknown_operation_is_bad_request() {
    let (status, body) = post(app(), json!({"operation": "buffer", "geojson": square()})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Unknown operation: buffer"));
    assert!(body["details"].as_str().unwrap().contains("triangulate_2dz"));
}

#[tokio::test]
async fn test_bad_params_are_bad_request() {
    let body = json!({"operation": "extrude", "geojson": square(), "params": {"extrudeHeight": "tall"}});
    let (status, _) = post(app(), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_collection_is_bad_request() {
    let body = json!({
        "operation": "triangulate_2dz",
        "geojson": {"type": "FeatureCollection", "features": []}
    });
    let (status, body) = post(app(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Empty FeatureCollection");
}

#[tokio::test]
async fn test_invalid_geometry_is_unprocessable() {
    let bowtie = json!({"type": "Polygon", "coordinates": [[[0, 0], [2, 2], [2, 0], [0, 2], [0, 0]]]});
    let (status, body) = post(app(), json!({"operation": "straight_skeleton", "geojson": bowtie})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input geometry"));
}

#[tokio::test]
async fn test_engine_failure_is_unprocessable() {
    let point = json!({"type": "Point", "coordinates": [1, 1]});
    let (status, body) = post(app(), json!({"operation": "straight_skeleton", "geojson": point})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().starts_with("Straight skeleton computation failed"));
}

#[tokio::test]
async fn test_missing_engine_is_unavailable() {
    let (status, _) =
        post(app_without_engine(), json!({"operation": "extrude", "geojson": square()})).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
