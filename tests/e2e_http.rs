use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

mod support;

use support::{assert_error_response, body_json};

#[tokio::test]
async fn health_reports_ok() {
    let app = support::make_test_app();
    let resp = app
        .send(Request::get("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn unknown_routes_get_a_json_404() {
    let app = support::make_test_app();
    let resp = app
        .send(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = support::make_test_app();
    let resp = app
        .send(Request::get("/openapi.json").body(Body::empty()).unwrap())
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = body_json(resp).await;
    assert!(doc["paths"]["/api/logs/list"]["get"].is_object());
    assert!(doc["paths"]["/api/logs/clear"]["post"].is_object());
}
