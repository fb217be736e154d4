use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use backoffice_core::domain::audit::AuditStore;
use serde_json::json;

mod support;

use support::{assert_error_response, authed, body_json};

#[tokio::test]
async fn log_routes_require_a_session() {
    let app = support::make_test_app();

    let resp = app
        .send(Request::get("/api/logs/list").body(Body::empty()).unwrap())
        .await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;

    let resp = app
        .send(authed(Method::POST, "/api/logs/clear", "not-a-session"))
        .await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn list_returns_newest_first_with_totals() {
    let app = support::make_test_app();
    let token = app.login().await;
    // login itself was audited; add two checks on top
    app.send(authed(Method::GET, "/api/auth/check", &token)).await;
    app.send(authed(Method::GET, "/api/auth/check", &token)).await;

    let resp = app
        .send(authed(Method::GET, "/api/logs/list?limit=2&offset=0", &token))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;

    assert_eq!(json["total"], json!(3));
    assert_eq!(json["limit"], json!(2));
    assert_eq!(json["offset"], json!(0));
    let logs = json["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["action"], json!("check"));
    assert_eq!(logs[0]["user_id"], json!(support::ADMIN_ID));

    let resp = app
        .send(authed(Method::GET, "/api/logs/list?offset=2", &token))
        .await;
    let json = body_json(resp).await;
    // the default of 100 is above the test ceiling
    assert_eq!(json["limit"], json!(support::MAX_PAGE_SIZE));
    let logs = json["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["action"], json!("login"));
}

#[tokio::test]
async fn oversized_limit_is_capped() {
    let app = support::make_test_app();
    let token = app.login().await;

    let resp = app
        .send(authed(Method::GET, "/api/logs/list?limit=100000", &token))
        .await;
    let json = body_json(resp).await;
    assert_eq!(json["limit"], json!(support::MAX_PAGE_SIZE));
}

#[tokio::test]
async fn malformed_paging_is_rejected() {
    let app = support::make_test_app();
    let token = app.login().await;

    for uri in ["/api/logs/list?limit=-1", "/api/logs/list?offset=abc"] {
        let resp = app.send(authed(Method::GET, uri, &token)).await;
        assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
    }
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let app = support::make_test_app();
    let token = app.login().await;

    let resp = app.send(authed(Method::POST, "/api/logs/list", &token)).await;
    assert_error_response(resp, StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").await;

    let resp = app.send(authed(Method::GET, "/api/logs/clear", &token)).await;
    assert_error_response(resp, StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").await;
}

#[tokio::test]
async fn clear_empties_the_trail() {
    let app = support::make_test_app();
    let token = app.login().await;
    assert_eq!(app.store.count().await.unwrap(), 1);

    for _ in 0..2 {
        let resp = app.send(authed(Method::POST, "/api/logs/clear", &token)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(
            json,
            json!({ "success": true, "message": "Logs cleared successfully" })
        );
    }

    let resp = app.send(authed(Method::GET, "/api/logs/list", &token)).await;
    let json = body_json(resp).await;
    assert_eq!(json["total"], json!(0));
    assert_eq!(json["logs"], json!([]));
}

#[tokio::test]
async fn unreadable_lines_are_reported_not_fatal() {
    let app = support::make_test_app();
    let token = app.login().await;

    let mut raw = std::fs::read(app.store.path()).unwrap();
    raw.extend_from_slice(b"{\"timestamp\":\"2024-\n");
    std::fs::write(app.store.path(), raw).unwrap();

    let resp = app.send(authed(Method::GET, "/api/logs/list", &token)).await;
    let json = body_json(resp).await;
    assert_eq!(json["total"], json!(1));
    assert_eq!(json["skipped"], json!(1));
}
