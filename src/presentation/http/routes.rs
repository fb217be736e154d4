// src/presentation/http/routes.rs
use crate::application::commands::scenarios::MAX_ARCHIVE_BYTES;
use crate::presentation::http::error::HttpError;
use crate::presentation::http::middleware::{audit::audit_requests, rate_limit};
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{auth, clients, logs, scenarios},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    http::{
        HeaderValue, Method, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware,
    routing::{MethodRouter, get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Room for the form fields and multipart framing around a full-size archive,
/// so an oversized archive still reaches the handler's size check.
const UPLOAD_BODY_LIMIT: usize = MAX_ARCHIVE_BYTES + 1024 * 1024;

pub fn build_router(state: HttpState) -> Router {
    build_router_with_rate_limiter(state, true)
}

/// Same as [`build_router`], with login throttling optional so tests can
/// issue many logins from one address.
pub fn build_router_with_rate_limiter(state: HttpState, limit_logins: bool) -> Router {
    let cors = cors_layer(&state.settings.allowed_origins);

    let login: MethodRouter = match rate_limit::login_rate_limit_layer() {
        Some(limiter) if limit_logins => post(auth::login).layer(limiter),
        _ => post(auth::login),
    };

    let uploads = || DefaultBodyLimit::max(UPLOAD_BODY_LIMIT);
    let audited_routes = Router::new()
        .route("/api/auth/login", audited(login))
        .route("/api/auth/logout", audited(post(auth::logout)))
        .route("/api/auth/check", audited(get(auth::check)))
        .route(
            "/api/scenarios/create",
            audited(post(scenarios::create_scenario).layer(uploads())),
        )
        .route("/api/scenarios/list", audited(get(scenarios::list_scenarios)))
        .route("/api/scenarios/get", audited(get(scenarios::get_scenario)))
        .route(
            "/api/scenarios/update",
            audited(post(scenarios::update_scenario).layer(uploads())),
        )
        .route(
            "/api/scenarios/delete",
            audited(post(scenarios::delete_scenario).delete(scenarios::delete_scenario)),
        )
        .route("/api/clients/check_email", audited(get(clients::check_email)));

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .merge(audited_routes)
        .route("/api/logs/list", get(logs::list_logs))
        .route("/api/logs/clear", post(logs::clear_logs))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

/// Records every request the route answers, including its 405s.
fn audited(route: MethodRouter) -> MethodRouter {
    route
        .fallback(method_not_allowed)
        .layer(middleware::from_fn(audit_requests))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unusable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

async fn method_not_allowed() -> HttpError {
    HttpError::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

async fn not_found() -> HttpError {
    HttpError::new(StatusCode::NOT_FOUND, "endpoint not found")
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    security(()),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
