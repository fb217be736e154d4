// src/presentation/http/controllers/auth.rs
use crate::application::{
    commands::auth::LoginAdminCommand,
    dto::AdminUserDto,
    error::ApplicationError,
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{MaybeAuthenticated, bearer_token};
use crate::presentation::http::middleware::audit::AuditActor;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::rejection::JsonRejection,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: AdminUserDto,
    /// Session token to send back as `Authorization: Bearer <token>`.
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckResponse {
    pub user: Option<AdminUserDto>,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session created.", body = LoginResponse),
        (status = 400, description = "Missing email or password.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Invalid credentials.", body = crate::presentation::http::error::ErrorResponse),
        (status = 429, description = "Too many login attempts.")
    ),
    security(()),
    tag = "Auth"
)]
pub async fn login(
    Extension(state): Extension<HttpState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> HttpResult<Response> {
    let Json(payload) = payload
        .map_err(|err| HttpError::from_error(ApplicationError::validation(err.body_text())))?;

    let result = state
        .services
        .auth_commands
        .login(LoginAdminCommand {
            email: payload.email,
            password: payload.password,
        })
        .await
        .into_http()?;

    let actor = AuditActor(result.user.id);
    let mut response = Json(LoginResponse {
        user: result.user,
        token: result.session.token,
        expires_at: result.session.expires_at,
        message: "Login successful".into(),
    })
    .into_response();
    // The caller had no session when the request started.
    response.extensions_mut().insert(actor);
    Ok(response)
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session revoked (or none was present).", body = MessageResponse)
    ),
    tag = "Auth"
)]
pub async fn logout(
    Extension(state): Extension<HttpState>,
    MaybeAuthenticated(actor): MaybeAuthenticated,
) -> HttpResult<Json<MessageResponse>> {
    state
        .services
        .auth_commands
        .logout(actor.as_ref())
        .await
        .into_http()?;

    Ok(Json(MessageResponse {
        message: "Logout successful".into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/check",
    responses(
        (status = 200, description = "Current admin, or null without a live session.", body = CheckResponse)
    ),
    tag = "Auth"
)]
pub async fn check(
    Extension(state): Extension<HttpState>,
    headers: HeaderMap,
) -> HttpResult<Json<CheckResponse>> {
    let token = bearer_token(&headers);
    let user = state
        .services
        .auth_commands
        .check(token.as_deref())
        .await
        .into_http()?;

    Ok(Json(CheckResponse { user }))
}
