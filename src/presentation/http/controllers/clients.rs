// src/presentation/http/controllers/clients.rs
use crate::application::error::ApplicationError;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Query, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CheckEmailParams {
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckEmailResponse {
    pub exists: bool,
}

#[utoipa::path(
    get,
    path = "/api/clients/check_email",
    params(CheckEmailParams),
    responses(
        (status = 200, description = "Whether a client is registered under the email.", body = CheckEmailResponse),
        (status = 400, description = "Missing email.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "No live admin session.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Clients"
)]
pub async fn check_email(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    params: Result<Query<CheckEmailParams>, QueryRejection>,
) -> HttpResult<Json<CheckEmailResponse>> {
    let Query(params) = params
        .map_err(|err| HttpError::from_error(ApplicationError::validation(err.body_text())))?;

    let exists = state
        .services
        .client_queries
        .email_exists(&actor, params.email.as_deref().unwrap_or_default())
        .await
        .into_http()?;

    Ok(Json(CheckEmailResponse { exists }))
}
