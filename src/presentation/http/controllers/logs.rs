// src/presentation/http/controllers/logs.rs
use crate::application::{
    dto::AuditLogPage, error::ApplicationError, queries::audit::ListAuditLogsQuery,
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Query, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: usize = 100;

fn default_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListLogsParams {
    /// Maximum number of records to return. Capped by the server's page ceiling.
    #[serde(default = "default_limit")]
    #[param(default = 100, minimum = 0)]
    pub limit: usize,
    /// Number of newest records to skip.
    #[serde(default)]
    #[param(default = 0, minimum = 0)]
    pub offset: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClearLogsResponse {
    pub success: bool,
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/logs/list",
    params(ListLogsParams),
    responses(
        (status = 200, description = "Newest-first page of the audit trail.", body = AuditLogPage),
        (status = 400, description = "Malformed pagination parameters.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "No live admin session.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Logs"
)]
pub async fn list_logs(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    params: Result<Query<ListLogsParams>, QueryRejection>,
) -> HttpResult<Json<AuditLogPage>> {
    let Query(params) = params
        .map_err(|err| HttpError::from_error(ApplicationError::validation(err.body_text())))?;

    let query = ListAuditLogsQuery {
        limit: params.limit.min(state.settings.max_page_size),
        offset: params.offset,
    };

    state
        .services
        .audit_queries
        .list(&actor, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/logs/clear",
    responses(
        (status = 200, description = "Audit trail deleted.", body = ClearLogsResponse),
        (status = 401, description = "No live admin session.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "The trail exists but could not be removed.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Logs"
)]
pub async fn clear_logs(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
) -> HttpResult<Json<ClearLogsResponse>> {
    state
        .services
        .audit_commands
        .clear(&actor)
        .await
        .into_http()?;

    Ok(Json(ClearLogsResponse {
        success: true,
        message: "Logs cleared successfully".into(),
    }))
}
