// src/presentation/http/controllers/scenarios.rs
use crate::application::{
    commands::scenarios::{
        CreateScenarioCommand, DeleteScenarioCommand, UpdateScenarioCommand, UploadedArchive,
    },
    dto::ScenarioDto,
    error::ApplicationError,
    queries::scenarios::ListScenariosQuery,
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, MaybeAuthenticated};
use crate::presentation::http::middleware::audit::AuditData;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{
        Multipart, Query,
        multipart::{MultipartError, MultipartRejection},
        rejection::QueryRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use utoipa::{IntoParams, ToSchema};

/// Form fields that may carry the scenario archive, in order of preference.
const ARCHIVE_FIELDS: [&str; 2] = ["scenario", "zip_file"];

#[derive(Debug, Serialize, ToSchema)]
pub struct ScenarioResponse {
    pub success: bool,
    pub scenario: ScenarioDto,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScenarioListResponse {
    pub scenarios: Vec<ScenarioDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScenarioDetailResponse {
    pub scenario: ScenarioDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteScenarioResponse {
    pub success: bool,
    pub message: String,
}

/// `multipart/form-data` accepted by `/api/scenarios/create`.
#[derive(Debug, ToSchema)]
#[allow(dead_code, non_snake_case)]
pub struct CreateScenarioForm {
    /// Client account email; required without an admin session.
    userEmail: Option<String>,
    /// JSON document with `title` and `description`, sent by client apps.
    scenarioData: Option<String>,
    client_id: Option<i64>,
    title: Option<String>,
    description: Option<String>,
    /// Zip archive, at most 50 MB. `zip_file` is accepted as well.
    #[schema(value_type = Option<String>, format = Binary)]
    scenario: Option<Vec<u8>>,
}

/// `multipart/form-data` accepted by `/api/scenarios/update`.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UpdateScenarioForm {
    id: i64,
    title: Option<String>,
    description: Option<String>,
    /// Replacement zip archive; the previous one is deleted.
    #[schema(value_type = Option<String>, format = Binary)]
    zip_file: Option<Vec<u8>>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListScenariosParams {
    /// Only list scenarios filed for this client.
    pub client_id: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScenarioIdParams {
    pub id: Option<String>,
}

/// Multipart body read in full before validation.
#[derive(Debug, Default)]
struct UploadForm {
    fields: Map<String, Value>,
    files: HashMap<String, UploadedArchive>,
}

impl UploadForm {
    async fn read(multipart: Result<Multipart, MultipartRejection>) -> HttpResult<Self> {
        let mut multipart = multipart.map_err(|err| bad_request(err.body_text()))?;
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            if let Some(file_name) = field.file_name().map(str::to_string) {
                let contents = field.bytes().await.map_err(multipart_error)?;
                // An empty file input is sent as a nameless, empty part.
                if file_name.is_empty() && contents.is_empty() {
                    continue;
                }
                form.files.insert(
                    name,
                    UploadedArchive {
                        file_name: Some(file_name),
                        contents,
                    },
                );
            } else {
                let value = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, Value::String(value));
            }
        }
        Ok(form)
    }

    fn text(&self, key: &str) -> Option<String> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn take_archive(&mut self) -> Option<UploadedArchive> {
        ARCHIVE_FIELDS
            .iter()
            .find_map(|name| self.files.remove(*name))
    }

    /// Text fields plus the name and size of each file; never file contents.
    fn audit_data(&self) -> AuditData {
        let mut data = self.fields.clone();
        for (name, file) in &self.files {
            data.insert(
                name.clone(),
                json!({ "file_name": file.file_name, "size": file.contents.len() }),
            );
        }
        AuditData(Value::Object(data))
    }
}

fn bad_request(message: impl Into<String>) -> HttpError {
    HttpError::from_error(ApplicationError::validation(message))
}

fn multipart_error(err: MultipartError) -> HttpError {
    HttpError::new(err.status(), err.body_text())
}

fn required_id(raw: Option<&str>) -> HttpResult<i64> {
    let raw = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| bad_request("Scenario ID is required"))?;
    raw.parse()
        .map_err(|_| bad_request("Scenario ID must be an integer"))
}

fn with_audit_data(result: HttpResult<Response>, data: AuditData) -> Response {
    let mut response = result.unwrap_or_else(IntoResponse::into_response);
    response.extensions_mut().insert(data);
    response
}

#[utoipa::path(
    post,
    path = "/api/scenarios/create",
    request_body(content = CreateScenarioForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Scenario created.", body = ScenarioResponse),
        (status = 400, description = "Missing fields, bad scenarioData, or an archive that is not a zip or is too large.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Neither an admin session nor userEmail.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown client.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "The archive could not be stored.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Scenarios"
)]
pub async fn create_scenario(
    Extension(state): Extension<HttpState>,
    MaybeAuthenticated(actor): MaybeAuthenticated,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut form = match UploadForm::read(multipart).await {
        Ok(form) => form,
        Err(err) => return err.into_response(),
    };
    let audit = form.audit_data();

    let command = CreateScenarioCommand {
        user_email: form.text("userEmail"),
        scenario_data: form.text("scenarioData"),
        client_id: form.text("client_id"),
        title: form.text("title"),
        description: form.text("description"),
        archive: form.take_archive(),
    };
    let result = state
        .services
        .scenario_commands
        .create(actor.as_ref(), command)
        .await
        .into_http()
        .map(|scenario| {
            let body = ScenarioResponse {
                success: true,
                scenario,
                message: "Scenario created successfully".into(),
            };
            (StatusCode::CREATED, Json(body)).into_response()
        });

    with_audit_data(result, audit)
}

#[utoipa::path(
    get,
    path = "/api/scenarios/list",
    params(ListScenariosParams),
    responses(
        (status = 200, description = "Scenarios, newest first.", body = ScenarioListResponse),
        (status = 400, description = "Malformed client_id.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "No live admin session.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Scenarios"
)]
pub async fn list_scenarios(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    params: Result<Query<ListScenariosParams>, QueryRejection>,
) -> HttpResult<Json<ScenarioListResponse>> {
    let Query(params) = params.map_err(|err| bad_request(err.body_text()))?;
    let client_id = params
        .client_id
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<i64>())
        .transpose()
        .map_err(|_| bad_request("client_id must be an integer"))?;

    let scenarios = state
        .services
        .scenario_queries
        .list(&actor, ListScenariosQuery { client_id })
        .await
        .into_http()?;

    Ok(Json(ScenarioListResponse { scenarios }))
}

#[utoipa::path(
    get,
    path = "/api/scenarios/get",
    params(ScenarioIdParams),
    responses(
        (status = 200, description = "One scenario with its creator and client.", body = ScenarioDetailResponse),
        (status = 400, description = "Missing or malformed id.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "No live admin session.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Scenario not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Scenarios"
)]
pub async fn get_scenario(
    Extension(state): Extension<HttpState>,
    Authenticated(_actor): Authenticated,
    params: Result<Query<ScenarioIdParams>, QueryRejection>,
) -> HttpResult<Json<ScenarioDetailResponse>> {
    let Query(params) = params.map_err(|err| bad_request(err.body_text()))?;
    let id = required_id(params.id.as_deref())?;

    let scenario = state
        .services
        .scenario_queries
        .get(id)
        .await
        .into_http()?;

    Ok(Json(ScenarioDetailResponse { scenario }))
}

#[utoipa::path(
    post,
    path = "/api/scenarios/update",
    request_body(content = UpdateScenarioForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Scenario updated.", body = ScenarioResponse),
        (status = 400, description = "Missing id, empty text, or a bad archive.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "No live admin session.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Scenario not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Scenarios"
)]
pub async fn update_scenario(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut form = match UploadForm::read(multipart).await {
        Ok(form) => form,
        Err(err) => return err.into_response(),
    };
    let audit = form.audit_data();

    let result = match required_id(form.text("id").as_deref()) {
        Ok(id) => {
            let command = UpdateScenarioCommand {
                id,
                title: form.text("title"),
                description: form.text("description"),
                archive: form.take_archive(),
            };
            state
                .services
                .scenario_commands
                .update(&actor, command)
                .await
                .into_http()
                .map(|scenario| {
                    Json(ScenarioResponse {
                        success: true,
                        scenario,
                        message: "Scenario updated successfully".into(),
                    })
                    .into_response()
                })
        }
        Err(err) => Err(err),
    };

    with_audit_data(result, audit)
}

#[utoipa::path(
    delete,
    path = "/api/scenarios/delete",
    params(ScenarioIdParams),
    responses(
        (status = 200, description = "Scenario and its archive deleted. Also served for POST; an `id` in a JSON body takes precedence over the query.", body = DeleteScenarioResponse),
        (status = 400, description = "Missing or malformed id.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "No live admin session.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Scenario not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Scenarios"
)]
pub async fn delete_scenario(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    params: Result<Query<ScenarioIdParams>, QueryRejection>,
    body: Bytes,
) -> HttpResult<Json<DeleteScenarioResponse>> {
    let Query(params) = params.map_err(|err| bad_request(err.body_text()))?;
    let raw = id_from_body(&body).or(params.id);
    let id = required_id(raw.as_deref())?;

    state
        .services
        .scenario_commands
        .delete(&actor, DeleteScenarioCommand { id })
        .await
        .into_http()?;

    Ok(Json(DeleteScenarioResponse {
        success: true,
        message: "Scenario deleted successfully".into(),
    }))
}

fn id_from_body(body: &[u8]) -> Option<String> {
    let value = serde_json::from_slice::<Value>(body).ok()?;
    match value.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
