// src/presentation/http/openapi.rs
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::auth::logout,
        crate::presentation::http::controllers::auth::check,
        crate::presentation::http::controllers::logs::list_logs,
        crate::presentation::http::controllers::logs::clear_logs,
        crate::presentation::http::controllers::scenarios::create_scenario,
        crate::presentation::http::controllers::scenarios::list_scenarios,
        crate::presentation::http::controllers::scenarios::get_scenario,
        crate::presentation::http::controllers::scenarios::update_scenario,
        crate::presentation::http::controllers::scenarios::delete_scenario,
        crate::presentation::http::controllers::clients::check_email,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::auth::LoginRequest,
            crate::presentation::http::controllers::auth::LoginResponse,
            crate::presentation::http::controllers::auth::MessageResponse,
            crate::presentation::http::controllers::auth::CheckResponse,
            crate::presentation::http::controllers::logs::ClearLogsResponse,
            crate::presentation::http::controllers::scenarios::ScenarioResponse,
            crate::presentation::http::controllers::scenarios::ScenarioListResponse,
            crate::presentation::http::controllers::scenarios::ScenarioDetailResponse,
            crate::presentation::http::controllers::scenarios::DeleteScenarioResponse,
            crate::presentation::http::controllers::scenarios::CreateScenarioForm,
            crate::presentation::http::controllers::scenarios::UpdateScenarioForm,
            crate::presentation::http::controllers::clients::CheckEmailResponse,
            crate::application::dto::ScenarioDto,
            crate::application::dto::AdminUserDto,
            crate::application::dto::AuditLogDto,
            crate::application::dto::AuditLogPage
        )
    ),
    tags(
        (name = "Auth", description = "Admin login and session endpoints"),
        (name = "Logs", description = "Audit trail viewing and retention"),
        (name = "Scenarios", description = "Scenario records and their zip archives"),
        (name = "Clients", description = "Client account lookups"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Back-office API",
        description = "Admin back-office with an append-only audit trail",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("session".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));

        let url = env::var("PUBLIC_API_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| "http://localhost:8080".to_string());
        openapi.servers = Some(vec![Server::new(url)]);
    }
}

/// Swagger UI at `/docs` (which also serves `/openapi.json`) and ReDoc at `/redoc`.
pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi.clone());
    let redoc = Redoc::with_url("/redoc", openapi);
    Router::new()
        .merge(swagger)
        .merge(redoc)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

pub fn write_openapi_snapshot() -> std::io::Result<()> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| "spec/openapi.json".to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/auth/login",
            "/api/auth/logout",
            "/api/auth/check",
            "/api/logs/list",
            "/api/logs/clear",
            "/api/scenarios/create",
            "/api/scenarios/list",
            "/api/scenarios/get",
            "/api/scenarios/update",
            "/api/scenarios/delete",
            "/api/clients/check_email",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearerAuth"));
    }
}
