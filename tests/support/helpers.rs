// tests/support/helpers.rs
use super::mocks::{
    self, ADMIN_EMAIL, ADMIN_PASSWORD, InMemoryAdminRepo, InMemoryClientDirectory,
    InMemoryScenarioRepo, PlainPasswordHasher,
};
use axum::Router;
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header::AUTHORIZATION};
use axum::response::Response;
use backoffice_core::application::services::ApplicationServices;
use backoffice_core::domain::audit::{AuditRecord, AuditStore};
use backoffice_core::domain::{scenario::ScenarioRepository, user::AdminUserRepository};
use backoffice_core::infrastructure::{
    audit::JsonlAuditStore, media::LocalMediaStore,
    security::session_store::InMemorySessionStore, time::FixedClock,
};
use backoffice_core::presentation::http::{
    routes::build_router_with_rate_limiter,
    state::{HttpSettings, HttpState},
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt as _;

pub const MAX_PAGE_SIZE: usize = 50;

pub const BOUNDARY: &str = "----backoffice-test-boundary";

/// A router wired to real services over a temporary audit file and upload
/// directory.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<JsonlAuditStore>,
    pub users: Arc<InMemoryAdminRepo>,
    pub scenarios: Arc<InMemoryScenarioRepo>,
    pub uploads: PathBuf,
    _dir: TempDir,
}

pub fn make_test_app() -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(JsonlAuditStore::new(dir.path().join("logs").join("api.log")));
    let users = Arc::new(InMemoryAdminRepo::with_default_admin());
    let clients = Arc::new(InMemoryClientDirectory::with_default_client());
    let scenarios = Arc::new(InMemoryScenarioRepo::new(Arc::clone(&clients)));
    let uploads = dir.path().join("uploads");

    let services = Arc::new(ApplicationServices::new(
        Arc::clone(&store) as Arc<dyn AuditStore>,
        Arc::clone(&users) as Arc<dyn AdminUserRepository>,
        Arc::clone(&scenarios) as Arc<dyn ScenarioRepository>,
        clients,
        Arc::new(LocalMediaStore::new(uploads.clone())),
        Arc::new(PlainPasswordHasher),
        Arc::new(InMemorySessionStore::new()),
        Arc::new(FixedClock(mocks::fixed_now())),
        chrono::Duration::hours(1),
    ));

    let state = HttpState {
        services,
        settings: Arc::new(HttpSettings {
            max_page_size: MAX_PAGE_SIZE,
            allowed_origins: vec!["http://localhost:5173".into()],
        }),
    };

    TestApp {
        router: build_router_with_rate_limiter(state, false),
        store,
        users,
        scenarios,
        uploads,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Response {
        self.router.clone().oneshot(req).await.expect("router call")
    }

    /// Logs the default admin in and returns the session token.
    pub async fn login(&self) -> String {
        let resp = self
            .send(json_request(
                Method::POST,
                "/api/auth/login",
                &serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
            ))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        json["token"].as_str().expect("token").to_string()
    }
}

impl TestApp {
    /// The most recent audit record.
    pub async fn last_record(&self) -> AuditRecord {
        let page = self.store.read_page(1, 0).await.expect("read audit trail");
        page.records.into_iter().next().expect("at least one audit record")
    }

    /// Names of the files under the scenario upload directory.
    pub fn stored_archives(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.uploads.join("scenarios")) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// A file part of a multipart form: field name, file name, contents.
pub type FilePart<'a> = (&'a str, &'a str, &'a [u8]);

pub fn multipart_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    fields: &[(&str, &str)],
    file: Option<FilePart<'_>>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, file_name, contents)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(contents);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authed(method: Method, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(resp: Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json = body_json(resp).await;
    assert_eq!(json["error"].as_str(), Some(expected_error));
    assert!(
        json["message"].as_str().is_some_and(|m| !m.is_empty()),
        "expected non-empty message field in ErrorResponse"
    );
}
