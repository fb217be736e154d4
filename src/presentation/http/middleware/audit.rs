// src/presentation/http/middleware/audit.rs
use crate::application::dto::AuthenticatedAdmin;
use crate::domain::audit::AuditEntry;
use crate::presentation::http::error::HttpError;
use crate::presentation::http::extractors::bearer_token;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension,
    body::{Body, to_bytes},
    extract::{ConnectInfo, MatchedPath, Request},
    http::{
        HeaderMap, StatusCode,
        header::{CONTENT_TYPE, USER_AGENT},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde_json::{Map, Value};
use std::net::SocketAddr;
use tracing::warn;

/// Largest request body the audit layer will buffer.
pub const MAX_CAPTURED_BODY: usize = 64 * 1024;

const REDACTED: &str = "[redacted]";
const SECRET_KEYS: &[&str] = &["password", "token", "refresh_token", "authorization"];

/// Set by a handler on its response when the acting admin is not the one
/// holding the request's session, e.g. a login that has just opened one.
#[derive(Debug, Clone, Copy)]
pub struct AuditActor(pub i64);

/// Set by a handler on its response to record these fields in place of the
/// request body, e.g. the text fields of an upload form.
#[derive(Debug, Clone)]
pub struct AuditData(pub Value);

/// Everything about the request that is known before the handler runs.
struct RequestTrace {
    endpoint: String,
    action: String,
    method: String,
    query: Option<String>,
    ip: Option<String>,
    user_agent: Option<String>,
    user_id: Option<i64>,
}

impl RequestTrace {
    fn entry(self, status: StatusCode, data: Value, response: Option<Value>) -> AuditEntry {
        AuditEntry::new(self.endpoint, self.method, self.action, status.as_u16())
            .with_user_id(self.user_id)
            .with_caller(self.ip, self.user_agent)
            .with_data(data)
            .with_response(response)
    }
}

/// Appends one audit record per handled request, error responses included.
///
/// Installed per route so the matched path is known and the route's 405
/// fallback is audited too. Multipart bodies are not buffered; handlers
/// describe them with [`AuditData`].
pub async fn audit_requests(
    Extension(state): Extension<HttpState>,
    req: Request,
    next: Next,
) -> Response {
    let caller = resolve_caller(&state, req.headers()).await;
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_string(), |p| p.as_str().to_string());
    let (endpoint, action) = endpoint_and_action(&route, &method);
    let query = req.uri().query().map(str::to_string);
    let multipart = is_multipart(req.headers());

    let trace = RequestTrace {
        endpoint,
        action,
        method,
        query: query.clone(),
        ip: client_ip(&req),
        user_agent: req
            .headers()
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        user_id: caller.map(|admin| admin.id.into()),
    };

    if multipart {
        let data = request_snapshot(&[], query.as_deref());
        let response = next.run(req).await;
        return finish(&state, trace, data, response).await;
    }

    let (parts, body) = req.into_parts();
    let Ok(body) = to_bytes(body, MAX_CAPTURED_BODY).await else {
        let response =
            HttpError::new(StatusCode::PAYLOAD_TOO_LARGE, "request body too large").into_response();
        let data = request_snapshot(&[], query.as_deref());
        return finish(&state, trace, data, response).await;
    };
    let data = request_snapshot(&body, query.as_deref());

    let response = next.run(Request::from_parts(parts, Body::from(body))).await;
    finish(&state, trace, data, response).await
}

async fn finish(
    state: &HttpState,
    mut trace: RequestTrace,
    mut data: Value,
    response: Response,
) -> Response {
    if let Some(AuditActor(id)) = response.extensions().get::<AuditActor>() {
        trace.user_id = Some(*id);
    }
    if let Some(AuditData(fields)) = response.extensions().get::<AuditData>() {
        data = fields_snapshot(Some(fields.clone()), trace.query.as_deref());
    }
    let status = response.status();

    let (parts, body) = response.into_parts();
    // Audited handlers only ever answer with small JSON documents.
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(error = %err, "failed to buffer response body for audit");
            Bytes::new()
        }
    };

    let endpoint = trace.endpoint.clone();
    let action = trace.action.clone();
    let entry = trace.entry(status, data, response_snapshot(&bytes));
    if let Err(err) = state.services.audit_commands.record(entry).await {
        warn!(error = %err, %endpoint, %action, "audit record dropped");
    }

    Response::from_parts(parts, Body::from(bytes))
}

async fn resolve_caller(state: &HttpState, headers: &HeaderMap) -> Option<AuthenticatedAdmin> {
    let token = bearer_token(headers)?;
    state.services.authenticate(&token).await.ok()
}

/// Splits a route template into the logical resource and operation.
///
/// `/api/auth/login` gives `("auth", "login")`. Path parameters and the `api`
/// prefix are ignored; a single remaining segment is paired with the verb.
fn endpoint_and_action(route: &str, method: &str) -> (String, String) {
    let segments: Vec<&str> = route
        .split('/')
        .filter(|s| !s.is_empty() && *s != "api" && !s.starts_with('{'))
        .collect();

    match segments.as_slice() {
        [] => ("root".into(), method.to_ascii_lowercase()),
        [only] => ((*only).into(), method.to_ascii_lowercase()),
        [.., resource, action] => ((*resource).into(), (*action).into()),
    }
}

fn client_ip(req: &Request) -> Option<String> {
    let headers = req.headers();
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    header("x-forwarded-for")
        .or_else(|| header("x-real-ip"))
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| {
            v.trim_start()
                .get(..10)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("multipart/"))
        })
}

fn request_snapshot(body: &[u8], query: Option<&str>) -> Value {
    fields_snapshot(serde_json::from_slice::<Value>(body).ok(), query)
}

/// Request fields merged with the query string, secrets redacted.
fn fields_snapshot(fields: Option<Value>, query: Option<&str>) -> Value {
    let mut data = match fields {
        Some(Value::Object(map)) => map,
        Some(other) => {
            let mut map = Map::new();
            map.insert("body".into(), other);
            map
        }
        None => Map::new(),
    };

    if let Some(query) = query {
        match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
            Ok(pairs) => {
                for (key, value) in pairs {
                    data.entry(key).or_insert(Value::String(value));
                }
            }
            Err(err) => warn!(error = %err, "unparsable query string left out of audit record"),
        }
    }

    let mut data = Value::Object(data);
    redact(&mut data);
    data
}

fn response_snapshot(body: &[u8]) -> Option<Value> {
    let mut value = serde_json::from_slice::<Value>(body).ok()?;
    redact(&mut value);
    Some(value)
}

fn redact(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map.iter_mut() {
                if SECRET_KEYS.iter().any(|k| key.eq_ignore_ascii_case(k)) {
                    *inner = Value::String(REDACTED.into());
                } else {
                    redact(inner);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact),
        _ => {}
    }
}
