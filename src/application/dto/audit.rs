use crate::domain::audit::AuditRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuditLogDto {
    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    pub endpoint: String,
    pub method: String,
    pub action: String,
    pub user_id: Option<i64>,
    pub ip: String,
    pub user_agent: String,
    #[schema(value_type = Object)]
    pub data: Map<String, Value>,
    #[schema(value_type = Option<Object>)]
    pub response: Option<Map<String, Value>>,
    pub status_code: u16,
}

impl From<AuditRecord> for AuditLogDto {
    fn from(r: AuditRecord) -> Self {
        Self {
            timestamp: r.timestamp,
            endpoint: r.endpoint,
            method: r.method,
            action: r.action,
            user_id: r.user_id,
            ip: r.ip,
            user_agent: r.user_agent,
            data: r.data,
            response: r.response,
            status_code: r.status_code,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogPage {
    pub logs: Vec<AuditLogDto>,
    pub total: u64,
    pub limit: usize,
    pub offset: usize,
    /// Corrupt lines passed over while reading this page.
    pub skipped: usize,
}
