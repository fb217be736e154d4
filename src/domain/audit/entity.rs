// src/domain/audit/entity.rs
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Layout of [`AuditRecord::timestamp`], rendered in the server's local time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Placeholder for caller metadata the transport could not provide.
pub const UNKNOWN: &str = "unknown";

/// What a request handler knows about a call it has just finished.
///
/// The timestamp is not part of the entry; it is assigned when the entry is
/// turned into an [`AuditRecord`].
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub endpoint: String,
    pub method: String,
    pub action: String,
    pub user_id: Option<i64>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub data: Value,
    pub response: Option<Value>,
    pub status_code: u16,
}

impl AuditEntry {
    pub fn new(
        endpoint: impl Into<String>,
        method: impl Into<String>,
        action: impl Into<String>,
        status_code: u16,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: method.into(),
            action: action.into(),
            user_id: None,
            ip: None,
            user_agent: None,
            data: Value::Object(Map::new()),
            response: None,
            status_code,
        }
    }

    pub fn with_user_id(mut self, user_id: Option<i64>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_caller(mut self, ip: Option<String>, user_agent: Option<String>) -> Self {
        self.ip = ip;
        self.user_agent = user_agent;
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn with_response(mut self, response: Option<Value>) -> Self {
        self.response = response;
        self
    }
}

/// One line of the audit trail. Never mutated after it has been written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub timestamp: String,
    pub endpoint: String,
    pub method: String,
    pub action: String,
    pub user_id: Option<i64>,
    pub ip: String,
    pub user_agent: String,
    #[serde(deserialize_with = "object_or_empty_list")]
    pub data: Map<String, Value>,
    pub response: Option<Map<String, Value>>,
    pub status_code: u16,
}

impl AuditRecord {
    pub fn from_entry(entry: AuditEntry, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: format_timestamp(at),
            endpoint: entry.endpoint,
            method: entry.method,
            action: entry.action,
            user_id: entry.user_id,
            ip: non_blank_or_unknown(entry.ip),
            user_agent: non_blank_or_unknown(entry.user_agent),
            data: into_object(entry.data),
            response: entry.response.map(into_object),
            status_code: entry.status_code,
        }
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

fn non_blank_or_unknown(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => UNKNOWN.to_string(),
    }
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("value".into(), other);
            map
        }
    }
}

// Older writers encoded an empty payload as `[]`.
fn object_or_empty_list<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        Value::Array(items) if items.is_empty() => Ok(Map::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected object for data, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeZone};
    use serde_json::json;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap()
    }

    #[test]
    fn missing_caller_metadata_becomes_unknown() {
        let entry = AuditEntry::new("scenarios", "GET", "list", 200)
            .with_caller(None, Some("   ".into()));
        let record = AuditRecord::from_entry(entry, at());
        assert_eq!(record.ip, UNKNOWN);
        assert_eq!(record.user_agent, UNKNOWN);
    }

    #[test]
    fn timestamp_uses_fixed_layout() {
        let record = AuditRecord::from_entry(AuditEntry::new("auth", "POST", "login", 200), at());
        assert_eq!(record.timestamp.len(), 19);
        NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_FORMAT)
            .expect("timestamp should parse back");
    }

    #[test]
    fn scalar_payloads_are_wrapped() {
        let entry = AuditEntry::new("auth", "POST", "login", 400)
            .with_data(json!("raw body"))
            .with_response(Some(Value::Null));
        let record = AuditRecord::from_entry(entry, at());
        assert_eq!(record.data.get("value"), Some(&json!("raw body")));
        assert_eq!(record.response, Some(Map::new()));
    }

    #[test]
    fn serialized_record_keeps_explicit_nulls() {
        let record = AuditRecord::from_entry(AuditEntry::new("auth", "GET", "check", 200), at());
        let line = serde_json::to_string(&record).unwrap();
        assert!(line.contains("\"user_id\":null"));
        assert!(line.contains("\"response\":null"));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn legacy_empty_list_payload_is_accepted() {
        let line = r#"{"timestamp":"2024-01-01 00:00:00","endpoint":"scenarios","method":"GET","action":"list","user_id":1,"ip":"127.0.0.1","user_agent":"curl","data":[],"response":{"count":0},"status_code":200}"#;
        let record: AuditRecord = serde_json::from_str(line).unwrap();
        assert!(record.data.is_empty());
        assert_eq!(record.user_id, Some(1));
    }

    #[test]
    fn non_empty_list_payload_is_rejected() {
        let line = r#"{"timestamp":"2024-01-01 00:00:00","endpoint":"x","method":"GET","action":"y","user_id":null,"ip":"a","user_agent":"b","data":[1],"response":null,"status_code":200}"#;
        assert!(serde_json::from_str::<AuditRecord>(line).is_err());
    }
}
