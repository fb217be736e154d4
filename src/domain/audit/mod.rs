// src/domain/audit/mod.rs
pub mod entity;
pub mod repository;

pub use entity::{AuditEntry, AuditRecord, TIMESTAMP_FORMAT, UNKNOWN, format_timestamp};
pub use repository::{AuditPage, AuditStore};
