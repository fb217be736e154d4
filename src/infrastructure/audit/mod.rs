// src/infrastructure/audit/mod.rs
mod jsonl_store;

pub use jsonl_store::JsonlAuditStore;
