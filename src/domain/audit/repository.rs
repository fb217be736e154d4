// src/domain/audit/repository.rs
use crate::domain::audit::entity::AuditRecord;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// A slice of the audit trail, newest record first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditPage {
    pub records: Vec<AuditRecord>,
    /// Well-formed records in the whole trail, taken from the same read as `records`.
    pub total: u64,
    /// Lines that could not be decoded while scanning the trail.
    pub skipped: usize,
}

/// Append-only storage for [`AuditRecord`]s.
///
/// Implementations must never interleave two appends: a reader sees either a
/// whole record or nothing. The only destructive operation is [`clear`],
/// which drops the entire trail.
///
/// [`clear`]: AuditStore::clear
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn append(&self, record: &AuditRecord) -> DomainResult<()>;

    /// Records in reverse write order, skipping `offset` then taking `limit`.
    async fn read_page(&self, limit: usize, offset: usize) -> DomainResult<AuditPage>;

    async fn count(&self) -> DomainResult<u64>;

    /// Deletes the whole trail. Clearing an empty or missing store succeeds.
    async fn clear(&self) -> DomainResult<()>;
}
