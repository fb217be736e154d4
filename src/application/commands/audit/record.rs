use super::AuditCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::audit::{AuditEntry, AuditRecord},
};

impl AuditCommandService {
    /// Append one record describing a handled request.
    ///
    /// The append completes before this returns. Failures are reported to the
    /// caller, which decides whether the request should still succeed.
    pub async fn record(&self, entry: AuditEntry) -> ApplicationResult<AuditRecord> {
        let record = AuditRecord::from_entry(entry, self.clock.now());
        self.store
            .append(&record)
            .await
            .map_err(|err| ApplicationError::infrastructure(format!("audit append failed: {err}")))?;

        tracing::trace!(
            endpoint = %record.endpoint,
            action = %record.action,
            status = record.status_code,
            "audit record appended"
        );
        Ok(record)
    }
}
