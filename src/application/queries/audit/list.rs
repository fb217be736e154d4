use super::AuditQueryService;
use crate::application::{
    dto::{AuditLogDto, AuditLogPage, AuthenticatedAdmin},
    error::ApplicationResult,
};

pub struct ListAuditLogsQuery {
    pub limit: usize,
    pub offset: usize,
}

impl AuditQueryService {
    /// Newest-first page of the audit trail together with the total record count.
    ///
    /// `limit` is taken as given; callers at the HTTP boundary cap it.
    pub async fn list(
        &self,
        actor: &AuthenticatedAdmin,
        query: ListAuditLogsQuery,
    ) -> ApplicationResult<AuditLogPage> {
        let page = self.store.read_page(query.limit, query.offset).await?;

        if page.skipped > 0 {
            tracing::warn!(
                skipped = page.skipped,
                "audit trail contains unreadable lines"
            );
        }
        tracing::debug!(
            actor = %actor.id,
            limit = query.limit,
            offset = query.offset,
            returned = page.records.len(),
            "audit trail read"
        );

        Ok(AuditLogPage {
            logs: page.records.into_iter().map(AuditLogDto::from).collect(),
            total: page.total,
            limit: query.limit,
            offset: query.offset,
            skipped: page.skipped,
        })
    }

    pub async fn count(&self) -> ApplicationResult<u64> {
        Ok(self.store.count().await?)
    }
}
