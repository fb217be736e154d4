use super::AuditCommandService;
use crate::application::{
    dto::AuthenticatedAdmin,
    error::{ApplicationError, ApplicationResult},
};

impl AuditCommandService {
    /// Drop the entire audit trail. Irreversible; idempotent on an empty trail.
    pub async fn clear(&self, actor: &AuthenticatedAdmin) -> ApplicationResult<()> {
        self.store.clear().await.map_err(|err| {
            tracing::error!(actor = %actor.id, error = %err, "failed to clear audit trail");
            ApplicationError::infrastructure(format!("failed to clear logs: {err}"))
        })?;

        tracing::info!(actor = %actor.id, "audit trail cleared");
        Ok(())
    }
}
