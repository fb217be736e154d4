use super::AuthCommandService;
use crate::application::{dto::AuthenticatedAdmin, error::ApplicationResult};

impl AuthCommandService {
    pub async fn logout(&self, actor: Option<&AuthenticatedAdmin>) -> ApplicationResult<()> {
        if let Some(actor) = actor {
            self.session_store.revoke(&actor.session_id).await?;
            tracing::info!(user_id = %actor.id, "admin signed out");
        }
        Ok(())
    }
}
