use super::ScenarioCommandService;
use crate::{
    application::{
        dto::AuthenticatedAdmin,
        error::{ApplicationError, ApplicationResult},
    },
    domain::scenario::ScenarioId,
};

pub struct DeleteScenarioCommand {
    pub id: i64,
}

impl ScenarioCommandService {
    /// Remove the scenario row, then its archive.
    pub async fn delete(
        &self,
        actor: &AuthenticatedAdmin,
        command: DeleteScenarioCommand,
    ) -> ApplicationResult<()> {
        let id = ScenarioId::new(command.id)?;
        let removed = self
            .scenarios
            .delete(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Scenario not found"))?;

        if let Some(url) = &removed.media_url {
            self.discard_archive(url).await;
        }

        tracing::info!(scenario_id = %id, actor = %actor.id, "scenario deleted");
        Ok(())
    }
}
