use super::{ScenarioCommandService, UploadedArchive};
use crate::{
    application::{
        dto::{AuthenticatedAdmin, ScenarioDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::scenario::{ScenarioChanges, ScenarioId},
};

pub struct UpdateScenarioCommand {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Replaces the current archive, which is deleted once the row is updated.
    pub archive: Option<UploadedArchive>,
}

impl ScenarioCommandService {
    pub async fn update(
        &self,
        actor: &AuthenticatedAdmin,
        command: UpdateScenarioCommand,
    ) -> ApplicationResult<ScenarioDto> {
        let id = ScenarioId::new(command.id)?;
        let current = self
            .scenarios
            .find(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Scenario not found"))?
            .scenario;

        let title = command.title.unwrap_or(current.title);
        let description = command.description.unwrap_or(current.description);
        let mut changes = ScenarioChanges::new(&title, &description, current.media_url.clone())?;

        let replacement = self.store_archive(command.archive).await?;
        if replacement.is_some() {
            changes.media_url.clone_from(&replacement);
        }

        let updated = match self.scenarios.update(id, changes).await {
            Ok(Some(updated)) => updated,
            outcome => {
                if let Some(url) = &replacement {
                    self.discard_archive(url).await;
                }
                return match outcome {
                    Err(err) => Err(err.into()),
                    _ => Err(ApplicationError::not_found("Scenario not found")),
                };
            }
        };

        if let (Some(_), Some(old)) = (&replacement, &current.media_url) {
            self.discard_archive(old).await;
        }

        tracing::info!(scenario_id = %id, actor = %actor.id, "scenario updated");
        Ok(updated.into())
    }
}
