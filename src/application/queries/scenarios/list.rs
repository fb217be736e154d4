use super::ScenarioQueryService;
use crate::{
    application::{
        dto::{AuthenticatedAdmin, ScenarioDto},
        error::ApplicationResult,
    },
    domain::client::ClientId,
};

#[derive(Debug, Default)]
pub struct ListScenariosQuery {
    pub client_id: Option<i64>,
}

impl ScenarioQueryService {
    /// Every scenario, newest first, optionally for a single client.
    pub async fn list(
        &self,
        actor: &AuthenticatedAdmin,
        query: ListScenariosQuery,
    ) -> ApplicationResult<Vec<ScenarioDto>> {
        let client_id = query.client_id.map(ClientId::new).transpose()?;
        let scenarios = self.scenarios.list(client_id).await?;

        tracing::debug!(
            actor = %actor.id,
            client_id = ?query.client_id,
            returned = scenarios.len(),
            "scenarios listed"
        );
        Ok(scenarios.into_iter().map(ScenarioDto::from).collect())
    }
}
