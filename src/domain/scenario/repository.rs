use crate::domain::client::ClientId;
use crate::domain::errors::DomainResult;
use crate::domain::scenario::entity::{
    NewScenario, Scenario, ScenarioChanges, ScenarioDetails, ScenarioId,
};
use async_trait::async_trait;

#[async_trait]
pub trait ScenarioRepository: Send + Sync {
    async fn insert(&self, scenario: NewScenario) -> DomainResult<Scenario>;

    async fn find(&self, id: ScenarioId) -> DomainResult<Option<ScenarioDetails>>;

    /// Newest first, optionally restricted to one client.
    async fn list(&self, client_id: Option<ClientId>) -> DomainResult<Vec<ScenarioDetails>>;

    /// Returns `None` when no scenario has this id.
    async fn update(&self, id: ScenarioId, changes: ScenarioChanges)
    -> DomainResult<Option<Scenario>>;

    /// Returns the removed row, or `None` when no scenario has this id.
    async fn delete(&self, id: ScenarioId) -> DomainResult<Option<Scenario>>;
}
