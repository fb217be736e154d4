use super::ScenarioQueryService;
use crate::{
    application::{
        dto::ScenarioDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::scenario::ScenarioId,
};

impl ScenarioQueryService {
    pub async fn get(&self, id: i64) -> ApplicationResult<ScenarioDto> {
        let id = ScenarioId::new(id)?;
        self.scenarios
            .find(id)
            .await?
            .map(ScenarioDto::from)
            .ok_or_else(|| ApplicationError::not_found("Scenario not found"))
    }
}
