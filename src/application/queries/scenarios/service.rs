use std::sync::Arc;

use crate::domain::scenario::ScenarioRepository;

pub struct ScenarioQueryService {
    pub(super) scenarios: Arc<dyn ScenarioRepository>,
}

impl ScenarioQueryService {
    pub fn new(scenarios: Arc<dyn ScenarioRepository>) -> Self {
        Self { scenarios }
    }
}
