use std::sync::Arc;

use crate::{
    application::ports::media::MediaStore,
    domain::{client::ClientDirectory, scenario::ScenarioRepository},
};

pub struct ScenarioCommandService {
    pub(super) scenarios: Arc<dyn ScenarioRepository>,
    pub(super) clients: Arc<dyn ClientDirectory>,
    pub(super) media: Arc<dyn MediaStore>,
}

impl ScenarioCommandService {
    pub fn new(
        scenarios: Arc<dyn ScenarioRepository>,
        clients: Arc<dyn ClientDirectory>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            scenarios,
            clients,
            media,
        }
    }
}
