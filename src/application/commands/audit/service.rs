use std::sync::Arc;

use crate::{application::ports::time::Clock, domain::audit::AuditStore};

pub struct AuditCommandService {
    pub(super) store: Arc<dyn AuditStore>,
    pub(super) clock: Arc<dyn Clock>,
}

impl AuditCommandService {
    pub fn new(store: Arc<dyn AuditStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}
