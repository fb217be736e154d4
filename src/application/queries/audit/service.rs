use std::sync::Arc;

use crate::domain::audit::AuditStore;

pub struct AuditQueryService {
    pub(super) store: Arc<dyn AuditStore>,
}

impl AuditQueryService {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }
}
