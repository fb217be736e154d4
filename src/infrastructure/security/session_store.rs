use crate::application::ApplicationResult;
use crate::application::error::ApplicationError;
use crate::application::ports::session::{Session, SessionStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Process-local session table. Sessions do not survive a restart.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> ApplicationResult<MutexGuard<'_, HashMap<String, Session>>> {
        self.sessions
            .lock()
            .map_err(|_| ApplicationError::infrastructure("session store lock poisoned"))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: Session) -> ApplicationResult<()> {
        self.table()?.insert(session.id.clone(), session);
        Ok(())
    }

    async fn resolve(&self, session_id: &str) -> ApplicationResult<Option<Session>> {
        Ok(self.table()?.get(session_id).cloned())
    }

    async fn revoke(&self, session_id: &str) -> ApplicationResult<()> {
        self.table()?.remove(session_id);
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> ApplicationResult<usize> {
        let mut table = self.table()?;
        let before = table.len();
        table.retain(|_, session| !session.is_expired(now));
        Ok(before - table.len())
    }
}
