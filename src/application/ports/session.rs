use crate::application::ApplicationResult;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, session: Session) -> ApplicationResult<()>;

    /// Look up a session by id. Expiry is not checked here.
    async fn resolve(&self, session_id: &str) -> ApplicationResult<Option<Session>>;

    /// Drop the session. Revoking an unknown id is not an error.
    async fn revoke(&self, session_id: &str) -> ApplicationResult<()>;

    /// Drop every session expired at `now`; returns how many were removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> ApplicationResult<usize>;
}
