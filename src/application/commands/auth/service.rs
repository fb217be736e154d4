use std::sync::Arc;

use chrono::Duration;

use crate::{
    application::ports::{security::PasswordHasher, session::SessionStore, time::Clock},
    domain::user::AdminUserRepository,
};

pub struct AuthCommandService {
    pub(super) user_repo: Arc<dyn AdminUserRepository>,
    pub(super) password_hasher: Arc<dyn PasswordHasher>,
    pub(super) session_store: Arc<dyn SessionStore>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) session_ttl: Duration,
}

impl AuthCommandService {
    pub fn new(
        user_repo: Arc<dyn AdminUserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        session_store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            user_repo,
            password_hasher,
            session_store,
            clock,
            session_ttl,
        }
    }
}
