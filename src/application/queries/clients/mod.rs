use std::sync::Arc;

use crate::{
    application::{
        dto::AuthenticatedAdmin,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{client::ClientDirectory, user::Email},
};

pub struct ClientQueryService {
    clients: Arc<dyn ClientDirectory>,
}

impl ClientQueryService {
    pub fn new(clients: Arc<dyn ClientDirectory>) -> Self {
        Self { clients }
    }

    /// Whether a client account is registered under this email.
    pub async fn email_exists(
        &self,
        actor: &AuthenticatedAdmin,
        email: &str,
    ) -> ApplicationResult<bool> {
        if email.trim().is_empty() {
            return Err(ApplicationError::validation("Email parameter is required"));
        }
        let email = Email::new(email)?;
        let exists = self.clients.find_by_email(&email).await?.is_some();

        tracing::debug!(actor = %actor.id, exists, "client email checked");
        Ok(exists)
    }
}
