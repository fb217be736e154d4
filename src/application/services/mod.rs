// src/application/services/mod.rs
use std::sync::Arc;

use chrono::Duration;

use crate::{
    application::{
        commands::{
            audit::AuditCommandService, auth::AuthCommandService,
            scenarios::ScenarioCommandService,
        },
        dto::AuthenticatedAdmin,
        error::ApplicationResult,
        ports::{
            media::MediaStore, security::PasswordHasher, session::SessionStore, time::Clock,
        },
        queries::{
            audit::AuditQueryService, clients::ClientQueryService,
            scenarios::ScenarioQueryService,
        },
    },
    domain::{
        audit::AuditStore, client::ClientDirectory, scenario::ScenarioRepository,
        user::AdminUserRepository,
    },
};

/// Everything a request handler needs, built once at startup and shared.
pub struct ApplicationServices {
    pub audit_commands: Arc<AuditCommandService>,
    pub audit_queries: Arc<AuditQueryService>,
    pub auth_commands: Arc<AuthCommandService>,
    pub scenario_commands: Arc<ScenarioCommandService>,
    pub scenario_queries: Arc<ScenarioQueryService>,
    pub client_queries: Arc<ClientQueryService>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        audit_store: Arc<dyn AuditStore>,
        user_repo: Arc<dyn AdminUserRepository>,
        scenario_repo: Arc<dyn ScenarioRepository>,
        client_directory: Arc<dyn ClientDirectory>,
        media_store: Arc<dyn MediaStore>,
        password_hasher: Arc<dyn PasswordHasher>,
        session_store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        session_ttl: Duration,
    ) -> Self {
        let audit_commands = Arc::new(AuditCommandService::new(
            Arc::clone(&audit_store),
            Arc::clone(&clock),
        ));
        let audit_queries = Arc::new(AuditQueryService::new(Arc::clone(&audit_store)));
        let auth_commands = Arc::new(AuthCommandService::new(
            user_repo,
            password_hasher,
            session_store,
            clock,
            session_ttl,
        ));

        let scenario_commands = Arc::new(ScenarioCommandService::new(
            Arc::clone(&scenario_repo),
            Arc::clone(&client_directory),
            media_store,
        ));
        let scenario_queries = Arc::new(ScenarioQueryService::new(scenario_repo));
        let client_queries = Arc::new(ClientQueryService::new(client_directory));

        Self {
            audit_commands,
            audit_queries,
            auth_commands,
            scenario_commands,
            scenario_queries,
            client_queries,
        }
    }

    /// Resolve a raw bearer token to an authenticated admin.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedAdmin> {
        self.auth_commands.authenticate(token).await
    }
}
