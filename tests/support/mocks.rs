// tests/support/mocks.rs
use async_trait::async_trait;
use backoffice_core::application::{
    ApplicationResult, error::ApplicationError, ports::security::PasswordHasher,
};
use backoffice_core::domain::client::{ClientDirectory, ClientId};
use backoffice_core::domain::errors::{DomainError, DomainResult};
use backoffice_core::domain::scenario::{
    NewScenario, Scenario, ScenarioChanges, ScenarioDetails, ScenarioId, ScenarioRepository,
};
use backoffice_core::domain::user::{AdminUser, AdminUserRepository, Email, PasswordHash, UserId};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

pub const ADMIN_ID: i64 = 1;
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse";
pub const ADMIN_NAME: &str = "Admin";
pub const CLIENT_ID: i64 = 7;
pub const CLIENT_NAME: &str = "Escape Co";
pub const CLIENT_EMAIL: &str = "client@example.com";

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
}

/// Admin table held in memory. Starts with a single admin account.
pub struct InMemoryAdminRepo {
    users: Mutex<Vec<AdminUser>>,
}

impl InMemoryAdminRepo {
    pub fn with_default_admin() -> Self {
        let admin = AdminUser {
            id: UserId::new(ADMIN_ID).unwrap(),
            email: Email::new(ADMIN_EMAIL).unwrap(),
            password_hash: PasswordHash::new(PlainPasswordHasher::encode(ADMIN_PASSWORD)).unwrap(),
            name: ADMIN_NAME.into(),
            created_at: fixed_now(),
        };
        Self {
            users: Mutex::new(vec![admin]),
        }
    }

    /// Simulates an account deleted while one of its sessions is still live.
    pub fn remove(&self, id: i64) {
        self.users.lock().unwrap().retain(|u| i64::from(u.id) != id);
    }
}

#[async_trait]
impl AdminUserRepository for InMemoryAdminRepo {
    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<AdminUser>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email.as_str()).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<AdminUser>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

/// Stores passwords as `plain::<password>` so tests skip argon2's cost.
#[derive(Clone, Debug, Default)]
pub struct PlainPasswordHasher;

impl PlainPasswordHasher {
    pub fn encode(password: &str) -> String {
        format!("plain::{password}")
    }
}

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(Self::encode(password))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if Self::encode(password) == expected_hash {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

/// Client table held in memory, starting with one client.
pub struct InMemoryClientDirectory {
    clients: Mutex<Vec<(ClientId, String, String)>>,
}

impl InMemoryClientDirectory {
    pub fn with_default_client() -> Self {
        Self {
            clients: Mutex::new(vec![(
                ClientId(CLIENT_ID),
                CLIENT_NAME.into(),
                CLIENT_EMAIL.into(),
            )]),
        }
    }

    fn lookup(&self, id: ClientId) -> Option<(String, String)> {
        let clients = self.clients.lock().unwrap();
        clients
            .iter()
            .find(|(cid, _, _)| *cid == id)
            .map(|(_, name, email)| (name.clone(), email.clone()))
    }
}

#[async_trait]
impl ClientDirectory for InMemoryClientDirectory {
    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<ClientId>> {
        let clients = self.clients.lock().unwrap();
        Ok(clients
            .iter()
            .find(|(_, _, e)| e == email.as_str())
            .map(|(id, _, _)| *id))
    }

    async fn exists(&self, id: ClientId) -> DomainResult<bool> {
        Ok(self.lookup(id).is_some())
    }
}

/// Scenario table held in memory. Each row is one minute newer than the last.
pub struct InMemoryScenarioRepo {
    rows: Mutex<Vec<Scenario>>,
    clients: Arc<InMemoryClientDirectory>,
    fail_inserts: AtomicBool,
}

impl InMemoryScenarioRepo {
    pub fn new(clients: Arc<InMemoryClientDirectory>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            clients,
            fail_inserts: AtomicBool::new(false),
        }
    }

    pub fn fail_inserts(&self) {
        self.fail_inserts.store(true, Ordering::SeqCst);
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn details(&self, scenario: Scenario) -> ScenarioDetails {
        let client = scenario.client_id.and_then(|id| self.clients.lookup(id));
        ScenarioDetails {
            creator_name: scenario
                .created_by
                .filter(|id| i64::from(*id) == ADMIN_ID)
                .map(|_| ADMIN_NAME.to_string()),
            client_name: client.as_ref().map(|(name, _)| name.clone()),
            client_email: client.map(|(_, email)| email),
            scenario,
        }
    }
}

#[async_trait]
impl ScenarioRepository for InMemoryScenarioRepo {
    async fn insert(&self, scenario: NewScenario) -> DomainResult<Scenario> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("database unavailable".into()));
        }
        let mut rows = self.rows.lock().unwrap();
        let next = rows.iter().map(|s| i64::from(s.id)).max().unwrap_or(0) + 1;
        let row = Scenario {
            id: ScenarioId(next),
            client_id: scenario.client_id,
            title: scenario.title,
            description: scenario.description,
            media_url: scenario.media_url,
            created_by: scenario.created_by,
            created_at: fixed_now() + chrono::Duration::minutes(next),
            updated_at: None,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find(&self, id: ScenarioId) -> DomainResult<Option<ScenarioDetails>> {
        let row = self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned();
        Ok(row.map(|s| self.details(s)))
    }

    async fn list(&self, client_id: Option<ClientId>) -> DomainResult<Vec<ScenarioDetails>> {
        let mut rows: Vec<Scenario> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| client_id.is_none() || s.client_id == client_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows.into_iter().map(|s| self.details(s)).collect())
    }

    async fn update(
        &self,
        id: ScenarioId,
        changes: ScenarioChanges,
    ) -> DomainResult<Option<Scenario>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        row.title = changes.title;
        row.description = changes.description;
        row.media_url = changes.media_url;
        row.updated_at = Some(fixed_now() + chrono::Duration::days(1));
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: ScenarioId) -> DomainResult<Option<Scenario>> {
        let mut rows = self.rows.lock().unwrap();
        let index = rows.iter().position(|s| s.id == id);
        Ok(index.map(|i| rows.remove(i)))
    }
}
