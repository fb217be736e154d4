// src/domain/client/mod.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::Email;
use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub i64);

impl ClientId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("client id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ClientId> for i64 {
    fn from(value: ClientId) -> Self {
        value.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only view of the customer accounts scenarios are filed under.
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<ClientId>>;

    async fn exists(&self, id: ClientId) -> DomainResult<bool>;
}
