// src/domain/user/entity.rs
use crate::domain::user::value_objects::{Email, PasswordHash, UserId};
use chrono::{DateTime, Utc};

/// Back-office operator allowed to sign in and read the audit trail.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: UserId,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAdminUser {
    pub email: Email,
    pub password_hash: PasswordHash,
    pub name: String,
}

impl NewAdminUser {
    pub fn new(email: Email, password_hash: PasswordHash, name: impl Into<String>) -> Self {
        Self {
            email,
            password_hash,
            name: name.into(),
        }
    }
}
