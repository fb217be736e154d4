// src/infrastructure/repositories/postgres_admin_user.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{AdminUser, AdminUserRepository, Email, NewAdminUser, PasswordHash, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresAdminUserRepository {
    pool: PgPool,
}

impl PostgresAdminUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the admin, or replace the password and name of an existing
    /// admin with the same email.
    pub async fn upsert(&self, new_user: NewAdminUser) -> DomainResult<AdminUser> {
        let NewAdminUser {
            email,
            password_hash,
            name,
        } = new_user;

        let row = sqlx::query_as::<_, AdminUserRow>(
            "INSERT INTO admin_users (email, password, name)
             VALUES ($1, $2, $3)
             ON CONFLICT (email) DO UPDATE
                 SET password = EXCLUDED.password, name = EXCLUDED.name
             RETURNING id, email, password, name, created_at",
        )
        .bind(email.as_str())
        .bind(password_hash.as_str())
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        AdminUser::try_from(row)
    }
}

#[derive(Debug, FromRow)]
struct AdminUserRow {
    id: i64,
    email: String,
    password: String,
    name: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminUserRow> for AdminUser {
    type Error = DomainError;

    fn try_from(row: AdminUserRow) -> Result<Self, Self::Error> {
        Ok(AdminUser {
            id: UserId::new(row.id)?,
            email: Email::new(row.email)?,
            password_hash: PasswordHash::new(row.password)?,
            name: row.name,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl AdminUserRepository for PostgresAdminUserRepository {
    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<AdminUser>> {
        let row = sqlx::query_as::<_, AdminUserRow>(
            "SELECT id, email, password, name, created_at
             FROM admin_users WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(AdminUser::try_from).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<AdminUser>> {
        let row = sqlx::query_as::<_, AdminUserRow>(
            "SELECT id, email, password, name, created_at
             FROM admin_users WHERE id = $1",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(AdminUser::try_from).transpose()
    }
}
