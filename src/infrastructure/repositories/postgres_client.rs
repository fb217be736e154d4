// src/infrastructure/repositories/postgres_client.rs
use super::map_sqlx;
use crate::domain::client::{ClientDirectory, ClientId};
use crate::domain::errors::DomainResult;
use crate::domain::user::Email;
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PostgresClientDirectory {
    pool: PgPool,
}

impl PostgresClientDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientDirectory for PostgresClientDirectory {
    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<ClientId>> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM clients WHERE email = $1")
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        id.map(ClientId::new).transpose()
    }

    async fn exists(&self, id: ClientId) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM clients WHERE id = $1)")
            .bind(i64::from(id))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}
