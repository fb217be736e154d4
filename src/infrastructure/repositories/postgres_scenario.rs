// src/infrastructure/repositories/postgres_scenario.rs
use super::map_sqlx;
use crate::domain::client::ClientId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::scenario::{
    NewScenario, Scenario, ScenarioChanges, ScenarioDetails, ScenarioId, ScenarioRepository,
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const SCENARIO_COLUMNS: &str =
    "id, client_id, title, description, media_url, created_by, created_at, updated_at";

const DETAILS_SELECT: &str = "SELECT s.id, s.client_id, s.title, s.description, s.media_url,
        s.created_by, s.created_at, s.updated_at,
        a.name AS creator_name, c.name AS client_name, c.email AS client_email
     FROM scenarios s
     LEFT JOIN admin_users a ON s.created_by = a.id
     LEFT JOIN clients c ON s.client_id = c.id";

#[derive(Clone)]
pub struct PostgresScenarioRepository {
    pool: PgPool,
}

impl PostgresScenarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScenarioRow {
    id: i64,
    client_id: Option<i64>,
    title: String,
    description: String,
    media_url: Option<String>,
    created_by: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, FromRow)]
struct ScenarioDetailsRow {
    #[sqlx(flatten)]
    scenario: ScenarioRow,
    creator_name: Option<String>,
    client_name: Option<String>,
    client_email: Option<String>,
}

impl TryFrom<ScenarioRow> for Scenario {
    type Error = DomainError;

    fn try_from(row: ScenarioRow) -> Result<Self, Self::Error> {
        Ok(Scenario {
            id: ScenarioId::new(row.id)?,
            client_id: row.client_id.map(ClientId::new).transpose()?,
            title: row.title,
            description: row.description,
            media_url: row.media_url,
            created_by: row.created_by.map(UserId::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<ScenarioDetailsRow> for ScenarioDetails {
    type Error = DomainError;

    fn try_from(row: ScenarioDetailsRow) -> Result<Self, Self::Error> {
        Ok(ScenarioDetails {
            scenario: Scenario::try_from(row.scenario)?,
            creator_name: row.creator_name,
            client_name: row.client_name,
            client_email: row.client_email,
        })
    }
}

#[async_trait]
impl ScenarioRepository for PostgresScenarioRepository {
    async fn insert(&self, scenario: NewScenario) -> DomainResult<Scenario> {
        let NewScenario {
            client_id,
            title,
            description,
            media_url,
            created_by,
        } = scenario;

        let row = sqlx::query_as::<_, ScenarioRow>(&format!(
            "INSERT INTO scenarios (client_id, title, description, media_url, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {SCENARIO_COLUMNS}"
        ))
        .bind(client_id.map(i64::from))
        .bind(title)
        .bind(description)
        .bind(media_url)
        .bind(created_by.map(i64::from))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Scenario::try_from(row)
    }

    async fn find(&self, id: ScenarioId) -> DomainResult<Option<ScenarioDetails>> {
        let row = sqlx::query_as::<_, ScenarioDetailsRow>(&format!(
            "{DETAILS_SELECT} WHERE s.id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(ScenarioDetails::try_from).transpose()
    }

    async fn list(&self, client_id: Option<ClientId>) -> DomainResult<Vec<ScenarioDetails>> {
        let rows = sqlx::query_as::<_, ScenarioDetailsRow>(&format!(
            "{DETAILS_SELECT}
             WHERE ($1::BIGINT IS NULL OR s.client_id = $1)
             ORDER BY s.created_at DESC, s.id DESC"
        ))
        .bind(client_id.map(i64::from))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(ScenarioDetails::try_from).collect()
    }

    async fn update(
        &self,
        id: ScenarioId,
        changes: ScenarioChanges,
    ) -> DomainResult<Option<Scenario>> {
        let ScenarioChanges {
            title,
            description,
            media_url,
        } = changes;

        let row = sqlx::query_as::<_, ScenarioRow>(&format!(
            "UPDATE scenarios
             SET title = $2, description = $3, media_url = $4, updated_at = NOW()
             WHERE id = $1
             RETURNING {SCENARIO_COLUMNS}"
        ))
        .bind(i64::from(id))
        .bind(title)
        .bind(description)
        .bind(media_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Scenario::try_from).transpose()
    }

    async fn delete(&self, id: ScenarioId) -> DomainResult<Option<Scenario>> {
        let row = sqlx::query_as::<_, ScenarioRow>(&format!(
            "DELETE FROM scenarios WHERE id = $1 RETURNING {SCENARIO_COLUMNS}"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Scenario::try_from).transpose()
    }
}
