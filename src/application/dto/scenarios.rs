use crate::domain::scenario::{Scenario, ScenarioDetails};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScenarioDto {
    pub id: i64,
    pub client_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub media_url: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
}

impl From<Scenario> for ScenarioDto {
    fn from(s: Scenario) -> Self {
        Self {
            id: s.id.into(),
            client_id: s.client_id.map(Into::into),
            title: s.title,
            description: s.description,
            media_url: s.media_url,
            created_by: s.created_by.map(Into::into),
            created_at: s.created_at,
            updated_at: s.updated_at,
            creator_name: None,
            client_name: None,
            client_email: None,
        }
    }
}

impl From<ScenarioDetails> for ScenarioDto {
    fn from(details: ScenarioDetails) -> Self {
        Self {
            creator_name: details.creator_name,
            client_name: details.client_name,
            client_email: details.client_email,
            ..Self::from(details.scenario)
        }
    }
}
