// src/domain/scenario/entity.rs
use crate::domain::client::ClientId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScenarioId(pub i64);

impl ScenarioId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("scenario id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ScenarioId> for i64 {
    fn from(value: ScenarioId) -> Self {
        value.0
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A game scenario filed for a client, optionally backed by an uploaded archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub id: ScenarioId,
    pub client_id: Option<ClientId>,
    pub title: String,
    pub description: String,
    /// Public path of the archive, e.g. `/uploads/scenarios/scenario_<uuid>.zip`.
    pub media_url: Option<String>,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A scenario joined with the names of the admin and client it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioDetails {
    pub scenario: Scenario,
    pub creator_name: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScenario {
    pub client_id: Option<ClientId>,
    pub title: String,
    pub description: String,
    pub media_url: Option<String>,
    pub created_by: Option<UserId>,
}

impl NewScenario {
    /// Title and description are stored trimmed and must not end up empty.
    pub fn new(
        client_id: Option<ClientId>,
        title: &str,
        description: &str,
        created_by: Option<UserId>,
    ) -> DomainResult<Self> {
        let (title, description) = checked_text(title, description)?;
        Ok(Self {
            client_id,
            title,
            description,
            media_url: None,
            created_by,
        })
    }

    #[must_use]
    pub fn with_media_url(mut self, media_url: Option<String>) -> Self {
        self.media_url = media_url;
        self
    }
}

/// Full replacement of the editable columns; `updated_at` is set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioChanges {
    pub title: String,
    pub description: String,
    pub media_url: Option<String>,
}

impl ScenarioChanges {
    pub fn new(title: &str, description: &str, media_url: Option<String>) -> DomainResult<Self> {
        let (title, description) = checked_text(title, description)?;
        Ok(Self {
            title,
            description,
            media_url,
        })
    }
}

fn checked_text(title: &str, description: &str) -> DomainResult<(String, String)> {
    let (title, description) = (title.trim(), description.trim());
    if title.is_empty() || description.is_empty() {
        return Err(DomainError::Validation(
            "Title and description cannot be empty".into(),
        ));
    }
    Ok((title.to_string(), description.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scenario_trims_its_text() {
        let scenario = NewScenario::new(None, "  Escape room ", "\tfind the key\n", None).unwrap();
        assert_eq!(scenario.title, "Escape room");
        assert_eq!(scenario.description, "find the key");
        assert_eq!(scenario.media_url, None);
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        assert!(matches!(
            NewScenario::new(None, "   ", "body", None),
            Err(DomainError::Validation(_))
        ));
        assert!(ScenarioChanges::new("title", "\n", None).is_err());
    }

    #[test]
    fn scenario_id_must_be_positive() {
        assert!(ScenarioId::new(0).is_err());
        assert_eq!(i64::from(ScenarioId::new(3).unwrap()), 3);
    }
}
