use super::{ScenarioCommandService, UploadedArchive};
use crate::{
    application::{
        dto::{AuthenticatedAdmin, ScenarioDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{client::ClientId, scenario::NewScenario, user::Email},
};
use serde_json::{Map, Value};

/// Fields of a scenario upload form.
///
/// Client apps send `userEmail` plus a `scenarioData` JSON document holding the
/// title and description; the back office sends `client_id`, `title` and
/// `description` as plain fields.
#[derive(Debug, Default)]
pub struct CreateScenarioCommand {
    pub user_email: Option<String>,
    pub scenario_data: Option<String>,
    pub client_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub archive: Option<UploadedArchive>,
}

impl ScenarioCommandService {
    /// Create a scenario for an admin session or a client identified by email.
    pub async fn create(
        &self,
        actor: Option<&AuthenticatedAdmin>,
        command: CreateScenarioCommand,
    ) -> ApplicationResult<ScenarioDto> {
        let user_email = command
            .user_email
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty());
        if actor.is_none() && user_email.is_none() {
            return Err(ApplicationError::unauthorized(
                "an admin session or userEmail is required",
            ));
        }

        let scenario_data = parse_scenario_data(command.scenario_data.as_deref())?;
        let (title, description, client_id) = match scenario_data {
            Some(data) => (
                text_field(&data, "title"),
                text_field(&data, "description"),
                None,
            ),
            None => (
                command.title,
                command.description,
                parse_client_id(command.client_id.as_deref())?,
            ),
        };

        let (Some(title), Some(description)) = (
            title.filter(|t| !t.is_empty()),
            description.filter(|d| !d.is_empty()),
        ) else {
            return Err(ApplicationError::validation(
                "Missing required fields: title, description",
            ));
        };
        let draft = NewScenario::new(None, &title, &description, actor.map(|a| a.id))?;

        let client_id = self.resolve_client(client_id, user_email.as_deref()).await?;
        let media_url = self.store_archive(command.archive).await?;

        let new_scenario = NewScenario {
            client_id,
            ..draft
        }
        .with_media_url(media_url.clone());

        let scenario = match self.scenarios.insert(new_scenario).await {
            Ok(scenario) => scenario,
            Err(err) => {
                if let Some(url) = &media_url {
                    self.discard_archive(url).await;
                }
                return Err(err.into());
            }
        };

        tracing::info!(
            scenario_id = %scenario.id,
            client_id = ?client_id.map(i64::from),
            created_by = ?actor.map(|a| i64::from(a.id)),
            "scenario created"
        );
        Ok(scenario.into())
    }

    async fn resolve_client(
        &self,
        client_id: Option<ClientId>,
        user_email: Option<&str>,
    ) -> ApplicationResult<Option<ClientId>> {
        if let Some(id) = client_id {
            if !self.clients.exists(id).await? {
                return Err(ApplicationError::not_found("Client not found"));
            }
            return Ok(Some(id));
        }

        let Some(raw) = user_email else {
            return Ok(None);
        };
        let email = Email::new(raw)?;
        match self.clients.find_by_email(&email).await? {
            Some(id) => Ok(Some(id)),
            None => Err(ApplicationError::not_found(format!(
                "Client not found for email: {email}"
            ))),
        }
    }
}

/// `None` when no usable document was sent; `null` and `{}` count as absent.
fn parse_scenario_data(raw: Option<&str>) -> ApplicationResult<Option<Map<String, Value>>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) if map.is_empty() => Ok(None),
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(Value::Null) => Ok(None),
        Ok(_) => Err(ApplicationError::validation(
            "scenarioData must be a JSON object",
        )),
        Err(_) => Err(ApplicationError::validation("Invalid JSON in scenarioData")),
    }
}

fn text_field(data: &Map<String, Value>, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(str::to_string)
}

fn parse_client_id(raw: Option<&str>) -> ApplicationResult<Option<ClientId>> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let id = raw
        .parse::<i64>()
        .map_err(|_| ApplicationError::validation("client_id must be an integer"))?;
    Ok(Some(ClientId::new(id)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_data_must_be_json() {
        let err = parse_scenario_data(Some("{not json")).unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(ref m) if m == "Invalid JSON in scenarioData"));
    }

    #[test]
    fn empty_scenario_data_means_form_fields() {
        assert_eq!(parse_scenario_data(None).unwrap(), None);
        assert_eq!(parse_scenario_data(Some("null")).unwrap(), None);
        assert_eq!(parse_scenario_data(Some("{}")).unwrap(), None);
        assert!(parse_scenario_data(Some("[1]")).is_err());

        let data = parse_scenario_data(Some(r#"{"title":"T","description":7}"#))
            .unwrap()
            .unwrap();
        assert_eq!(text_field(&data, "title").as_deref(), Some("T"));
        assert_eq!(text_field(&data, "description"), None);
    }

    #[test]
    fn client_id_field_is_numeric() {
        assert_eq!(parse_client_id(None).unwrap(), None);
        assert_eq!(parse_client_id(Some("  ")).unwrap(), None);
        assert_eq!(parse_client_id(Some(" 12 ")).unwrap(), Some(ClientId(12)));
        assert!(matches!(
            parse_client_id(Some("twelve")),
            Err(ApplicationError::Validation(_))
        ));
        assert!(parse_client_id(Some("0")).is_err());
    }
}
