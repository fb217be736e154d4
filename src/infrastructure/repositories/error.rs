use crate::domain::errors::DomainError;

const CNT_ADMIN_EMAIL: &str = "admin_users_email_key";
const CNT_CLIENT_EMAIL: &str = "clients_email_key";
const CNT_SCENARIO_CLIENT: &str = "scenarios_client_id_fkey";
const CNT_SCENARIO_CREATOR: &str = "scenarios_created_by_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_ADMIN_EMAIL => DomainError::Conflict("email already registered".into()),
                    CNT_CLIENT_EMAIL => {
                        DomainError::Conflict("client email already registered".into())
                    }
                    CNT_SCENARIO_CLIENT => DomainError::NotFound("Client not found".into()),
                    CNT_SCENARIO_CREATOR => {
                        DomainError::NotFound("creating admin no longer exists".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::PoolTimedOut => DomainError::Persistence("database pool timed out".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
