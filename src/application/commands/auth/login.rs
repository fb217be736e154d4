use super::AuthCommandService;
use crate::{
    application::{
        dto::{AdminUserDto, SessionDto},
        error::{ApplicationError, ApplicationResult},
        ports::session::Session,
    },
    domain::user::{AdminUser, Email},
};
use uuid::Uuid;

pub struct LoginAdminCommand {
    pub email: String,
    pub password: String,
}

pub struct LoginResult {
    pub user: AdminUserDto,
    pub session: SessionDto,
}

impl AuthCommandService {
    pub async fn login(&self, command: LoginAdminCommand) -> ApplicationResult<LoginResult> {
        if command.email.trim().is_empty() || command.password.is_empty() {
            return Err(ApplicationError::validation(
                "email and password are required",
            ));
        }

        let email = Email::new(command.email)?;
        let user = self
            .find_and_verify(&email, &command.password)
            .await?;

        let now = self.clock.now();
        let purged = self.session_store.purge_expired(now).await?;
        if purged > 0 {
            tracing::debug!(purged, "expired sessions dropped");
        }

        let expires_at = now
            .checked_add_signed(self.session_ttl)
            .ok_or_else(|| ApplicationError::infrastructure("session lifetime out of range"))?;
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id: user.id,
            created_at: now,
            expires_at,
        };
        self.session_store.create(session.clone()).await?;

        tracing::info!(user_id = %user.id, "admin signed in");

        Ok(LoginResult {
            user: user.into(),
            session: SessionDto {
                token: session.id,
                expires_at: session.expires_at,
            },
        })
    }

    async fn find_and_verify(&self, email: &Email, password: &str) -> ApplicationResult<AdminUser> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("invalid credentials"))?;

        self.password_hasher
            .verify(password, user.password_hash.as_str())
            .await?;

        Ok(user)
    }
}
