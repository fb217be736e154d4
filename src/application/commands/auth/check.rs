use super::AuthCommandService;
use crate::application::{
    dto::{AdminUserDto, AuthenticatedAdmin},
    error::{ApplicationError, ApplicationResult},
};

impl AuthCommandService {
    /// Resolve a session token to the admin that owns it.
    ///
    /// Expired sessions and sessions whose user has been removed are revoked
    /// on the way out.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedAdmin> {
        let session = self
            .session_store
            .resolve(token)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("invalid session"))?;

        if session.is_expired(self.clock.now()) {
            self.session_store.revoke(&session.id).await?;
            return Err(ApplicationError::unauthorized("session expired"));
        }

        let Some(user) = self.user_repo.find_by_id(session.user_id).await? else {
            self.session_store.revoke(&session.id).await?;
            return Err(ApplicationError::unauthorized("session user no longer exists"));
        };

        Ok(AuthenticatedAdmin {
            id: user.id,
            email: user.email.into(),
            name: user.name,
            session_id: session.id,
            expires_at: session.expires_at,
        })
    }

    /// Like [`authenticate`](Self::authenticate), but a missing or dead
    /// session yields `None` instead of an error.
    pub async fn check(&self, token: Option<&str>) -> ApplicationResult<Option<AdminUserDto>> {
        let Some(token) = token else {
            return Ok(None);
        };

        match self.authenticate(token).await {
            Ok(admin) => Ok(Some(AdminUserDto::from(&admin))),
            Err(ApplicationError::Unauthorized(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
