use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Admin resolved from a live session.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionDto {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
