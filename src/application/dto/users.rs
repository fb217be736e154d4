use crate::domain::user::AdminUser;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::auth::AuthenticatedAdmin;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdminUserDto {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<AdminUser> for AdminUserDto {
    fn from(user: AdminUser) -> Self {
        Self {
            id: user.id.into(),
            email: user.email.into(),
            name: user.name,
        }
    }
}

impl From<&AuthenticatedAdmin> for AdminUserDto {
    fn from(admin: &AuthenticatedAdmin) -> Self {
        Self {
            id: admin.id.into(),
            email: admin.email.clone(),
            name: admin.name.clone(),
        }
    }
}
