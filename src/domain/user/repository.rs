use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::AdminUser,
    value_objects::{Email, UserId},
};
use async_trait::async_trait;

#[async_trait]
pub trait AdminUserRepository: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<AdminUser>>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<AdminUser>>;
}
