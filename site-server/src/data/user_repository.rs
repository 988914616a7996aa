use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::user::AdminUser;

#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: AdminUser,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) username: String,
    pub(crate) display_name: String,
    pub(crate) role: String,
    pub(crate) password_hash: String,
}

/// Sparse user update. `avatar_url` is tri-state: `None` leaves the column,
/// `Some(None)` clears it, `Some(Some(url))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct UserPatch {
    pub(crate) display_name: Option<String>,
    pub(crate) role: Option<String>,
    pub(crate) password_hash: Option<String>,
    pub(crate) avatar_url: Option<Option<String>>,
}

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn list_users(&self) -> Result<Vec<AdminUser>, DomainError>;
    async fn get_user(&self, id: Uuid) -> Result<Option<AdminUser>, DomainError>;
    async fn get_user_by_username(&self, username: &str)
    -> Result<Option<AdminUser>, DomainError>;
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError>;
    async fn create_user(&self, input: NewUser) -> Result<(), DomainError>;
    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<(), DomainError>;
}

pub(crate) type DynUserRepository = Arc<dyn UserRepository>;

#[async_trait]
impl<T: UserRepository + ?Sized> UserRepository for Arc<T> {
    async fn list_users(&self) -> Result<Vec<AdminUser>, DomainError> {
        (**self).list_users().await
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<AdminUser>, DomainError> {
        (**self).get_user(id).await
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, DomainError> {
        (**self).get_user_by_username(username).await
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        (**self).find_credentials(username).await
    }

    async fn create_user(&self, input: NewUser) -> Result<(), DomainError> {
        (**self).create_user(input).await
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<(), DomainError> {
        (**self).update_user(id, patch).await
    }
}
