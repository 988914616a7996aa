use uuid::Uuid;

use crate::data::user_repository::{NewUser, UserPatch, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::AdminUser;

/// Admin account CRUD. Takes password hashes only; hashing is done by the
/// caller with `auth_service::hash_password`.
pub(crate) struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn list(&self) -> Result<Vec<AdminUser>, DomainError> {
        self.repo.list_users().await
    }

    pub(crate) async fn get(&self, id: Uuid) -> Result<AdminUser, DomainError> {
        self.repo
            .get_user(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {id}")))
    }

    pub(crate) async fn get_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, DomainError> {
        self.repo.get_user_by_username(username).await
    }

    /// Duplicate usernames come back from the store as `AlreadyExists`.
    pub(crate) async fn create(&self, input: NewUser) -> Result<(), DomainError> {
        self.repo.create_user(input).await
    }

    pub(crate) async fn update(&self, id: Uuid, patch: UserPatch) -> Result<(), DomainError> {
        self.repo.update_user(id, patch).await
    }
}
