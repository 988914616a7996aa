use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::post::BlogPost;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) slug: Option<String>,
    pub(crate) author: String,
    pub(crate) published_at: DateTime<Utc>,
    pub(crate) body: String,
    pub(crate) tags: Vec<String>,
}

/// Columns to overwrite; `None` leaves a column as it is.
/// `slug: Some(None)` writes NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PostPatch {
    pub(crate) title: Option<String>,
    pub(crate) slug: Option<Option<String>>,
    pub(crate) author: Option<String>,
    pub(crate) published_at: Option<DateTime<Utc>>,
    pub(crate) body: Option<String>,
    pub(crate) tags: Option<Vec<String>>,
}

/// `Ok(None)` from a lookup means the row does not exist; any other store
/// failure is an `Err`.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<BlogPost>, DomainError>;
    async fn get_post(&self, id: Uuid) -> Result<Option<BlogPost>, DomainError>;
    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, DomainError>;
    async fn create_post(&self, input: NewPost) -> Result<(), DomainError>;
    async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<(), DomainError>;
    async fn set_slug(&self, id: Uuid, slug: &str) -> Result<(), DomainError>;
    async fn list_posts_without_slug(&self) -> Result<Vec<BlogPost>, DomainError>;
}

pub(crate) type DynPostRepository = Arc<dyn PostRepository>;

#[async_trait]
impl<T: PostRepository + ?Sized> PostRepository for Arc<T> {
    async fn list_posts(&self) -> Result<Vec<BlogPost>, DomainError> {
        (**self).list_posts().await
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<BlogPost>, DomainError> {
        (**self).get_post(id).await
    }

    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, DomainError> {
        (**self).get_post_by_slug(slug).await
    }

    async fn create_post(&self, input: NewPost) -> Result<(), DomainError> {
        (**self).create_post(input).await
    }

    async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<(), DomainError> {
        (**self).update_post(id, patch).await
    }

    async fn set_slug(&self, id: Uuid, slug: &str) -> Result<(), DomainError> {
        (**self).set_slug(id, slug).await
    }

    async fn list_posts_without_slug(&self) -> Result<Vec<BlogPost>, DomainError> {
        (**self).list_posts_without_slug().await
    }
}
