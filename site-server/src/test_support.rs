use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use url::Url;
use uuid::Uuid;

use crate::application::auth_service::hash_password;
use crate::data::blob_store::{BlobError, BlobStore, key_from_public_url, public_url};
use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::data::user_repository::{NewUser, UserCredentials, UserPatch, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::post::BlogPost;
use crate::domain::user::AdminUser;

pub(crate) const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef";

pub(crate) fn sample_post(title: &str, slug: Option<&str>) -> BlogPost {
    let now = Utc::now();
    BlogPost {
        id: Uuid::new_v4(),
        title: title.to_string(),
        slug: slug.map(str::to_string),
        author: "ambika".to_string(),
        published_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        body: format!("{title} body"),
        tags: vec!["news".to_string()],
        created_at: now,
        updated_at: now,
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryPostRepo {
    posts: Arc<Mutex<Vec<BlogPost>>>,
    fail_slug_lookups: Arc<AtomicBool>,
}

impl InMemoryPostRepo {
    pub(crate) fn insert(&self, post: BlogPost) {
        self.posts.lock().expect("posts mutex poisoned").push(post);
    }

    pub(crate) fn snapshot(&self) -> Vec<BlogPost> {
        self.posts.lock().expect("posts mutex poisoned").clone()
    }

    pub(crate) fn get_snapshot(&self, id: Uuid) -> Option<BlogPost> {
        self.snapshot().into_iter().find(|post| post.id == id)
    }

    /// Mutates the stored title directly, bypassing the service.
    pub(crate) fn rename_title(&self, id: Uuid, title: &str) {
        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        if let Some(post) = posts.iter_mut().find(|post| post.id == id) {
            post.title = title.to_string();
        }
    }

    pub(crate) fn fail_slug_lookups(&self) {
        self.fail_slug_lookups.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepo {
    async fn list_posts(&self) -> Result<Vec<BlogPost>, DomainError> {
        let mut posts = self.snapshot();
        posts.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(posts)
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<BlogPost>, DomainError> {
        Ok(self.get_snapshot(id))
    }

    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, DomainError> {
        if self.fail_slug_lookups.load(Ordering::SeqCst) {
            return Err(DomainError::Unexpected("connection reset".to_string()));
        }
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|post| post.slug.as_deref() == Some(slug))
            .min_by_key(|post| post.created_at))
    }

    async fn create_post(&self, input: NewPost) -> Result<(), DomainError> {
        let now = Utc::now();
        self.insert(BlogPost {
            id: Uuid::new_v4(),
            title: input.title,
            slug: input.slug,
            author: input.author,
            published_at: input.published_at,
            body: input.body,
            tags: input.tags,
            created_at: now,
            updated_at: now,
        });
        Ok(())
    }

    async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<(), DomainError> {
        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        let post = posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))?;

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(slug) = patch.slug {
            post.slug = slug;
        }
        if let Some(author) = patch.author {
            post.author = author;
        }
        if let Some(published_at) = patch.published_at {
            post.published_at = published_at;
        }
        if let Some(body) = patch.body {
            post.body = body;
        }
        if let Some(tags) = patch.tags {
            post.tags = tags;
        }
        post.updated_at = Utc::now();
        Ok(())
    }

    async fn set_slug(&self, id: Uuid, slug: &str) -> Result<(), DomainError> {
        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        if let Some(post) = posts.iter_mut().find(|post| post.id == id) {
            post.slug = Some(slug.to_string());
        }
        Ok(())
    }

    async fn list_posts_without_slug(&self) -> Result<Vec<BlogPost>, DomainError> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|post| post.slug.is_none())
            .collect())
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryUserRepo {
    users: Arc<Mutex<Vec<(AdminUser, String)>>>,
    fail_reads: Arc<AtomicBool>,
}

impl InMemoryUserRepo {
    /// Inserts an `admin` user whose password is hashed for real.
    pub(crate) fn seed(&self, username: &str, display_name: &str, password: &str) -> AdminUser {
        let now = Utc::now();
        let user = AdminUser {
            id: Uuid::new_v4(),
            username: username.to_string(),
            display_name: display_name.to_string(),
            role: "admin".to_string(),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        };
        let hash = hash_password(password).expect("hashing must succeed");
        self.users
            .lock()
            .expect("users mutex poisoned")
            .push((user.clone(), hash));
        user
    }

    pub(crate) fn user(&self, id: Uuid) -> Option<AdminUser> {
        self.users
            .lock()
            .expect("users mutex poisoned")
            .iter()
            .find(|(user, _)| user.id == id)
            .map(|(user, _)| user.clone())
    }

    pub(crate) fn password_hash_of(&self, username: &str) -> Option<String> {
        self.users
            .lock()
            .expect("users mutex poisoned")
            .iter()
            .find(|(user, _)| user.username == username)
            .map(|(_, hash)| hash.clone())
    }

    pub(crate) fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<(), DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::Unexpected("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn list_users(&self) -> Result<Vec<AdminUser>, DomainError> {
        self.check_reads()?;
        let mut users: Vec<_> = self
            .users
            .lock()
            .expect("users mutex poisoned")
            .iter()
            .map(|(user, _)| user.clone())
            .collect();
        users.sort_by_key(|user| user.created_at);
        Ok(users)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<AdminUser>, DomainError> {
        self.check_reads()?;
        Ok(self.user(id))
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, DomainError> {
        self.check_reads()?;
        Ok(self
            .users
            .lock()
            .expect("users mutex poisoned")
            .iter()
            .find(|(user, _)| user.username == username)
            .map(|(user, _)| user.clone()))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        self.check_reads()?;
        Ok(self
            .users
            .lock()
            .expect("users mutex poisoned")
            .iter()
            .find(|(user, _)| user.username == username)
            .map(|(user, hash)| UserCredentials {
                user: user.clone(),
                password_hash: hash.clone(),
            }))
    }

    async fn create_user(&self, input: NewUser) -> Result<(), DomainError> {
        let mut users = self.users.lock().expect("users mutex poisoned");
        if users.iter().any(|(user, _)| user.username == input.username) {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }
        let now = Utc::now();
        users.push((
            AdminUser {
                id: Uuid::new_v4(),
                username: input.username,
                display_name: input.display_name,
                role: input.role,
                avatar_url: None,
                created_at: now,
                updated_at: now,
            },
            input.password_hash,
        ));
        Ok(())
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<(), DomainError> {
        let mut users = self.users.lock().expect("users mutex poisoned");
        let (user, hash) = users
            .iter_mut()
            .find(|(user, _)| user.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("user id: {id}")))?;

        if let Some(display_name) = patch.display_name {
            user.display_name = display_name;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(password_hash) = patch.password_hash {
            *hash = password_hash;
        }
        if let Some(avatar_url) = patch.avatar_url {
            user.avatar_url = avatar_url;
        }
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Clone)]
pub(crate) struct InMemoryBlobStore {
    base: Url,
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_writes: Arc<AtomicBool>,
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self {
            base: Url::parse("https://blob.test").expect("static url"),
            blobs: Arc::default(),
            fail_writes: Arc::default(),
        }
    }
}

impl InMemoryBlobStore {
    pub(crate) fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs
            .lock()
            .expect("blobs mutex poisoned")
            .get(key)
            .cloned()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.blobs.lock().expect("blobs mutex poisoned").is_empty()
    }

    pub(crate) fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put_public(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, BlobError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BlobError::Put("bucket unavailable".to_string()));
        }
        self.blobs
            .lock()
            .expect("blobs mutex poisoned")
            .insert(key.to_string(), bytes);
        Ok(public_url(&self.base, key))
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BlobError::Delete("bucket unavailable".to_string()));
        }
        self.blobs
            .lock()
            .expect("blobs mutex poisoned")
            .remove(key);
        Ok(())
    }

    fn key_for_url(&self, url: &str) -> Result<String, BlobError> {
        key_from_public_url(&self.base, url)
    }
}
