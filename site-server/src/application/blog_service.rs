use tracing::{debug, info};
use uuid::Uuid;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{
    BlogPost, CreatePostRequest, UpdatePostRequest, parse_published_at, slug_for,
};

pub(crate) struct BlogService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> BlogService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Newest first. Rows still lacking a slug get one persisted on the way out.
    pub(crate) async fn list(&self) -> Result<Vec<BlogPost>, DomainError> {
        let posts = self.repo.list_posts().await?;
        let mut ensured = Vec::with_capacity(posts.len());
        for post in posts {
            ensured.push(self.ensure_slug(post).await?);
        }
        Ok(ensured)
    }

    pub(crate) async fn get(&self, id: Uuid) -> Result<BlogPost, DomainError> {
        let post = self
            .repo
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))?;
        self.ensure_slug(post).await
    }

    /// Slug first; only a missing row falls back to the id lookup used by legacy links.
    pub(crate) async fn get_by_slug_or_id(&self, identifier: &str) -> Result<BlogPost, DomainError> {
        if let Some(post) = self.repo.get_post_by_slug(identifier).await? {
            return self.ensure_slug(post).await;
        }

        match Uuid::parse_str(identifier) {
            Ok(id) => self.get(id).await,
            Err(_) => Err(DomainError::NotFound(format!("post: {identifier}"))),
        }
    }

    pub(crate) async fn create(&self, req: CreatePostRequest) -> Result<(), DomainError> {
        let req = req.validate()?;
        let published_at = parse_published_at(&req.published_at)?;

        let new_post = NewPost {
            slug: slug_for(&req.title),
            title: req.title,
            author: req.author,
            published_at,
            body: req.body,
            tags: req.tags.unwrap_or_default(),
        };
        debug!(slug = ?new_post.slug, "creating post");
        self.repo.create_post(new_post).await
    }

    /// Writes only the supplied fields. The slug follows the title only when the
    /// title is part of this update.
    pub(crate) async fn update(&self, id: Uuid, req: UpdatePostRequest) -> Result<(), DomainError> {
        let req = req.validate()?;
        let published_at = req
            .published_at
            .as_deref()
            .map(parse_published_at)
            .transpose()?;

        let patch = PostPatch {
            slug: req.title.as_deref().map(slug_for),
            title: req.title,
            author: req.author,
            published_at,
            body: req.body,
            tags: req.tags,
        };
        self.repo.update_post(id, patch).await
    }

    /// One-shot migration for rows created before slugs existed. Returns how many
    /// rows received a slug.
    pub(crate) async fn backfill_slugs(&self) -> Result<usize, DomainError> {
        let pending = self.repo.list_posts_without_slug().await?;
        let mut updated = 0;
        for post in pending {
            if let Some(slug) = slug_for(&post.title) {
                self.repo.set_slug(post.id, &slug).await?;
                updated += 1;
            }
        }
        info!(updated, "slug backfill finished");
        Ok(updated)
    }

    async fn ensure_slug(&self, mut post: BlogPost) -> Result<BlogPost, DomainError> {
        if post.slug.is_some() {
            return Ok(post);
        }
        if let Some(slug) = slug_for(&post.title) {
            self.repo.set_slug(post.id, &slug).await?;
            post.slug = Some(slug);
        }
        Ok(post)
    }
}
