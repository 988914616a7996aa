use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::BlogPost;

const POST_COLUMNS: &str =
    "id, title, slug, author, published_at, body, tags, created_at, updated_at";

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    slug: Option<String>,
    author: String,
    published_at: DateTime<Utc>,
    body: String,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for BlogPost {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug.filter(|slug| !slug.is_empty()),
            author: row.author,
            published_at: row.published_at,
            body: row.body,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_posts(&self) -> Result<Vec<BlogPost>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM blog_posts ORDER BY published_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<BlogPost>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM blog_posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(row.map(BlogPost::from))
    }

    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, DomainError> {
        // slugs are not unique in the schema; the oldest post wins
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM blog_posts WHERE slug = $1 ORDER BY created_at ASC LIMIT 1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(row.map(BlogPost::from))
    }

    async fn create_post(&self, input: NewPost) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO blog_posts (title, slug, author, published_at, body, tags)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(input.title)
        .bind(input.slug)
        .bind(input.author)
        .bind(input.published_at)
        .bind(input.body)
        .bind(input.tags)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(())
    }

    async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<(), DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE blog_posts SET updated_at = NOW()");
        if let Some(title) = patch.title {
            builder.push(", title = ").push_bind(title);
        }
        if let Some(slug) = patch.slug {
            builder.push(", slug = ").push_bind(slug);
        }
        if let Some(author) = patch.author {
            builder.push(", author = ").push_bind(author);
        }
        if let Some(published_at) = patch.published_at {
            builder.push(", published_at = ").push_bind(published_at);
        }
        if let Some(body) = patch.body {
            builder.push(", body = ").push_bind(body);
        }
        if let Some(tags) = patch.tags {
            builder.push(", tags = ").push_bind(tags);
        }
        builder.push(" WHERE id = ").push_bind(id);

        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;
        Ok(())
    }

    async fn set_slug(&self, id: Uuid, slug: &str) -> Result<(), DomainError> {
        sqlx::query("UPDATE blog_posts SET slug = $2 WHERE id = $1")
            .bind(id)
            .bind(slug)
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;
        Ok(())
    }

    async fn list_posts_without_slug(&self) -> Result<Vec<BlogPost>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM blog_posts WHERE slug IS NULL OR slug = '' ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(rows.into_iter().map(BlogPost::from).collect())
    }
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    DomainError::Unexpected(err.to_string())
}
