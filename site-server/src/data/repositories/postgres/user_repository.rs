use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::data::user_repository::{NewUser, UserCredentials, UserPatch, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::AdminUser;

const USER_COLUMNS: &str = "id, username, display_name, role, avatar_url, created_at, updated_at";

#[derive(Debug, Clone)]
pub(crate) struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    display_name: String,
    role: String,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct UserCredentialsRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: Option<String>,
}

impl From<UserRow> for AdminUser {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            display_name: row.display_name,
            role: row.role,
            avatar_url: row.avatar_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn list_users(&self) -> Result<Vec<AdminUser>, DomainError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(rows.into_iter().map(AdminUser::from).collect())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<AdminUser>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(row.map(AdminUser::from))
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(row.map(AdminUser::from))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        // a row without a hash cannot log in
        Ok(row.and_then(|r| {
            r.password_hash.map(|password_hash| UserCredentials {
                user: AdminUser::from(r.user),
                password_hash,
            })
        }))
    }

    async fn create_user(&self, input: NewUser) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (username, display_name, role, password_hash)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(input.username)
        .bind(input.display_name)
        .bind(input.role)
        .bind(input.password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(())
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<(), DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE users SET updated_at = NOW()");
        if let Some(display_name) = patch.display_name {
            builder.push(", display_name = ").push_bind(display_name);
        }
        if let Some(role) = patch.role {
            builder.push(", role = ").push_bind(role);
        }
        if let Some(password_hash) = patch.password_hash {
            builder.push(", password_hash = ").push_bind(password_hash);
        }
        if let Some(avatar_url) = patch.avatar_url {
            builder.push(", avatar_url = ").push_bind(avatar_url);
        }
        builder.push(" WHERE id = ").push_bind(id);

        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_user_db_error)?;
        Ok(())
    }
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23505")
    {
        let resource = match db_err.constraint() {
            Some("users_username_key") => "username",
            _ => "user",
        };
        return DomainError::AlreadyExists(resource.to_string());
    }
    DomainError::Unexpected(err.to_string())
}
