use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::error::DomainError;

/// Admin account as exposed to every read path. The password hash is not part
/// of it; see `UserCredentials` for the login lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct AdminUser {
    pub(crate) id: Uuid,
    pub(crate) username: String,
    pub(crate) display_name: String,
    pub(crate) role: String,
    pub(crate) avatar_url: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl AdminUser {
    pub(crate) fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }

    /// Two-letter avatar fallback.
    pub(crate) fn initials(&self) -> String {
        initials_of(self.label())
    }
}

pub(crate) fn initials_of(label: &str) -> String {
    let initials: String = label.chars().take(2).collect();
    if initials.is_empty() {
        "?".to_string()
    } else {
        initials.to_uppercase()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() || username.len() > 64 {
            return Err(DomainError::Validation {
                field: "username",
                message: "must be 1..64 chars",
            });
        }

        let password = self.password.trim();
        if password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CreateUserRequest {
    pub(crate) username: String,
    pub(crate) display_name: String,
    pub(crate) role: String,
    pub(crate) password: String,
}

impl CreateUserRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            username: required("username", &self.username)?,
            display_name: required("display_name", &self.display_name)?,
            role: required("role", &self.role)?,
            password: required("password", &self.password)?,
        })
    }
}

/// Profile edit. A blank password keeps the current one.
#[derive(Debug, Clone)]
pub(crate) struct UpdateUserRequest {
    pub(crate) display_name: String,
    pub(crate) role: String,
    pub(crate) password: Option<String>,
}

impl UpdateUserRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let password = self
            .password
            .map(|password| password.trim().to_string())
            .filter(|password| !password.is_empty());

        Ok(Self {
            display_name: required("display_name", &self.display_name)?,
            role: required("role", &self.role)?,
            password,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::Validation {
            field,
            message: "is required",
        });
    }
    Ok(value.to_string())
}
