use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub(crate) enum JwtError {
    #[error("signing secret is not configured")]
    MissingSecret,

    #[error("token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is malformed")]
    Malformed(#[source] jsonwebtoken::errors::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct Claims {
    pub(crate) sub: String,
    pub(crate) username: String,
    pub(crate) role: String,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
}

/// HS256 session tokens for the admin cookie.
#[derive(Debug)]
pub(crate) struct JwtService {
    secret: String,
    ttl_seconds: i64,
}

impl JwtService {
    pub(crate) const DEFAULT_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

    pub(crate) fn new(secret: &str) -> Result<Self, JwtError> {
        Self::with_ttl(secret, Self::DEFAULT_TTL_SECONDS)
    }

    pub(crate) fn with_ttl(secret: &str, ttl_seconds: i64) -> Result<Self, JwtError> {
        if secret.trim().is_empty() {
            return Err(JwtError::MissingSecret);
        }

        let ttl_seconds = if ttl_seconds > 0 {
            ttl_seconds
        } else {
            Self::DEFAULT_TTL_SECONDS
        };

        Ok(JwtService {
            secret: secret.into(),
            ttl_seconds,
        })
    }

    pub(crate) fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    pub(crate) fn generate_token(
        &self,
        subject_id: Uuid,
        username: &str,
        role: &str,
    ) -> Result<String, JwtError> {
        self.generate_token_at(subject_id, username, role, Utc::now())
    }

    pub(crate) fn generate_token_at(
        &self,
        subject_id: Uuid,
        username: &str,
        role: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims {
            sub: subject_id.to_string(),
            username: username.into(),
            role: role.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::seconds(self.ttl_seconds)).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(JwtError::Encode)
    }

    pub(crate) fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|err| match err.kind() {
            ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::Malformed(err),
        })?;

        Ok(token_data.claims)
    }
}
