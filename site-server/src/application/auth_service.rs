use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use tracing::{info, warn};

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::{AdminUser, LoginRequest};
use crate::infrastructure::jwt::JwtService;

const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

#[derive(Debug, Clone)]
pub(crate) struct LoginOutcome {
    pub(crate) user: AdminUser,
    pub(crate) token: String,
}

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    jwt: Arc<JwtService>,
}

impl<R: UserRepository> AuthService<R> {
    pub(crate) fn new(repo: R, jwt: Arc<JwtService>) -> Self {
        Self { repo, jwt }
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<LoginOutcome, DomainError> {
        let req = req.validate()?;

        let creds = match self.repo.find_credentials(&req.username).await? {
            Some(creds) => creds,
            None => {
                // keep the miss path about as slow as a real verification
                match verify_password(&req.password, DUMMY_PASSWORD_HASH) {
                    Ok(()) | Err(DomainError::InvalidCredentials) => {}
                    Err(err) => return Err(err),
                }
                warn!(username = %req.username, "login for unknown user");
                return Err(DomainError::InvalidCredentials);
            }
        };

        verify_password(&req.password, &creds.password_hash)?;

        let token = self
            .jwt
            .generate_token(creds.user.id, &creds.user.username, &creds.user.role)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        info!(user_id = %creds.user.id, "admin signed in");
        Ok(LoginOutcome {
            user: creds.user,
            token,
        })
    }
}

pub(crate) fn hash_password(raw_password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = argon2()?
        .hash_password(raw_password.as_bytes(), &salt)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;
    Ok(password_hash.to_string())
}

pub(crate) fn verify_password(raw_password: &str, password_hash: &str) -> Result<(), DomainError> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|err| DomainError::Unexpected(err.to_string()))?;
    argon2()?
        .verify_password(raw_password.as_bytes(), &parsed_hash)
        .map_err(|err| match err {
            PasswordHashError::Password => DomainError::InvalidCredentials,
            _ => DomainError::Unexpected(err.to_string()),
        })
}

fn argon2() -> Result<Argon2<'static>, DomainError> {
    let params =
        Params::new(19 * 1024, 2, 1, None).map_err(|err| DomainError::Unexpected(err.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{AuthService, hash_password, verify_password};
    use crate::domain::error::DomainError;
    use crate::domain::user::LoginRequest;
    use crate::infrastructure::jwt::JwtService;
    use crate::test_support::{InMemoryUserRepo, TEST_SECRET};

    fn test_jwt() -> Arc<JwtService> {
        Arc::new(JwtService::new(TEST_SECRET).expect("secret is valid"))
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn login_returns_token_for_valid_credentials() {
        let repo = InMemoryUserRepo::default();
        let user = repo.seed("ambika", "Ambika", "correct-password");
        let jwt = test_jwt();
        let service = AuthService::new(repo, jwt.clone());

        let outcome = service
            .login(login("  ambika ", "correct-password"))
            .await
            .expect("login must succeed");

        assert_eq!(outcome.user.id, user.id);
        let claims = jwt.verify_token(&outcome.token).expect("token must verify");
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.username, "ambika");
        assert_eq!(claims.role, "admin");
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let repo = InMemoryUserRepo::default();
        repo.seed("ambika", "Ambika", "correct-password");
        let service = AuthService::new(repo, test_jwt());

        let err = service
            .login(login("ambika", "wrong-password"))
            .await
            .expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_rejects_unknown_user_the_same_way() {
        let service = AuthService::new(InMemoryUserRepo::default(), test_jwt());

        let err = service
            .login(login("ghost", "whatever"))
            .await
            .expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let service = AuthService::new(InMemoryUserRepo::default(), test_jwt());

        let err = service.login(login("", "pw")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn store_failure_is_not_reported_as_bad_credentials() {
        let repo = InMemoryUserRepo::default();
        repo.fail_reads();
        let service = AuthService::new(repo, test_jwt());

        let err = service.login(login("ambika", "pw")).await.unwrap_err();
        assert!(matches!(err, DomainError::Unexpected(_)));
    }

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("s3cret").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("s3cret", &hash).is_ok());
        assert!(matches!(
            verify_password("other", &hash),
            Err(DomainError::InvalidCredentials)
        ));
    }
}
