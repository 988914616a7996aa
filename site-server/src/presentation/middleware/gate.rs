use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{debug, warn};

use crate::domain::user::AdminUser;
use crate::infrastructure::jwt::{Claims, JwtService};
use crate::presentation::AppState;
use crate::presentation::app_error::AppError;

pub(crate) const ADMIN_COOKIE: &str = "admin_token";
pub(crate) const LOGIN_PATH: &str = "/login";

#[derive(Debug)]
pub(crate) enum GateDecision {
    /// No cookie at all.
    Redirect,
    Proceed(Claims),
    /// Cookie present but the token did not verify.
    RedirectAndClear,
}

pub(crate) fn evaluate(jwt: &JwtService, token: Option<&str>) -> GateDecision {
    let Some(token) = token else {
        return GateDecision::Redirect;
    };
    match jwt.verify_token(token) {
        Ok(claims) => GateDecision::Proceed(claims),
        Err(err) => {
            debug!(error = %err, "rejecting admin cookie");
            GateDecision::RedirectAndClear
        }
    }
}

/// Claims of the admin that passed the gate.
#[derive(Debug, Clone)]
pub(crate) struct AuthenticatedAdmin {
    pub(crate) claims: Claims,
}

impl<S> FromRequestParts<S> for AuthenticatedAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAdmin>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

pub(crate) async fn admin_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = jar.get(ADMIN_COOKIE).map(|cookie| cookie.value().to_owned());

    match evaluate(&state.jwt, token.as_deref()) {
        GateDecision::Redirect => Redirect::to(LOGIN_PATH).into_response(),
        GateDecision::RedirectAndClear => {
            (jar.remove(removal_cookie()), Redirect::to(LOGIN_PATH)).into_response()
        }
        GateDecision::Proceed(claims) => {
            request
                .extensions_mut()
                .insert(AuthenticatedAdmin { claims });
            next.run(request).await
        }
    }
}

pub(crate) fn session_cookie(token: String, secure: bool, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build((ADMIN_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .path("/")
        .max_age(time::Duration::seconds(max_age_seconds))
        .build()
}

pub(crate) fn removal_cookie() -> Cookie<'static> {
    Cookie::build(ADMIN_COOKIE).path("/").build()
}

/// The signed-in admin's account, if the cookie verifies and the user still
/// exists. Never rejects; public pages use it for the header.
#[derive(Debug, Clone)]
pub(crate) struct CurrentAdmin(pub(crate) Option<AdminUser>);

impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(cookie) = jar.get(ADMIN_COOKIE) else {
            return Ok(Self(None));
        };
        let Ok(claims) = state.jwt.verify_token(cookie.value()) else {
            return Ok(Self(None));
        };

        match state.user_service.get_by_username(&claims.username).await {
            Ok(user) => Ok(Self(user)),
            Err(err) => {
                warn!(error = %err, "current admin lookup failed");
                Ok(Self(None))
            }
        }
    }
}
