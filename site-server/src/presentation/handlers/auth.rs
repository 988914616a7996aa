use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::domain::error::DomainError;
use crate::domain::user::LoginRequest;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::i18n::LangQuery;
use crate::presentation::middleware::gate::{
    CurrentAdmin, LOGIN_PATH, removal_cookie, session_cookie,
};
use crate::presentation::views::Chrome;
use crate::presentation::views::login::login_page;

pub(crate) const MISSING_FIELDS: &str = "Username and password are required.";
pub(crate) const INVALID_CREDENTIALS: &str = "Invalid credentials.";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LoginForm {
    #[serde(default)]
    pub(crate) username: String,
    #[serde(default)]
    pub(crate) password: String,
}

fn render(
    status: StatusCode,
    query: &LangQuery,
    admin: &CurrentAdmin,
    error: Option<&str>,
    username: &str,
) -> Response {
    let chrome = Chrome {
        lang: query.lang(),
        path: LOGIN_PATH,
        admin: admin.0.as_ref(),
    };
    (status, Html(login_page(&chrome, error, username))).into_response()
}

pub(crate) async fn show_login(Query(query): Query<LangQuery>, admin: CurrentAdmin) -> Response {
    render(StatusCode::OK, &query, &admin, None, "")
}

pub(crate) async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<LangQuery>,
    admin: CurrentAdmin,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let username = form.username.trim();
    if username.is_empty() || form.password.trim().is_empty() {
        return Ok(render(
            StatusCode::BAD_REQUEST,
            &query,
            &admin,
            Some(MISSING_FIELDS),
            username,
        ));
    }

    let req = LoginRequest {
        username: username.to_string(),
        password: form.password.clone(),
    };

    match state.auth_service.login(req).await {
        Ok(outcome) => {
            let cookie = session_cookie(
                outcome.token,
                state.secure_cookies,
                state.jwt.ttl_seconds(),
            );
            Ok((jar.add(cookie), Redirect::to("/admin")).into_response())
        }
        Err(DomainError::InvalidCredentials | DomainError::Validation { .. }) => Ok(render(
            StatusCode::UNAUTHORIZED,
            &query,
            &admin,
            Some(INVALID_CREDENTIALS),
            username,
        )),
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(removal_cookie()), Redirect::to(LOGIN_PATH))
}
