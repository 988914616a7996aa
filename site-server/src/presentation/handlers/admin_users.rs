use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::application::auth_service::hash_password;
use crate::data::user_repository::{NewUser, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::user::{CreateUserRequest, UpdateUserRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::pages::not_found_page;
use crate::presentation::i18n::LangQuery;
use crate::presentation::middleware::gate::CurrentAdmin;
use crate::presentation::views::Chrome;
use crate::presentation::views::admin::{self, UserFormValues};

pub(crate) const MISSING_USER_FIELDS: &str = "All fields are required";
pub(crate) const MISSING_PROFILE_FIELDS: &str = "Display name and role are required";
pub(crate) const USERNAME_TAKEN: &str = "Username is already taken.";
const TOO_LONG: &str = "A field is too long.";

#[derive(Debug, Default, Deserialize, Validate)]
pub(crate) struct NewUserForm {
    #[serde(default)]
    #[validate(length(max = 64))]
    pub(crate) username: String,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub(crate) display_name: String,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub(crate) role: String,
    #[serde(default)]
    #[validate(length(max = 256))]
    pub(crate) password: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub(crate) struct EditUserForm {
    #[serde(default)]
    #[validate(length(max = 128))]
    pub(crate) display_name: String,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub(crate) role: String,
    #[serde(default)]
    #[validate(length(max = 256))]
    pub(crate) password: Option<String>,
}

pub(crate) async fn list(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    current: CurrentAdmin,
) -> AppResult<Html<String>> {
    let users = state.user_service.list().await?;
    Ok(Html(admin::users_list(
        &Chrome {
            lang: query.lang(),
            path: "/admin/users",
            admin: current.0.as_ref(),
        },
        &users,
    )))
}

pub(crate) async fn new_form(Query(query): Query<LangQuery>, current: CurrentAdmin) -> Html<String> {
    Html(admin::new_user(
        &Chrome {
            lang: query.lang(),
            path: "/admin/users/new",
            admin: current.0.as_ref(),
        },
        &UserFormValues::default(),
        None,
    ))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    current: CurrentAdmin,
    Form(form): Form<NewUserForm>,
) -> AppResult<Response> {
    let rejected = |status: StatusCode, message: &str| -> AppResult<Response> {
        let values = UserFormValues {
            username: form.username.clone(),
            display_name: form.display_name.clone(),
            role: form.role.clone(),
        };
        let page = admin::new_user(
            &Chrome {
                lang: query.lang(),
                path: "/admin/users/new",
                admin: current.0.as_ref(),
            },
            &values,
            Some(message),
        );
        Ok((status, Html(page)).into_response())
    };

    if form.validate().is_err() {
        return rejected(StatusCode::BAD_REQUEST, TOO_LONG);
    }

    let req = CreateUserRequest {
        username: form.username.clone(),
        display_name: form.display_name.clone(),
        role: form.role.clone(),
        password: form.password.clone(),
    };
    let req = match req.validate() {
        Ok(req) => req,
        Err(_) => return rejected(StatusCode::BAD_REQUEST, MISSING_USER_FIELDS),
    };

    let password_hash = hash_password(&req.password)?;
    let new_user = NewUser {
        username: req.username,
        display_name: req.display_name,
        role: req.role,
        password_hash,
    };
    let username = new_user.username.clone();

    match state.user_service.create(new_user).await {
        Ok(()) => {
            info!(%username, "admin user created");
            Ok(Redirect::to("/admin/users").into_response())
        }
        Err(DomainError::AlreadyExists(_)) => rejected(StatusCode::CONFLICT, USERNAME_TAKEN),
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
    current: CurrentAdmin,
) -> AppResult<Response> {
    let path = format!("/admin/users/{id}");
    let chrome = Chrome {
        lang: query.lang(),
        path: &path,
        admin: current.0.as_ref(),
    };
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(not_found_page(&chrome));
    };

    match state.user_service.get(id).await {
        Ok(user) => Ok(Html(admin::edit_user(&chrome, &user, None)).into_response()),
        Err(DomainError::NotFound(_)) => Ok(not_found_page(&chrome)),
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
    current: CurrentAdmin,
    Form(form): Form<EditUserForm>,
) -> AppResult<Response> {
    let path = format!("/admin/users/{id}");
    let chrome = Chrome {
        lang: query.lang(),
        path: &path,
        admin: current.0.as_ref(),
    };
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(not_found_page(&chrome));
    };
    let user = match state.user_service.get(id).await {
        Ok(user) => user,
        Err(DomainError::NotFound(_)) => return Ok(not_found_page(&chrome)),
        Err(err) => return Err(err.into()),
    };

    let message = if form.validate().is_err() {
        TOO_LONG
    } else {
        let req = UpdateUserRequest {
            display_name: form.display_name.clone(),
            role: form.role.clone(),
            password: form.password.clone(),
        };
        match req.validate() {
            Ok(req) => {
                let password_hash = req.password.as_deref().map(hash_password).transpose()?;
                let patch = UserPatch {
                    display_name: Some(req.display_name),
                    role: Some(req.role),
                    password_hash,
                    avatar_url: None,
                };
                state.user_service.update(id, patch).await?;
                info!(user_id = %id, "admin user updated");
                return Ok(Redirect::to("/admin/users").into_response());
            }
            Err(_) => MISSING_PROFILE_FIELDS,
        }
    };

    let page = admin::edit_user(&chrome, &user, Some(message));
    Ok((StatusCode::BAD_REQUEST, Html(page)).into_response())
}
