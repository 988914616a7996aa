use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, UpdatePostRequest, parse_tags};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::pages::not_found_page;
use crate::presentation::i18n::LangQuery;
use crate::presentation::middleware::gate::{AuthenticatedAdmin, CurrentAdmin};
use crate::presentation::views::admin::{self, PostFormValues, author_options};
use crate::presentation::views::Chrome;

pub(crate) const MISSING_POST_FIELDS: &str = "All fields except tags are required";

#[derive(Debug, Default, Deserialize, Validate)]
pub(crate) struct PostForm {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub(crate) title: String,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub(crate) author: String,
    #[serde(default)]
    pub(crate) published_at: String,
    #[serde(default)]
    #[validate(length(max = 1024))]
    pub(crate) tags: String,
    #[serde(default)]
    pub(crate) body: String,
}

impl PostForm {
    fn missing_required(&self) -> bool {
        [&self.title, &self.author, &self.published_at, &self.body]
            .iter()
            .any(|value| value.trim().is_empty())
    }

    fn values(&self) -> PostFormValues {
        PostFormValues {
            title: self.title.clone(),
            slug: None,
            published_at: self.published_at.clone(),
            tags: self.tags.clone(),
            body: self.body.clone(),
        }
    }
}

/// Message shown above the form for a rejected submission.
fn rejection(form: &PostForm, err: Option<&DomainError>) -> String {
    if form.missing_required() {
        return MISSING_POST_FIELDS.to_string();
    }
    match err {
        Some(DomainError::Validation { field, message }) => format!("{field} {message}"),
        _ => "The post could not be saved.".to_string(),
    }
}

pub(crate) async fn list(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    current: CurrentAdmin,
) -> AppResult<Html<String>> {
    let posts = state.blog_service.list().await?;
    Ok(Html(admin::blog_list(
        &Chrome {
            lang: query.lang(),
            path: "/admin/blog",
            admin: current.0.as_ref(),
        },
        &posts,
    )))
}

pub(crate) async fn new_form(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    current: CurrentAdmin,
    auth: AuthenticatedAdmin,
) -> AppResult<Html<String>> {
    let users = state.user_service.list().await?;
    let authors = author_options(&users, &auth.claims.username);
    Ok(Html(admin::new_post(
        &Chrome {
            lang: query.lang(),
            path: "/admin/blog/new",
            admin: current.0.as_ref(),
        },
        &PostFormValues::default(),
        &authors,
        None,
    )))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    current: CurrentAdmin,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    let outcome = if form.missing_required() {
        None
    } else if form.validate().is_err() {
        Some(DomainError::Validation {
            field: "post",
            message: "has a field that is too long",
        })
    } else {
        let req = CreatePostRequest {
            title: form.title.clone(),
            author: form.author.clone(),
            published_at: form.published_at.clone(),
            body: form.body.clone(),
            tags: Some(parse_tags(&form.tags)),
        };
        match state.blog_service.create(req).await {
            Ok(()) => return Ok(Redirect::to("/admin/blog").into_response()),
            Err(err @ DomainError::Validation { .. }) => Some(err),
            Err(err) => return Err(err.into()),
        }
    };

    let users = state.user_service.list().await?;
    let authors = author_options(&users, &form.author);
    let page = admin::new_post(
        &Chrome {
            lang: query.lang(),
            path: "/admin/blog/new",
            admin: current.0.as_ref(),
        },
        &form.values(),
        &authors,
        Some(&rejection(&form, outcome.as_ref())),
    );
    Ok((StatusCode::BAD_REQUEST, Html(page)).into_response())
}

pub(crate) async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
    current: CurrentAdmin,
) -> AppResult<Response> {
    let path = format!("/admin/blog/{id}");
    let chrome = Chrome {
        lang: query.lang(),
        path: &path,
        admin: current.0.as_ref(),
    };
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(not_found_page(&chrome));
    };

    let (post, users) = match tokio::try_join!(
        state.blog_service.get(id),
        state.user_service.list()
    ) {
        Ok(found) => found,
        Err(DomainError::NotFound(_)) => return Ok(not_found_page(&chrome)),
        Err(err) => return Err(err.into()),
    };

    let authors = author_options(&users, &post.author);
    let values = PostFormValues::from_post(&post);
    Ok(Html(admin::edit_post(&chrome, &post, &values, &authors, None)).into_response())
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
    current: CurrentAdmin,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    let path = format!("/admin/blog/{id}");
    let chrome = Chrome {
        lang: query.lang(),
        path: &path,
        admin: current.0.as_ref(),
    };
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(not_found_page(&chrome));
    };

    let outcome = if form.missing_required() {
        None
    } else if form.validate().is_err() {
        Some(DomainError::Validation {
            field: "post",
            message: "has a field that is too long",
        })
    } else {
        let req = UpdatePostRequest {
            title: Some(form.title.clone()),
            author: Some(form.author.clone()),
            published_at: Some(form.published_at.clone()),
            body: Some(form.body.clone()),
            tags: Some(parse_tags(&form.tags)),
        };
        match state.blog_service.update(id, req).await {
            Ok(()) => return Ok(Redirect::to(&path).into_response()),
            Err(DomainError::NotFound(_)) => return Ok(not_found_page(&chrome)),
            Err(err @ DomainError::Validation { .. }) => Some(err),
            Err(err) => return Err(err.into()),
        }
    };

    let (post, users) = match tokio::try_join!(
        state.blog_service.get(id),
        state.user_service.list()
    ) {
        Ok(found) => found,
        Err(DomainError::NotFound(_)) => return Ok(not_found_page(&chrome)),
        Err(err) => return Err(err.into()),
    };

    let authors = author_options(&users, &form.author);
    let values = PostFormValues {
        slug: post.slug.clone(),
        ..form.values()
    };
    let page = admin::edit_post(
        &chrome,
        &post,
        &values,
        &authors,
        Some(&rejection(&form, outcome.as_ref())),
    );
    Ok((StatusCode::BAD_REQUEST, Html(page)).into_response())
}
