use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::domain::error::DomainError;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::i18n::LangQuery;
use crate::presentation::middleware::gate::CurrentAdmin;
use crate::presentation::views::{Chrome, public};

pub(crate) async fn home(Query(query): Query<LangQuery>, admin: CurrentAdmin) -> Html<String> {
    Html(public::home(&Chrome {
        lang: query.lang(),
        path: "/",
        admin: admin.0.as_ref(),
    }))
}

pub(crate) async fn about(Query(query): Query<LangQuery>, admin: CurrentAdmin) -> Html<String> {
    Html(public::about(&Chrome {
        lang: query.lang(),
        path: "/about",
        admin: admin.0.as_ref(),
    }))
}

pub(crate) async fn contact(Query(query): Query<LangQuery>, admin: CurrentAdmin) -> Html<String> {
    Html(public::contact(&Chrome {
        lang: query.lang(),
        path: "/contact",
        admin: admin.0.as_ref(),
    }))
}

pub(crate) async fn blog_index(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    admin: CurrentAdmin,
) -> AppResult<Html<String>> {
    let posts = state.blog_service.list().await?;
    Ok(Html(public::blog_list(
        &Chrome {
            lang: query.lang(),
            path: "/blog",
            admin: admin.0.as_ref(),
        },
        &posts,
    )))
}

pub(crate) async fn blog_post(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
    Query(query): Query<LangQuery>,
    admin: CurrentAdmin,
) -> AppResult<Response> {
    let path = format!("/blog/{identifier}");
    let chrome = Chrome {
        lang: query.lang(),
        path: &path,
        admin: admin.0.as_ref(),
    };

    match state.blog_service.get_by_slug_or_id(&identifier).await {
        Ok(post) => Ok(Html(public::blog_detail(&chrome, &post)).into_response()),
        Err(DomainError::NotFound(_)) => Ok(not_found_page(&chrome)),
        Err(err) => Err(err.into()),
    }
}

pub(crate) fn not_found_page(chrome: &Chrome<'_>) -> Response {
    (StatusCode::NOT_FOUND, Html(public::not_found(chrome))).into_response()
}

pub(crate) async fn fallback(Query(query): Query<LangQuery>, admin: CurrentAdmin) -> Response {
    not_found_page(&Chrome {
        lang: query.lang(),
        path: "/",
        admin: admin.0.as_ref(),
    })
}
