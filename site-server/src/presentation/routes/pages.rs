use axum::{
    Router,
    routing::{get, post},
};

use crate::presentation::AppState;
use crate::presentation::handlers::{auth, pages};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact))
        .route("/blog", get(pages::blog_index))
        .route("/blog/{identifier}", get(pages::blog_post))
        .route("/login", get(auth::show_login).post(auth::login))
        .route("/logout", post(auth::logout))
}
