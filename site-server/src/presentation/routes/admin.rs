use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::handlers::{admin, admin_posts, admin_users};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::hub))
        .route("/blog", get(admin_posts::list))
        .route(
            "/blog/new",
            get(admin_posts::new_form).post(admin_posts::create),
        )
        .route(
            "/blog/{id}",
            get(admin_posts::edit_form).post(admin_posts::update),
        )
        .route("/users", get(admin_users::list))
        .route(
            "/users/new",
            get(admin_users::new_form).post(admin_users::create),
        )
        .route(
            "/users/{id}",
            get(admin_users::edit_form).post(admin_users::update),
        )
}
