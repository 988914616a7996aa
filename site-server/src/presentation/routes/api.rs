use axum::{
    Router,
    routing::{get, post},
};

use crate::presentation::AppState;
use crate::presentation::handlers::{avatar, current_admin};

pub(crate) fn public_router() -> Router<AppState> {
    Router::new().route("/api/current-admin", get(current_admin::current_admin))
}

pub(crate) fn admin_router() -> Router<AppState> {
    Router::new().route(
        "/avatar",
        post(avatar::upload_avatar).delete(avatar::remove_avatar),
    )
}
