use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use super::handlers::pages;
use super::{AppState, routes};

pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .merge(routes::router(state.clone()))
        .fallback(pages::fallback)
        .with_state(state)
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthzResponse {
    status: &'static str,
}

#[utoipa::path(
    get,
    path = "/healthz",
    responses((status = 200, description = "Service is up", body = HealthzResponse)),
    tag = "health"
)]
pub(crate) async fn healthz() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}
