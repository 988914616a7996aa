use anyhow::{Result, anyhow};
use axum::Router;
use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};

use crate::infrastructure::settings::Settings;

/// Only the JSON API is meant for other origins; pages are same-origin.
/// An empty origin list leaves CORS off.
pub(crate) fn build_cors_layer(origins: &[String]) -> Result<Option<CorsLayer>> {
    if origins.is_empty() {
        return Ok(None);
    }

    let layer = if origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = origins
            .iter()
            .map(|origin| origin.parse())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| anyhow!("invalid CORS origin: {err}"))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_credentials(true)
    };

    Ok(Some(
        layer
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT]),
    ))
}

pub(crate) fn apply_cors(router: Router, settings: &Settings) -> Result<Router> {
    Ok(match build_cors_layer(&settings.cors_origins)? {
        Some(cors) => router.layer(cors),
        None => router,
    })
}
