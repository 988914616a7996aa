use gloo_net::http::{Request, Response};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use web_sys::{Blob, FormData};

const AVATAR_ENDPOINT: &str = "/api/admin/avatar";
const UPLOAD_FILE_NAME: &str = "avatar.jpg";

#[derive(Debug, Clone)]
pub(crate) enum ApiError {
    Network(String),
    Http { status: u16, message: String },
    Decode(String),
    Browser(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http { message, .. } => f.write_str(message),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
            Self::Browser(msg) => f.write_str(msg),
        }
    }
}

pub(crate) fn browser(err: JsValue) -> ApiError {
    ApiError::Browser(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

async fn error_from(response: Response, fallback: &str) -> ApiError {
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.error)
        .ok()
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    ApiError::Http { status, message }
}

/// Sends the cropped JPEG; returns the stored public URL.
pub(crate) async fn upload_avatar(user_id: &str, jpeg: &Blob) -> Result<String, ApiError> {
    let form = FormData::new().map_err(browser)?;
    form.append_with_blob_and_filename("file", jpeg, UPLOAD_FILE_NAME)
        .map_err(browser)?;
    form.append_with_str("userId", user_id).map_err(browser)?;

    let response = Request::post(AVATAR_ENDPOINT)
        .body(form)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;

    if !response.ok() {
        return Err(error_from(response, "Upload failed").await);
    }

    let body: UploadResponse = response
        .json()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))?;
    Ok(body.url)
}

pub(crate) async fn remove_avatar(user_id: &str, avatar_url: Option<&str>) -> Result<(), ApiError> {
    let form = FormData::new().map_err(browser)?;
    form.append_with_str("userId", user_id).map_err(browser)?;
    if let Some(url) = avatar_url {
        form.append_with_str("avatarUrl", url).map_err(browser)?;
    }

    let response = Request::delete(AVATAR_ENDPOINT)
        .body(form)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;

    if !response.ok() {
        return Err(error_from(response, "Delete failed").await);
    }
    Ok(())
}
