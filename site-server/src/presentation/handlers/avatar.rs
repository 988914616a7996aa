use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::avatar_service::AvatarError;
use crate::domain::error::DomainError;
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};

pub(crate) const MISSING_UPLOAD_FIELDS: &str = "Missing file or userId";
pub(crate) const MISSING_USER_ID: &str = "Missing userId";
pub(crate) const INVALID_USER_ID: &str = "Invalid userId";
pub(crate) const NOT_AN_IMAGE: &str = "File must be an image";

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UploadAvatarResponse {
    pub(crate) url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct RemoveAvatarResponse {
    pub(crate) ok: bool,
}

/// Multipart body of the upload request; documentation only.
#[allow(dead_code)]
#[derive(Deserialize, ToSchema)]
pub(crate) struct UploadAvatarForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    #[serde(rename = "userId")]
    user_id: String,
}

struct UploadedFile {
    file_name: Option<String>,
    content_type: String,
    bytes: Vec<u8>,
}

fn bad_request(err: impl std::fmt::Display) -> AppError {
    AppError::BadRequest(err.to_string())
}

fn parse_user_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(INVALID_USER_ID.to_string()))
}

#[utoipa::path(
    post,
    path = "/api/admin/avatar",
    request_body(content = UploadAvatarForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Avatar stored", body = UploadAvatarResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::presentation::app_error::ErrorBody),
        (status = 500, description = "Upload failed", body = crate::presentation::app_error::ErrorBody)
    ),
    tag = "avatar"
)]
pub(crate) async fn upload_avatar(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadAvatarResponse>> {
    let mut file: Option<UploadedFile> = None;
    let mut user_id: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(bad_request)?;
                if !bytes.is_empty() {
                    file = Some(UploadedFile {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            Some("userId") => {
                let value = field.text().await.map_err(bad_request)?;
                user_id = Some(value.trim().to_string()).filter(|id| !id.is_empty());
            }
            _ => {}
        }
    }

    let (Some(file), Some(user_id)) = (file, user_id) else {
        return Err(AppError::BadRequest(MISSING_UPLOAD_FIELDS.to_string()));
    };
    let user_id = parse_user_id(&user_id)?;

    match state
        .avatar_service
        .upload(
            user_id,
            file.file_name.as_deref(),
            file.bytes,
            &file.content_type,
        )
        .await
    {
        Ok(url) => Ok(Json(UploadAvatarResponse { url })),
        Err(AvatarError::Domain(DomainError::Validation { .. })) => {
            Err(AppError::BadRequest(NOT_AN_IMAGE.to_string()))
        }
        Err(err) => {
            error!(%user_id, error = %err, "avatar upload failed");
            Err(AppError::Failed("Upload failed"))
        }
    }
}

/// `DELETE /api/admin/avatar` accepts either multipart or urlencoded bodies.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub(crate) struct RemoveAvatarForm {
    #[serde(rename = "userId")]
    pub(crate) user_id: Option<String>,
    #[serde(rename = "avatarUrl")]
    pub(crate) avatar_url: Option<String>,
}

impl<S> FromRequest<S> for RemoveAvatarForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(bad_request)?;
            let mut form = Self::default();
            while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
                let name = field.name().map(str::to_string);
                let value = field.text().await.map_err(bad_request)?;
                match name.as_deref() {
                    Some("userId") => form.user_id = Some(value),
                    Some("avatarUrl") => form.avatar_url = Some(value),
                    _ => {}
                }
            }
            Ok(form)
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(form) = Form::<Self>::from_request(req, state)
                .await
                .map_err(bad_request)?;
            Ok(form)
        } else {
            Ok(Self::default())
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/admin/avatar",
    request_body(content = RemoveAvatarForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Avatar removed", body = RemoveAvatarResponse),
        (status = 400, description = "Missing userId", body = crate::presentation::app_error::ErrorBody),
        (status = 500, description = "Delete failed", body = crate::presentation::app_error::ErrorBody)
    ),
    tag = "avatar"
)]
pub(crate) async fn remove_avatar(
    State(state): State<AppState>,
    form: RemoveAvatarForm,
) -> AppResult<Json<RemoveAvatarResponse>> {
    let Some(user_id) = form
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    else {
        return Err(AppError::BadRequest(MISSING_USER_ID.to_string()));
    };
    let user_id = parse_user_id(user_id)?;

    state
        .avatar_service
        .remove(user_id, form.avatar_url.as_deref())
        .await
        .map_err(|err| {
            error!(%user_id, error = %err, "avatar delete failed");
            AppError::Failed("Delete failed")
        })?;

    Ok(Json(RemoveAvatarResponse { ok: true }))
}
