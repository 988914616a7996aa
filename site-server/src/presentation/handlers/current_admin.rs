use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::user::AdminUser;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::middleware::gate::CurrentAdmin;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CurrentAdminDto {
    pub(crate) username: String,
    pub(crate) display_name: String,
    pub(crate) avatar_url: Option<String>,
}

impl From<AdminUser> for CurrentAdminDto {
    fn from(user: AdminUser) -> Self {
        Self {
            username: user.username,
            display_name: user.display_name,
            avatar_url: user.avatar_url,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/current-admin",
    responses(
        (status = 200, description = "Signed-in admin", body = CurrentAdminDto),
        (status = 401, description = "No valid session", body = crate::presentation::app_error::ErrorBody)
    ),
    tag = "auth"
)]
pub(crate) async fn current_admin(current: CurrentAdmin) -> AppResult<Json<CurrentAdminDto>> {
    current
        .0
        .map(|user| Json(CurrentAdminDto::from(user)))
        .ok_or(AppError::Unauthorized)
}
