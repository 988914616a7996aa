use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::Modify;

use crate::presentation::app_error::ErrorBody;
use crate::presentation::handlers::avatar::{
    RemoveAvatarForm, RemoveAvatarResponse, UploadAvatarForm, UploadAvatarResponse,
};
use crate::presentation::handlers::current_admin::CurrentAdminDto;
use crate::presentation::http_handlers::HealthzResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http_handlers::healthz,
        crate::presentation::handlers::current_admin::current_admin,
        crate::presentation::handlers::avatar::upload_avatar,
        crate::presentation::handlers::avatar::remove_avatar
    ),
    components(
        schemas(
            ErrorBody,
            HealthzResponse,
            CurrentAdminDto,
            UploadAvatarForm,
            UploadAvatarResponse,
            RemoveAvatarForm,
            RemoveAvatarResponse
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "auth", description = "Admin session"),
        (name = "avatar", description = "Admin avatar storage")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "admin_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("admin_token"))),
        );
        openapi.components = Some(components);
    }
}
