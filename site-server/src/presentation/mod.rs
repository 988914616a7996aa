use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::avatar_service::AvatarService;
use crate::application::blog_service::BlogService;
use crate::application::user_service::UserService;
use crate::data::blob_store::DynBlobStore;
use crate::data::post_repository::DynPostRepository;
use crate::data::user_repository::DynUserRepository;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod i18n;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;
pub(crate) mod views;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<DynUserRepository>>,
    pub(crate) blog_service: Arc<BlogService<DynPostRepository>>,
    pub(crate) user_service: Arc<UserService<DynUserRepository>>,
    pub(crate) avatar_service: Arc<AvatarService<DynUserRepository, DynBlobStore>>,
    pub(crate) jwt: Arc<JwtService>,
    pub(crate) secure_cookies: bool,
}

impl AppState {
    /// Wires every service over the same repositories.
    pub(crate) fn new(
        posts: DynPostRepository,
        users: DynUserRepository,
        blobs: DynBlobStore,
        jwt: Arc<JwtService>,
        secure_cookies: bool,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(users.clone(), jwt.clone())),
            blog_service: Arc::new(BlogService::new(posts)),
            user_service: Arc::new(UserService::new(users.clone())),
            avatar_service: Arc::new(AvatarService::new(users, blobs)),
            jwt,
            secure_cookies,
        }
    }
}
