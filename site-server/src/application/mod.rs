pub(crate) mod auth_service;
pub(crate) mod avatar_service;
pub(crate) mod blog_service;
pub(crate) mod user_service;
