pub(crate) mod admin;
pub(crate) mod admin_posts;
pub(crate) mod admin_users;
pub(crate) mod auth;
pub(crate) mod avatar;
pub(crate) mod current_admin;
pub(crate) mod pages;
