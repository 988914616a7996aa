use axum::Router;
use axum::middleware;

use super::AppState;
use super::middleware::gate::admin_gate;

pub(crate) mod admin;
pub(crate) mod api;
pub(crate) mod pages;

/// Everything under `/admin` and `/api/admin` sits behind the session gate.
pub(crate) fn router(state: AppState) -> Router<AppState> {
    let gated = Router::new()
        .nest("/admin", admin::router())
        .nest("/api/admin", api::admin_router())
        .layer(middleware::from_fn_with_state(state, admin_gate));

    Router::new()
        .merge(pages::router())
        .merge(api::public_router())
        .merge(gated)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::domain::user::AdminUser;
    use crate::infrastructure::jwt::JwtService;
    use crate::presentation::{AppState, http_handlers};
    use crate::test_support::{
        InMemoryBlobStore, InMemoryPostRepo, InMemoryUserRepo, TEST_SECRET, sample_post,
    };

    struct Harness {
        app: Router,
        jwt: Arc<JwtService>,
        posts: InMemoryPostRepo,
        users: InMemoryUserRepo,
        blobs: InMemoryBlobStore,
        admin: AdminUser,
    }

    impl Harness {
        fn new() -> Self {
            let posts = InMemoryPostRepo::default();
            let users = InMemoryUserRepo::default();
            let admin = users.seed("ambika", "Ambika Sharma", "s3cret-pass");
            let jwt = Arc::new(JwtService::new(TEST_SECRET).unwrap());
            let blobs = InMemoryBlobStore::default();
            let state = AppState::new(
                Arc::new(posts.clone()),
                Arc::new(users.clone()),
                Arc::new(blobs.clone()),
                jwt.clone(),
                false,
            );
            Self {
                app: http_handlers::routes(state),
                jwt,
                posts,
                users,
                blobs,
                admin,
            }
        }

        fn session_cookie(&self) -> String {
            let token = self
                .jwt
                .generate_token(self.admin.id, &self.admin.username, &self.admin.role)
                .unwrap();
            format!("admin_token={token}")
        }

        async fn send(&self, request: Request<Body>) -> (StatusCode, header::HeaderMap, String) {
            let response = self.app.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let headers = response.headers().clone();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
        }
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn form(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const BOUNDARY: &str = "avatar-boundary";

    /// `(name, file name and content type for file parts, value)`
    type Part<'a> = (&'a str, Option<(&'a str, &'a str)>, &'a [u8]);

    fn multipart(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, file, value) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match file {
                Some((file_name, content_type)) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(value);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn with_cookie(mut request: Request<Body>, cookie: &str) -> Request<Body> {
        request
            .headers_mut()
            .insert(header::COOKIE, cookie.parse().unwrap());
        request
    }

    fn location(headers: &header::HeaderMap) -> &str {
        headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }

    fn set_cookie(headers: &header::HeaderMap) -> Option<&str> {
        headers
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
    }

    #[tokio::test]
    async fn admin_without_cookie_redirects_to_login() {
        let harness = Harness::new();
        let (status, headers, _) = harness.send(get("/admin")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location(&headers), "/login");
        assert!(set_cookie(&headers).is_none());

        let (status, headers, _) = harness.send(get("/admin/blog/new")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location(&headers), "/login");
    }

    #[tokio::test]
    async fn invalid_cookie_is_cleared_on_redirect() {
        let harness = Harness::new();
        let (status, headers, _) = harness
            .send(with_cookie(get("/admin/users"), "admin_token=garbage"))
            .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location(&headers), "/login");
        let cleared = set_cookie(&headers).expect("removal cookie");
        assert!(cleared.starts_with("admin_token="));
        assert!(cleared.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn valid_cookie_reaches_admin_pages() {
        let harness = Harness::new();
        let cookie = harness.session_cookie();
        let (status, _, body) = harness.send(with_cookie(get("/admin"), &cookie)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Welcome back"));
        assert!(body.contains("Ambika Sharma"));
    }

    #[tokio::test]
    async fn wrong_password_shows_error_without_cookie() {
        let harness = Harness::new();
        let (status, headers, body) = harness
            .send(form("POST", "/login", "username=ambika&password=nope"))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Invalid credentials."));
        assert!(set_cookie(&headers).is_none());
    }

    #[tokio::test]
    async fn blank_login_fields_are_rejected() {
        let harness = Harness::new();
        let (status, _, body) = harness
            .send(form("POST", "/login", "username=ambika&password="))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Username and password are required."));
    }

    #[tokio::test]
    async fn successful_login_sets_session_cookie() {
        let harness = Harness::new();
        let (status, headers, _) = harness
            .send(form("POST", "/login", "username=ambika&password=s3cret-pass"))
            .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location(&headers), "/admin");
        let cookie = set_cookie(&headers).expect("session cookie");
        assert!(cookie.starts_with("admin_token="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=604800"));
    }

    #[tokio::test]
    async fn logout_clears_cookie() {
        let harness = Harness::new();
        let cookie = harness.session_cookie();
        let (status, headers, _) = harness
            .send(with_cookie(form("POST", "/logout", ""), &cookie))
            .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location(&headers), "/login");
        assert!(set_cookie(&headers).is_some_and(|value| value.contains("Max-Age=0")));
    }

    #[tokio::test]
    async fn current_admin_requires_session() {
        let harness = Harness::new();
        let (status, _, body) = harness.send(get("/api/current-admin")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, r#"{"error":"Unauthorized"}"#);

        let cookie = harness.session_cookie();
        let (status, _, body) = harness
            .send(with_cookie(get("/api/current-admin"), &cookie))
            .await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["username"], "ambika");
        assert_eq!(json["display_name"], "Ambika Sharma");
        assert!(json["avatar_url"].is_null());
    }

    #[tokio::test]
    async fn blog_post_resolves_by_slug_and_id() {
        let harness = Harness::new();
        let post = sample_post("Clean Water Drive", Some("clean-water-drive"));
        let id = post.id;
        harness.posts.insert(post);

        let (status, _, body) = harness.send(get("/blog/clean-water-drive")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Clean Water Drive"));

        let (status, _, _) = harness.send(get(&format!("/blog/{id}"))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, _) = harness.send(get("/blog/no-such-post")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn avatar_delete_requires_user_id() {
        let harness = Harness::new();
        let cookie = harness.session_cookie();
        let (status, _, body) = harness
            .send(with_cookie(
                form("DELETE", "/api/admin/avatar", "avatarUrl="),
                &cookie,
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"Missing userId"}"#);
    }

    #[tokio::test]
    async fn avatar_delete_clears_the_column() {
        let harness = Harness::new();
        let cookie = harness.session_cookie();
        let body = format!("userId={}", harness.admin.id);
        let (status, _, body) = harness
            .send(with_cookie(form("DELETE", "/api/admin/avatar", &body), &cookie))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn duplicate_username_rerenders_form() {
        let harness = Harness::new();
        let cookie = harness.session_cookie();
        let (status, _, body) = harness
            .send(with_cookie(
                form(
                    "POST",
                    "/admin/users/new",
                    "username=ambika&display_name=Other&role=admin&password=pw",
                ),
                &cookie,
            ))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.contains("Username is already taken."));
    }

    #[tokio::test]
    async fn creating_a_post_derives_its_slug() {
        let harness = Harness::new();
        let cookie = harness.session_cookie();
        let (status, headers, _) = harness
            .send(with_cookie(
                form(
                    "POST",
                    "/admin/blog/new",
                    "title=Hello+World&author=ambika&published_at=2024-05-01T10%3A00&tags=a%2C+b&body=Hi",
                ),
                &cookie,
            ))
            .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location(&headers), "/admin/blog");

        let stored = harness.posts.snapshot();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].slug.as_deref(), Some("hello-world"));
        assert_eq!(stored[0].tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn post_form_missing_body_is_rejected() {
        let harness = Harness::new();
        let cookie = harness.session_cookie();
        let (status, _, body) = harness
            .send(with_cookie(
                form(
                    "POST",
                    "/admin/blog/new",
                    "title=Hello&author=ambika&published_at=2024-05-01T10%3A00&body=",
                ),
                &cookie,
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("All fields except tags are required"));
        assert!(harness.posts.snapshot().is_empty());
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let harness = Harness::new();
        let (status, _, body) = harness.send(get("/healthz")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn avatar_upload_stores_image_and_returns_url() {
        let harness = Harness::new();
        let cookie = harness.session_cookie();
        let user_id = harness.admin.id.to_string();
        let request = multipart(
            "/api/admin/avatar",
            &[
                ("file", Some(("me.png", "image/png")), &b"\x89PNG"[..]),
                ("userId", None, user_id.as_bytes()),
            ],
        );

        let (status, _, body) = harness.send(with_cookie(request, &cookie)).await;
        assert_eq!(status, StatusCode::OK);
        let url = format!("https://blob.test/avatars/{user_id}.png");
        assert_eq!(body, format!(r#"{{"url":"{url}"}}"#));
        assert_eq!(
            harness.blobs.get(&format!("avatars/{user_id}.png")),
            Some(b"\x89PNG".to_vec())
        );
        let stored = harness.users.user(harness.admin.id).unwrap();
        assert_eq!(stored.avatar_url.as_deref(), Some(url.as_str()));
    }

    #[tokio::test]
    async fn avatar_upload_without_file_is_rejected() {
        let harness = Harness::new();
        let cookie = harness.session_cookie();
        let user_id = harness.admin.id.to_string();
        let request = multipart("/api/admin/avatar", &[("userId", None, user_id.as_bytes())]);

        let (status, _, body) = harness.send(with_cookie(request, &cookie)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"Missing file or userId"}"#);
        assert!(harness.blobs.is_empty());
    }

    #[tokio::test]
    async fn avatar_upload_rejects_non_images() {
        let harness = Harness::new();
        let cookie = harness.session_cookie();
        let user_id = harness.admin.id.to_string();
        let request = multipart(
            "/api/admin/avatar",
            &[
                ("file", Some(("notes.txt", "text/plain")), &b"hello"[..]),
                ("userId", None, user_id.as_bytes()),
            ],
        );

        let (status, _, body) = harness.send(with_cookie(request, &cookie)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"File must be an image"}"#);
        assert!(harness.blobs.is_empty());
    }

    #[tokio::test]
    async fn avatar_upload_without_session_redirects_to_login() {
        let harness = Harness::new();
        let user_id = harness.admin.id.to_string();
        let request = multipart(
            "/api/admin/avatar",
            &[
                ("file", Some(("me.png", "image/png")), &b"\x89PNG"[..]),
                ("userId", None, user_id.as_bytes()),
            ],
        );

        let (status, headers, _) = harness.send(request).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location(&headers), "/login");
        assert!(harness.blobs.is_empty());
    }

    #[tokio::test]
    async fn editing_a_post_with_blank_tags_clears_them() {
        let harness = Harness::new();
        let cookie = harness.session_cookie();
        let post = sample_post("Clean Water Drive", Some("clean-water-drive"));
        let id = post.id;
        harness.posts.insert(post);

        let (status, headers, _) = harness
            .send(with_cookie(
                form(
                    "POST",
                    &format!("/admin/blog/{id}"),
                    "title=Clean+Water+Drive+2025&author=ambika&published_at=2024-05-01T10%3A00&tags=&body=Updated",
                ),
                &cookie,
            ))
            .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location(&headers), format!("/admin/blog/{id}"));

        let stored = harness.posts.get_snapshot(id).unwrap();
        assert!(stored.tags.is_empty());
        assert_eq!(stored.slug.as_deref(), Some("clean-water-drive-2025"));
        assert_eq!(stored.body, "Updated");
    }

    #[tokio::test]
    async fn editing_a_user_with_blank_password_keeps_the_hash() {
        let harness = Harness::new();
        let cookie = harness.session_cookie();
        let before = harness.users.password_hash_of("ambika").unwrap();

        let (status, headers, _) = harness
            .send(with_cookie(
                form(
                    "POST",
                    &format!("/admin/users/{}", harness.admin.id),
                    "display_name=Ambika+S.&role=editor&password=",
                ),
                &cookie,
            ))
            .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location(&headers), "/admin/users");

        assert_eq!(harness.users.password_hash_of("ambika").unwrap(), before);
        let stored = harness.users.user(harness.admin.id).unwrap();
        assert_eq!(stored.display_name, "Ambika S.");
        assert_eq!(stored.role, "editor");
    }
}
