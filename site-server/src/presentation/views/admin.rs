use std::fmt::Write;

use uuid::Uuid;

use crate::domain::post::{BlogPost, slug_for};
use crate::domain::user::{AdminUser, initials_of};

use super::{Chrome, attr, avatar, esc, fmt_datetime, fmt_datetime_local, layout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuItem {
    Hub,
    Users,
    Blog,
}

fn menu(active: MenuItem) -> String {
    let mut out = String::from(r#"<nav class="admin-menu"><p class="kicker">Menu</p>"#);
    for (item, href, label) in [
        (MenuItem::Hub, "/admin", "Admin hub"),
        (MenuItem::Users, "/admin/users", "Users"),
        (MenuItem::Blog, "/admin/blog", "Blog"),
    ] {
        let class = if item == active { "active" } else { "" };
        let _ = write!(out, r#"<a class="{class}" href="{href}">{label} <span>→</span></a>"#);
    }
    out.push_str("</nav>");
    out
}

fn shell(title: &str, chrome: &Chrome<'_>, active: MenuItem, content: &str) -> String {
    let main = format!(
        r#"<main class="container admin-grid">{menu}<div class="stack">{content}</div></main>"#,
        menu = menu(active),
    );
    layout(title, chrome, &main)
}

fn alert(error: Option<&str>) -> String {
    error
        .map(|message| format!(r#"<div class="alert" role="alert">{}</div>"#, esc(message)))
        .unwrap_or_default()
}

pub(crate) fn hub(chrome: &Chrome<'_>) -> String {
    let text = chrome.lang.copy();
    let content = format!(
        r#"<header><p class="kicker">Admin</p><h1>{title}</h1><p class="muted">{body}</p></header>
<section><h2>Welcome back</h2><p class="muted">Use the menu to jump directly into management tasks.</p>
<ul><li>Users: manage admin accounts, roles, and credentials.</li><li>Blog: publish and edit stories and updates.</li><li>Programs (coming soon): organize initiatives and updates.</li></ul></section>"#,
        title = esc(text.admin.title),
        body = esc(text.admin.body),
    );
    shell(text.admin.title, chrome, MenuItem::Hub, &content)
}

pub(crate) fn blog_list(chrome: &Chrome<'_>, posts: &[BlogPost]) -> String {
    let mut rows = String::new();
    for post in posts {
        let tags = if post.tags.is_empty() {
            "—".to_string()
        } else {
            post.tags.join(", ")
        };
        let _ = write!(
            rows,
            r#"<tr><td><strong>{title}</strong></td><td>{author}</td><td>{published}</td><td>{tags}</td><td class="right"><a class="btn ghost small" href="/admin/blog/{id}">Edit</a></td></tr>"#,
            title = esc(&post.title),
            author = esc(&post.author),
            published = fmt_datetime(&post.published_at),
            tags = esc(&tags),
            id = post.id,
        );
    }
    if posts.is_empty() {
        rows.push_str(
            r#"<tr><td colspan="5" class="empty">No posts yet. Create the first post above.</td></tr>"#,
        );
    }

    let content = format!(
        r#"<header class="row"><div><p class="kicker">Admin</p><h1>Blog <span class="pill">{count} posts</span></h1><p class="muted">Manage blog posts for the site.</p></div><a class="btn" href="/admin/blog/new">+ New post</a></header>
<section class="card"><div class="row muted"><strong>Post directory</strong><span class="pill">Sorted by published_at</span></div>
<table><thead><tr><th>Title</th><th>Author</th><th>Published</th><th>Tags</th><th class="right">Actions</th></tr></thead><tbody>{rows}</tbody></table></section>"#,
        count = posts.len(),
    );
    shell("Blog", chrome, MenuItem::Blog, &content)
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AuthorOption {
    pub(crate) value: String,
    pub(crate) label: String,
    pub(crate) avatar_url: Option<String>,
    pub(crate) selected: bool,
}

/// Options for the author `<select>`; the value is the username. `current`
/// selects the option whose username or label matches it. An unmatched
/// non-blank `current` is prepended so an existing author is never lost.
pub(crate) fn author_options(users: &[AdminUser], current: &str) -> Vec<AuthorOption> {
    let current = current.trim();
    let mut options: Vec<AuthorOption> = users
        .iter()
        .map(|user| AuthorOption {
            value: user.username.clone(),
            label: user.label().to_string(),
            avatar_url: user.avatar_url.clone(),
            selected: false,
        })
        .collect();

    let matched = options
        .iter()
        .position(|opt| opt.value == current || opt.label == current);

    match matched {
        Some(index) => options[index].selected = true,
        None if !current.is_empty() => options.insert(
            0,
            AuthorOption {
                value: current.to_string(),
                label: current.to_string(),
                avatar_url: None,
                selected: true,
            },
        ),
        None => {
            if let Some(first) = options.first_mut() {
                first.selected = true;
            }
        }
    }
    options
}

/// Raw form values, echoed back when a submission is rejected.
#[derive(Debug, Clone, Default)]
pub(crate) struct PostFormValues {
    pub(crate) title: String,
    pub(crate) slug: Option<String>,
    pub(crate) published_at: String,
    pub(crate) tags: String,
    pub(crate) body: String,
}

impl PostFormValues {
    pub(crate) fn from_post(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            published_at: fmt_datetime_local(&post.published_at),
            tags: post.tags.join(", "),
            body: post.body.clone(),
        }
    }
}

fn post_fields(values: &PostFormValues, authors: &[AuthorOption]) -> String {
    let slug = slug_for(&values.title).or_else(|| values.slug.clone());
    let slug_input = format!(
        r#"<input id="slug-preview" value="{value}" data-stored-slug="{stored}" placeholder="Will be generated from title" readonly>"#,
        value = attr(slug.as_deref().unwrap_or_default()),
        stored = attr(values.slug.as_deref().unwrap_or_default()),
    );

    let mut options = String::new();
    for opt in authors {
        let _ = write!(
            options,
            r#"<option value="{value}"{selected}>{label}</option>"#,
            value = attr(&opt.value),
            selected = if opt.selected { " selected" } else { "" },
            label = esc(&opt.label),
        );
    }
    let selected_badge = authors
        .iter()
        .find(|opt| opt.selected)
        .map(|opt| {
            format!(
                r#"<div class="author-badge">{}<span>{}</span></div>"#,
                avatar(&opt.label, opt.avatar_url.as_deref(), &initials_of(&opt.label)),
                esc(&opt.label)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<label>Title<input id="post-title" name="title" required value="{title}" placeholder="Post title"></label>
<label>Slug{slug_input}<small class="muted">Slug is derived from the title when you save.</small></label>
<div class="two-col"><label>Author{selected_badge}<select name="author" required>{options}</select></label>
<label>Published date<input name="published_at" type="datetime-local" required value="{published_at}"></label></div>
<label>Tags (comma separated)<input name="tags" value="{tags}" placeholder="education, programs, impact"></label>
<label>Body<textarea name="body" required rows="10" placeholder="Write your post content...">{body}</textarea></label>
{ADMIN_WASM_SCRIPT}"#,
        title = attr(&values.title),
        published_at = attr(&values.published_at),
        tags = attr(&values.tags),
        body = esc(&values.body),
    )
}

pub(crate) fn new_post(
    chrome: &Chrome<'_>,
    values: &PostFormValues,
    authors: &[AuthorOption],
    error: Option<&str>,
) -> String {
    let content = format!(
        r#"<header class="row"><div><p class="kicker">Admin</p><h1>New post</h1><p class="muted">Create and publish a blog entry.</p></div><a class="btn ghost" href="/admin/blog">Back</a></header>
<form method="post" action="/admin/blog/new" class="card form">{alert}{fields}
<div class="actions"><button type="submit" class="btn">Publish post</button><a class="btn ghost" href="/admin/blog">Cancel</a></div></form>"#,
        alert = alert(error),
        fields = post_fields(values, authors),
    );
    shell("New post", chrome, MenuItem::Blog, &content)
}

pub(crate) fn edit_post(
    chrome: &Chrome<'_>,
    post: &BlogPost,
    values: &PostFormValues,
    authors: &[AuthorOption],
    error: Option<&str>,
) -> String {
    let content = format!(
        r#"<header class="row"><div><p class="kicker">Admin</p><h1>Edit post</h1><p class="muted">Update the blog entry and save changes.</p></div>
<div class="actions"><a class="btn ghost small" href="/admin/blog">← Back to list</a><a class="btn small" href="/admin/blog/new">+ New post</a></div></header>
<section class="card"><div class="row"><div><strong>{title}</strong><p class="muted">{author} • {published}</p></div><small class="muted">Updated {updated}</small></div>
<form method="post" action="/admin/blog/{id}" class="form">{alert}{fields}
<div class="actions"><button type="submit" class="btn">Save changes</button><a class="btn ghost" href="/blog/{link}">View post</a></div></form></section>"#,
        title = esc(&post.title),
        author = esc(&post.author),
        published = fmt_datetime(&post.published_at),
        updated = fmt_datetime(&post.updated_at),
        id = post.id,
        link = attr(&post.link_identifier()),
        alert = alert(error),
        fields = post_fields(values, authors),
    );
    shell("Edit post", chrome, MenuItem::Blog, &content)
}

pub(crate) fn users_list(chrome: &Chrome<'_>, users: &[AdminUser]) -> String {
    let mut rows = String::new();
    for user in users {
        let _ = write!(
            rows,
            r#"<tr><td>{avatar}</td><td class="mono">{username}</td><td>{name}</td><td>{role}</td><td>{updated}</td><td class="right"><a class="btn ghost small" href="/admin/users/{id}">Edit</a></td></tr>"#,
            avatar = avatar(user.label(), user.avatar_url.as_deref(), &user.initials()),
            username = esc(&user.username),
            name = esc(&user.display_name),
            role = esc(&user.role),
            updated = fmt_datetime(&user.updated_at),
            id = user.id,
        );
    }
    if users.is_empty() {
        rows.push_str(r#"<tr><td colspan="6" class="empty">No users yet.</td></tr>"#);
    }

    let content = format!(
        r#"<header class="row"><div><p class="kicker">Admin</p><h1>Users</h1><p class="muted">Manage accounts for the admin panel.</p></div><a class="btn" href="/admin/users/new">+ New user</a></header>
<section class="card"><table><thead><tr><th></th><th>Username</th><th>Name</th><th>Role</th><th>Updated</th><th class="right">Actions</th></tr></thead><tbody>{rows}</tbody></table></section>"#
    );
    shell("Users", chrome, MenuItem::Users, &content)
}

#[derive(Debug, Clone)]
pub(crate) struct UserFormValues {
    pub(crate) username: String,
    pub(crate) display_name: String,
    pub(crate) role: String,
}

impl Default for UserFormValues {
    fn default() -> Self {
        Self {
            username: String::new(),
            display_name: String::new(),
            role: "admin".to_string(),
        }
    }
}

pub(crate) fn new_user(chrome: &Chrome<'_>, values: &UserFormValues, error: Option<&str>) -> String {
    let content = format!(
        r#"<header class="row"><div><p class="kicker">Admin</p><h1>New user</h1><p class="muted">Create an admin account.</p></div><a class="btn ghost" href="/admin/users">Back</a></header>
<form method="post" action="/admin/users/new" class="card form">{alert}
<label>Username<input name="username" required placeholder="admin" value="{username}"></label>
<label>Display name<input name="display_name" required placeholder="Admin" value="{display_name}"></label>
<label>Role<input name="role" required value="{role}"></label>
<label>Password<input name="password" type="password" required placeholder="••••••••"></label>
<div class="actions"><button type="submit" class="btn">Create user</button><a class="btn ghost" href="/admin/users">Cancel</a></div></form>"#,
        alert = alert(error),
        username = attr(&values.username),
        display_name = attr(&values.display_name),
        role = attr(&values.role),
    );
    shell("New user", chrome, MenuItem::Users, &content)
}

const ADMIN_WASM_SCRIPT: &str =
    r#"<script type="module">import init from "/static/admin-wasm/admin_wasm.js"; init();</script>"#;

/// Mount point picked up by the admin-wasm avatar editor.
fn avatar_editor_mount(user_id: Uuid, avatar_url: Option<&str>, fallback: &str) -> String {
    format!(
        r#"<section class="card"><h2>Avatar</h2>
<div id="avatar-editor" data-user-id="{user_id}" data-avatar-url="{url}">{fallback}<noscript>The avatar editor needs JavaScript.</noscript></div>
{ADMIN_WASM_SCRIPT}</section>"#,
        url = attr(avatar_url.unwrap_or_default()),
    )
}

pub(crate) fn edit_user(chrome: &Chrome<'_>, user: &AdminUser, error: Option<&str>) -> String {
    let fallback = avatar(user.label(), user.avatar_url.as_deref(), &user.initials());
    let content = format!(
        r#"<header class="row"><div><p class="kicker">Admin</p><h1>Edit user</h1><p class="muted">{username}</p></div><a class="btn ghost" href="/admin/users">Back</a></header>
{editor}
<form method="post" action="/admin/users/{id}" class="card form">{alert}
<label>Display name<input name="display_name" required value="{display_name}"></label>
<label>Role<input name="role" required value="{role}"></label>
<label>Password (leave blank to keep unchanged)<input name="password" type="password" placeholder="New password"></label>
<div class="actions"><button type="submit" class="btn">Save changes</button><a class="btn ghost" href="/admin/users">Cancel</a></div></form>"#,
        username = esc(&user.username),
        editor = avatar_editor_mount(user.id, user.avatar_url.as_deref(), &fallback),
        id = user.id,
        alert = alert(error),
        display_name = attr(&user.display_name),
        role = attr(&user.role),
    );
    shell("Edit user", chrome, MenuItem::Users, &content)
}
