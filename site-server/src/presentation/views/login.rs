use super::{Chrome, attr, esc, layout};

pub(crate) fn login_page(chrome: &Chrome<'_>, error: Option<&str>, username: &str) -> String {
    let error = error
        .map(|message| format!(r#"<div class="alert" role="alert">{}</div>"#, esc(message)))
        .unwrap_or_default();

    let main = format!(
        r#"<main class="container narrow stack">
<header class="card"><p class="kicker">Admin</p><h1>Sign in</h1><p class="muted">Enter your admin username and password to manage the dashboard.</p></header>
<section class="card"><form method="post" action="/login" class="form">
{error}
<label>Username<input name="username" autocomplete="username" required placeholder="admin" value="{username}"></label>
<label>Password<input name="password" type="password" autocomplete="current-password" required placeholder="••••••••"></label>
<button type="submit" class="btn block">Sign in</button>
</form></section></main>"#,
        username = attr(username),
    );
    layout("Sign in", chrome, &main)
}
