use std::borrow::Cow;
use std::fmt::Write;

use chrono::{DateTime, Datelike, Utc};

use crate::domain::user::AdminUser;
use crate::presentation::i18n::Lang;

pub(crate) mod admin;
pub(crate) mod login;
pub(crate) mod public;

pub(crate) fn esc(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

pub(crate) fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

pub(crate) fn fmt_date(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

pub(crate) fn fmt_datetime(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y %H:%M UTC").to_string()
}

/// Value for an `<input type="datetime-local">`.
pub(crate) fn fmt_datetime_local(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M").to_string()
}

/// Everything the shared header needs to know about the request.
pub(crate) struct Chrome<'a> {
    pub(crate) lang: Lang,
    pub(crate) path: &'a str,
    pub(crate) admin: Option<&'a AdminUser>,
}

impl Chrome<'_> {
    /// `href` carrying the current `lang` along.
    pub(crate) fn link(&self, path: &str) -> String {
        format!("{path}?lang={}", self.lang.code())
    }
}

pub(crate) fn avatar(label: &str, avatar_url: Option<&str>, initials: &str) -> String {
    match avatar_url {
        Some(url) => format!(
            r#"<span class="avatar"><img src="{}" alt="{}"></span>"#,
            attr(url),
            attr(label)
        ),
        None => format!(r#"<span class="avatar avatar-fallback">{}</span>"#, esc(initials)),
    }
}

pub(crate) fn layout(title: &str, chrome: &Chrome<'_>, main: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · Bhanana</title>
<link rel="stylesheet" href="/static/site.css">
</head>
<body>
{header}
{main}
<footer class="site-footer"><span>© {year} Bhanana</span></footer>
</body>
</html>"#,
        lang = chrome.lang.code(),
        title = esc(title),
        header = header(chrome),
        year = Utc::now().year(),
    )
}

fn header(chrome: &Chrome<'_>) -> String {
    let nav = &chrome.lang.copy().nav;
    let mut out = String::from(r#"<header class="site-header"><div class="container bar">"#);

    let _ = write!(
        out,
        r#"<a class="brand" href="{home}">Bhanana</a><nav class="site-nav">"#,
        home = attr(&chrome.link("/")),
    );
    for (path, label) in [
        ("/", nav.home),
        ("/about", nav.about),
        ("/blog", nav.blog),
        ("/contact", nav.contact),
        ("/admin", nav.admin),
    ] {
        let _ = write!(
            out,
            r#"<a href="{}">{}</a>"#,
            attr(&chrome.link(path)),
            esc(label)
        );
    }
    out.push_str(r#"</nav><div class="bar-end"><div class="lang-switch">"#);

    for lang in Lang::ALL {
        let class = if lang == chrome.lang { "active" } else { "" };
        let _ = write!(
            out,
            r#"<a class="{class}" href="{href}">{label}</a>"#,
            href = attr(&format!("{}?lang={}", chrome.path, lang.code())),
            label = esc(lang.label()),
        );
    }
    out.push_str("</div>");

    if let Some(admin) = chrome.admin {
        let _ = write!(
            out,
            r#"<div class="current-admin">{avatar}<div><strong>{name}</strong><small>Logged in</small></div><form method="post" action="/logout"><button type="submit" class="link">Log out</button></form></div>"#,
            avatar = avatar(admin.label(), admin.avatar_url.as_deref(), &admin.initials()),
            name = esc(admin.label()),
        );
    }

    out.push_str("</div></div></header>");
    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{Chrome, esc, fmt_datetime_local, layout};
    use crate::presentation::i18n::Lang;

    #[test]
    fn text_is_escaped() {
        assert_eq!(esc("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
    }

    #[test]
    fn datetime_local_has_minute_precision() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 59).unwrap();
        assert_eq!(fmt_datetime_local(&at), "2024-05-01T10:30");
    }

    #[test]
    fn header_links_keep_language() {
        let chrome = Chrome {
            lang: Lang::Ne,
            path: "/about",
            admin: None,
        };
        let html = layout("About", &chrome, "<main></main>");
        assert!(html.contains(r#"href="/blog?lang=ne""#));
        assert!(html.contains(r#"href="/about?lang=en""#));
        assert!(html.contains("ब्लग"));
        assert!(!html.contains("Logged in"));
    }
}
