//! Live slug preview for the post form. Mirrors the server's slug rules.

/// Lowercases the title and collapses every run of characters outside
/// `[a-z0-9]` into one hyphen, trimmed at both ends.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Value shown in the slug field while the title is edited. A title with no
/// ASCII alphanumerics keeps the stored slug, if any.
pub fn preview(title: &str, stored: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        stored.trim().to_string()
    } else {
        slug
    }
}
