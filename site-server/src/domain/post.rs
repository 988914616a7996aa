use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BlogPost {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) slug: Option<String>,
    pub(crate) author: String,
    pub(crate) published_at: DateTime<Utc>,
    pub(crate) body: String,
    pub(crate) tags: Vec<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Path segment used in public links: the slug when there is one, the id otherwise.
    pub(crate) fn link_identifier(&self) -> String {
        match &self.slug {
            Some(slug) => slug.clone(),
            None => self.id.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) published_at: String,
    pub(crate) body: String,
    pub(crate) tags: Option<Vec<String>>,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            author: required("author", &self.author)?,
            published_at: required("published_at", &self.published_at)?,
            body: required("body", &self.body)?,
            tags: self.tags.map(normalize_tags),
        })
    }
}

/// Sparse update. A `None` field is left untouched in the store.
#[derive(Debug, Clone, Default)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) published_at: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) tags: Option<Vec<String>>,
}

impl UpdatePostRequest {
    /// Blank strings count as "not supplied".
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let title = self
            .title
            .as_deref()
            .and_then(non_blank)
            .map(|title| normalize_title(&title))
            .transpose()?;

        Ok(Self {
            title,
            author: self.author.as_deref().and_then(non_blank),
            published_at: self.published_at.as_deref().and_then(non_blank),
            body: self.body.as_deref().and_then(non_blank),
            tags: self.tags.map(normalize_tags),
        })
    }
}

/// Lowercases the input and collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen, with no hyphen at either end.
pub(crate) fn slugify(title: &str) -> String {
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

/// Slug to persist for a title. Titles without any ASCII alphanumerics
/// (e.g. Devanagari-only) get no slug and stay reachable by id.
pub(crate) fn slug_for(title: &str) -> Option<String> {
    let slug = slugify(title);
    if slug.is_empty() { None } else { Some(slug) }
}

/// Accepts RFC 3339 as well as the `datetime-local` form value
/// (`YYYY-MM-DDTHH:MM[:SS]`) and a bare date. Zone-less values are read as UTC.
pub(crate) fn parse_published_at(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Some(naive) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(naive.and_utc());
    }

    Err(DomainError::Validation {
        field: "published_at",
        message: "must be a valid date/time",
    })
}

/// Splits the comma separated form value into trimmed, non-empty tags.
pub(crate) fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn required(field: &'static str, value: &str) -> Result<String, DomainError> {
    non_blank(value).ok_or(DomainError::Validation {
        field,
        message: "is required",
    })
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 255 {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(title.to_string())
}
