use anyhow::{Context, Result, anyhow};
use url::Url;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub auth_secret: String,
    pub http_addr: String,
    pub secure_cookies: bool,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub static_dir: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub http_request_timeout_secs: u64,
    pub blob: BlobSettings,
}

#[derive(Debug, Clone)]
pub struct BlobSettings {
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub public_base_url: Url,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let database_url = get_required("DATABASE_URL").context("DATABASE_URL is required")?;
        let auth_secret = get_required("AUTH_SECRET").context("AUTH_SECRET is required")?;

        if auth_secret.chars().count() < 32 {
            return Err(anyhow!("AUTH_SECRET must be at least 32 characters"));
        }

        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let secure_cookies = std::env::var("APP_ENV")
            .map(|env| env.trim().eq_ignore_ascii_case("production"))
            .unwrap_or(false);
        let cors_origins = parse_cors_origins(std::env::var("CORS_ORIGINS").unwrap_or_default());
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "./static".to_string());
        let http_request_body_limit_bytes =
            parse_usize_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 5 * 1024 * 1024)?;
        let http_concurrency_limit = parse_usize_env("HTTP_CONCURRENCY_LIMIT", 256)?;
        let http_request_timeout_secs = parse_u64_env("HTTP_REQUEST_TIMEOUT_SECS", 10)?;

        Ok(Self {
            database_url,
            auth_secret,
            http_addr,
            secure_cookies,
            cors_origins,
            log_level,
            static_dir,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
            blob: BlobSettings::from_env()?,
        })
    }
}

impl BlobSettings {
    fn from_env() -> Result<Self> {
        let bucket = get_required("BLOB_BUCKET").context("BLOB_BUCKET is required")?;
        let access_key_id =
            get_required("BLOB_ACCESS_KEY_ID").context("BLOB_ACCESS_KEY_ID is required")?;
        let secret_access_key = get_required("BLOB_SECRET_ACCESS_KEY")
            .context("BLOB_SECRET_ACCESS_KEY is required")?;
        let public_base_url = get_required("BLOB_PUBLIC_BASE_URL")
            .context("BLOB_PUBLIC_BASE_URL is required")?;
        let public_base_url = Url::parse(&public_base_url)
            .with_context(|| format!("BLOB_PUBLIC_BASE_URL is not a valid URL: {public_base_url}"))?;
        let region = std::env::var("BLOB_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let endpoint = std::env::var("BLOB_ENDPOINT")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(Self {
            bucket,
            access_key_id,
            secret_access_key,
            region,
            endpoint,
            public_base_url,
        })
    }
}

fn get_required(key: &str) -> Result<String> {
    let value = std::env::var(key)?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::parse_cors_origins;
    use crate::presentation::middleware::cors::build_cors_layer;

    #[test]
    fn cors_origins_are_trimmed_and_empty_entries_dropped() {
        let origins = parse_cors_origins(" http://a.test , ,http://b.test".to_string());
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn unset_cors_origins_leave_cors_off() {
        let origins = parse_cors_origins(String::new());
        assert!(origins.is_empty());
        assert!(build_cors_layer(&origins).unwrap().is_none());
    }
}
