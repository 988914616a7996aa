use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub(crate) enum BlobError {
    #[error("blob upload failed: {0}")]
    Put(String),

    #[error("blob delete failed: {0}")]
    Delete(String),

    #[error("invalid blob url: {0}")]
    InvalidUrl(String),
}

#[async_trait]
pub(crate) trait BlobStore: Send + Sync {
    /// Stores `bytes` under `key` with public read access and returns the public URL.
    async fn put_public(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError>;

    async fn delete(&self, key: &str) -> Result<(), BlobError>;

    /// Maps a public URL previously returned by `put_public` back to its key.
    fn key_for_url(&self, url: &str) -> Result<String, BlobError>;
}

pub(crate) type DynBlobStore = Arc<dyn BlobStore>;

#[async_trait]
impl<T: BlobStore + ?Sized> BlobStore for Arc<T> {
    async fn put_public(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError> {
        (**self).put_public(key, bytes, content_type).await
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        (**self).delete(key).await
    }

    fn key_for_url(&self, url: &str) -> Result<String, BlobError> {
        (**self).key_for_url(url)
    }
}

pub(crate) fn public_url(base: &Url, key: &str) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), key)
}

/// The key is the URL path relative to the path of `base`.
pub(crate) fn key_from_public_url(base: &Url, url: &str) -> Result<String, BlobError> {
    let parsed = Url::parse(url).map_err(|err| BlobError::InvalidUrl(format!("{url}: {err}")))?;
    let path = parsed.path().trim_start_matches('/');
    let base_path = base.path().trim_matches('/');

    let key = if base_path.is_empty() {
        path
    } else {
        path.strip_prefix(base_path)
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or(path)
    };

    if key.is_empty() {
        return Err(BlobError::InvalidUrl(url.to_string()));
    }
    Ok(key.to_string())
}
