use async_trait::async_trait;
use aws_sdk_s3::{Client, primitives::ByteStream};
use tracing::info;
use url::Url;

use crate::data::blob_store::{BlobError, BlobStore, key_from_public_url, public_url};

/// Avatar storage on an S3-compatible bucket served under `public_base_url`.
#[derive(Clone)]
pub(crate) struct S3BlobStore {
    client: Client,
    bucket: String,
    public_base_url: Url,
}

impl S3BlobStore {
    pub(crate) fn new(client: Client, bucket: String, public_base_url: Url) -> Self {
        Self {
            client,
            bucket,
            public_base_url,
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put_public(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError> {
        info!(bucket = %self.bucket, key, size = bytes.len(), "uploading blob");

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|err| BlobError::Put(err.to_string()))?;

        Ok(public_url(&self.public_base_url, key))
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        info!(bucket = %self.bucket, key, "deleting blob");

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| BlobError::Delete(err.to_string()))?;

        Ok(())
    }

    fn key_for_url(&self, url: &str) -> Result<String, BlobError> {
        key_from_public_url(&self.public_base_url, url)
    }
}
