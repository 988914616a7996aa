use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::data::blob_store::{BlobError, BlobStore};
use crate::data::user_repository::{UserPatch, UserRepository};
use crate::domain::error::DomainError;

const DEFAULT_EXTENSION: &str = "jpg";

#[derive(Debug, Error)]
pub(crate) enum AvatarError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Blob(#[from] BlobError),
}

pub(crate) struct AvatarService<R: UserRepository, B: BlobStore> {
    users: R,
    blobs: B,
}

impl<R: UserRepository, B: BlobStore> AvatarService<R, B> {
    pub(crate) fn new(users: R, blobs: B) -> Self {
        Self { users, blobs }
    }

    /// Stores the image under `avatars/{user_id}.{ext}` and records its public URL
    /// on the user row. Re-uploading with the same extension overwrites the blob.
    pub(crate) async fn upload(
        &self,
        user_id: Uuid,
        file_name: Option<&str>,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AvatarError> {
        if !content_type.starts_with("image/") {
            return Err(DomainError::Validation {
                field: "file",
                message: "must be an image",
            }
            .into());
        }

        let key = avatar_key(user_id, file_name);
        let url = self
            .blobs
            .put_public(&key, bytes, content_type)
            .await
            .inspect_err(|err| error!(%user_id, error = %err, "avatar upload failed"))?;

        self.users
            .update_user(
                user_id,
                UserPatch {
                    avatar_url: Some(Some(url.clone())),
                    ..Default::default()
                },
            )
            .await?;

        info!(%user_id, %key, "avatar uploaded");
        Ok(url)
    }

    /// Deletes the recorded blob first; the row is only cleared once that succeeded.
    pub(crate) async fn remove(
        &self,
        user_id: Uuid,
        avatar_url: Option<&str>,
    ) -> Result<(), AvatarError> {
        if let Some(url) = avatar_url.map(str::trim).filter(|url| !url.is_empty()) {
            let key = self.blobs.key_for_url(url)?;
            self.blobs
                .delete(&key)
                .await
                .inspect_err(|err| error!(%user_id, error = %err, "avatar delete failed"))?;
        }

        self.users
            .update_user(
                user_id,
                UserPatch {
                    avatar_url: Some(None),
                    ..Default::default()
                },
            )
            .await?;

        info!(%user_id, "avatar removed");
        Ok(())
    }
}

pub(crate) fn avatar_key(user_id: Uuid, file_name: Option<&str>) -> String {
    let ext = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    format!("avatars/{user_id}.{ext}")
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{AvatarError, AvatarService, avatar_key};
    use crate::domain::error::DomainError;
    use crate::test_support::{InMemoryBlobStore, InMemoryUserRepo};

    #[test]
    fn key_takes_extension_from_file_name() {
        let id = Uuid::nil();
        assert_eq!(
            avatar_key(id, Some("me.PNG")),
            format!("avatars/{id}.png")
        );
        assert_eq!(avatar_key(id, Some("avatar.jpg")), format!("avatars/{id}.jpg"));
    }

    #[test]
    fn key_defaults_to_jpg() {
        let id = Uuid::nil();
        assert_eq!(avatar_key(id, None), format!("avatars/{id}.jpg"));
        assert_eq!(avatar_key(id, Some("blob")), format!("avatars/{id}.jpg"));
        assert_eq!(avatar_key(id, Some("x./../y")), format!("avatars/{id}.jpg"));
    }

    #[tokio::test]
    async fn upload_stores_blob_and_records_url() {
        let users = InMemoryUserRepo::default();
        let user = users.seed("ambika", "Ambika", "pw");
        let blobs = InMemoryBlobStore::default();
        let service = AvatarService::new(users.clone(), blobs.clone());

        let url = service
            .upload(user.id, Some("avatar.jpg"), vec![1, 2, 3], "image/jpeg")
            .await
            .unwrap();

        let key = format!("avatars/{}.jpg", user.id);
        assert_eq!(url, format!("https://blob.test/{key}"));
        assert_eq!(blobs.get(&key), Some(vec![1, 2, 3]));
        assert_eq!(
            users.user(user.id).unwrap().avatar_url.as_deref(),
            Some(url.as_str())
        );
    }

    #[tokio::test]
    async fn upload_rejects_non_images() {
        let users = InMemoryUserRepo::default();
        let user = users.seed("ambika", "Ambika", "pw");
        let blobs = InMemoryBlobStore::default();
        let service = AvatarService::new(users, blobs.clone());

        let err = service
            .upload(user.id, Some("notes.txt"), vec![0], "text/plain")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AvatarError::Domain(DomainError::Validation { field: "file", .. })
        ));
        assert!(blobs.is_empty());
    }

    #[tokio::test]
    async fn failed_upload_leaves_user_untouched() {
        let users = InMemoryUserRepo::default();
        let user = users.seed("ambika", "Ambika", "pw");
        let blobs = InMemoryBlobStore::default();
        blobs.fail_writes();
        let service = AvatarService::new(users.clone(), blobs);

        let err = service
            .upload(user.id, None, vec![1], "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, AvatarError::Blob(_)));
        assert_eq!(users.user(user.id).unwrap().avatar_url, None);
    }

    #[tokio::test]
    async fn remove_deletes_blob_and_clears_url() {
        let users = InMemoryUserRepo::default();
        let user = users.seed("ambika", "Ambika", "pw");
        let blobs = InMemoryBlobStore::default();
        let service = AvatarService::new(users.clone(), blobs.clone());
        let url = service
            .upload(user.id, Some("a.png"), vec![9], "image/png")
            .await
            .unwrap();

        service.remove(user.id, Some(&url)).await.unwrap();

        assert!(blobs.is_empty());
        assert_eq!(users.user(user.id).unwrap().avatar_url, None);
    }

    #[tokio::test]
    async fn remove_without_url_only_clears_the_row() {
        let users = InMemoryUserRepo::default();
        let user = users.seed("ambika", "Ambika", "pw");
        let service = AvatarService::new(users.clone(), InMemoryBlobStore::default());

        service.remove(user.id, Some("  ")).await.unwrap();
        assert_eq!(users.user(user.id).unwrap().avatar_url, None);
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_recorded_url() {
        let users = InMemoryUserRepo::default();
        let user = users.seed("ambika", "Ambika", "pw");
        let blobs = InMemoryBlobStore::default();
        let service = AvatarService::new(users.clone(), blobs.clone());
        let url = service
            .upload(user.id, Some("a.png"), vec![9], "image/png")
            .await
            .unwrap();
        blobs.fail_writes();

        let err = service.remove(user.id, Some(&url)).await.unwrap_err();
        assert!(matches!(err, AvatarError::Blob(_)));
        assert_eq!(
            users.user(user.id).unwrap().avatar_url.as_deref(),
            Some(url.as_str())
        );
    }
}
