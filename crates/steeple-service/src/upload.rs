//! Image uploads into the object store.

use serde::Serialize;
use sha2::{Digest, Sha256};
use tokio::sync::watch;

use steeple_core::config::StorageConfig;
use steeple_core::util::slug::{generate_slug, slug_file_name};
use steeple_db::model::Document;
use steeple_db::model::gallery::GalleryItem;
use steeple_db::storage::{ObjectStore, UploadProgress};
use steeple_db::store::DocumentStore;

use crate::error::{ServiceError, ServiceResult};
use crate::record::RecordService;

/// Hex digits of the content hash kept in object keys.
const HASH_PREFIX_LEN: usize = 12;

/// Where an uploaded image was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub url: String,
    pub storage_path: String,
    pub size: u64,
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/avif" => Some("avif"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

/// ## Summary
/// Builds the object key `{folder}/{stem}-{hash}.{extension}` for an upload.
///
/// The hash prefix makes keys content-addressed, so re-uploading the same file
/// lands on the same key and different files with the same name never collide.
/// Only the stem of `file_name` is kept. The extension always comes from the
/// validated content type.
#[must_use]
pub fn object_key(folder: &str, file_name: &str, extension: &str, bytes: &[u8]) -> String {
    let (stem, _) = slug_file_name(file_name);
    let digest = hex::encode(Sha256::digest(bytes));
    let hash = &digest[..HASH_PREFIX_LEN];
    let folder = generate_slug(folder);

    format!("{folder}/{stem}-{hash}.{extension}")
}

/// ## Summary
/// Stores an uploaded image and returns its public URL and storage path.
///
/// ## Side Effects
/// Writes the object, reporting progress on `progress` when given.
///
/// ## Errors
/// - `ValidationError` for content types outside the raster image allow-list,
///   empty bodies or bodies over `max_upload_bytes`
/// - `NetworkError` if the object store write fails
#[tracing::instrument(skip(objects, storage, bytes, progress), fields(size = bytes.len()))]
pub async fn upload_image(
    objects: &dyn ObjectStore,
    storage: &StorageConfig,
    folder: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
    progress: Option<&watch::Sender<UploadProgress>>,
) -> ServiceResult<UploadedImage> {
    let content_type = content_type.trim().to_ascii_lowercase();
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim();
    let Some(extension) = extension_for(essence) else {
        return Err(ServiceError::ValidationError(format!(
            "only jpeg, png, gif, webp, avif and heic image uploads are accepted, got {essence}"
        )));
    };

    let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
    if size == 0 {
        return Err(ServiceError::ValidationError("upload is empty".to_string()));
    }
    if size > storage.max_upload_bytes {
        return Err(ServiceError::ValidationError(format!(
            "upload of {size} bytes exceeds the {} byte limit",
            storage.max_upload_bytes
        )));
    }

    let key = object_key(folder, file_name, extension, bytes);
    let stored = objects.put(&key, bytes, progress).await.map_err(|e| {
        tracing::error!(%key, error = %e, "Failed to store upload");
        ServiceError::NetworkError(format!("failed to store {key}: {e}"))
    })?;

    tracing::info!(key = %stored.key, "Image uploaded");
    Ok(UploadedImage {
        url: stored.url,
        storage_path: stored.key,
        size: stored.size,
    })
}

/// ## Summary
/// Deletes a gallery item and then its stored image.
///
/// ## Side Effects
/// Removing the object is best-effort. A failure is traced at `warn` and the
/// record stays deleted.
///
/// ## Errors
/// Returns `DatabaseError(NotFound)` if no gallery item has this id.
pub async fn delete_gallery_item(
    store: &dyn DocumentStore,
    objects: &dyn ObjectStore,
    id: uuid::Uuid,
    actor: &str,
) -> ServiceResult<Document<GalleryItem>> {
    let removed = RecordService::<GalleryItem>::new(store, actor)
        .delete(id)
        .await?;

    if let Some(key) = removed.data.storage_path.as_deref()
        && let Err(e) = objects.delete(key).await
    {
        tracing::warn!(%key, error = %e, "Failed to remove stored image");
    }
    Ok(removed)
}
