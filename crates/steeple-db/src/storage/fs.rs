use std::path::{Component, Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tokio::sync::watch;

use steeple_core::error::CoreError;

use super::{ObjectStore, StoredObject, UploadProgress};
use crate::error::{DbError, DbResult};
use crate::store::StoreFuture;

const WRITE_CHUNK: usize = 64 * 1024;

/// Object store rooted in a local directory.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl FsObjectStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a key onto a path below the root, rejecting anything that could escape it.
    fn path_for(&self, key: &str) -> DbResult<PathBuf> {
        let relative = Path::new(key);
        let well_formed = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !well_formed {
            return Err(CoreError::InvalidInput(format!("invalid object key: {key}")).into());
        }
        Ok(self.root.join(relative))
    }
}

impl ObjectStore for FsObjectStore {
    #[tracing::instrument(skip(self, bytes, progress), fields(size = bytes.len()))]
    fn put<'a>(
        &'a self,
        key: &'a str,
        bytes: &'a [u8],
        progress: Option<&'a watch::Sender<UploadProgress>>,
    ) -> StoreFuture<'a, StoredObject> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }

            let total_bytes = bytes.len() as u64;
            let partial = path.with_extension(partial_extension(&path));

            let written = write_chunks(&partial, bytes, total_bytes, progress).await;
            if let Err(e) = written {
                // Leave nothing behind for a failed upload.
                let _ = tokio::fs::remove_file(&partial).await;
                return Err(e);
            }
            tokio::fs::rename(&partial, &path).await?;

            tracing::debug!(%key, "Stored object");
            Ok(StoredObject {
                key: key.to_string(),
                url: self.public_url(key),
                size: total_bytes,
            })
        })
    }

    #[tracing::instrument(skip(self))]
    fn delete<'a>(&'a self, key: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            match tokio::fs::remove_file(&path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(%key, "Object already absent");
                    Ok(())
                }
                Err(e) => Err(DbError::IoError(e)),
            }
        })
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }
}

fn partial_extension(path: &Path) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{ext}.part"),
        None => "part".to_string(),
    }
}

async fn write_chunks(
    path: &Path,
    bytes: &[u8],
    total_bytes: u64,
    progress: Option<&watch::Sender<UploadProgress>>,
) -> DbResult<()> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut bytes_written = 0_u64;

    if let Some(tx) = progress {
        tx.send_replace(UploadProgress {
            bytes_written,
            total_bytes,
        });
    }

    for chunk in bytes.chunks(WRITE_CHUNK) {
        file.write_all(chunk).await?;
        bytes_written += chunk.len() as u64;
        if let Some(tx) = progress {
            tx.send_replace(UploadProgress {
                bytes_written,
                total_bytes,
            });
        }
    }

    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}
