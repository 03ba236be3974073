//! The object store seam for uploaded images.

use tokio::sync::watch;

use crate::store::StoreFuture;

pub mod fs;


/// Bytes written so far for one upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadProgress {
    pub bytes_written: u64,
    pub total_bytes: u64,
}

impl UploadProgress {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.bytes_written >= self.total_bytes
    }
}

/// Where a stored object ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub url: String,
    pub size: u64,
}

/// Key-addressed blob storage.
pub trait ObjectStore: Send + Sync {
    /// Write an object, replacing any existing one with the same key.
    ///
    /// Progress is sent on `progress` as chunks are written. The object only
    /// becomes visible under `key` once every byte is on disk.
    fn put<'a>(
        &'a self,
        key: &'a str,
        bytes: &'a [u8],
        progress: Option<&'a watch::Sender<UploadProgress>>,
    ) -> StoreFuture<'a, StoredObject>;

    /// Remove an object. Removing a missing key succeeds.
    fn delete<'a>(&'a self, key: &'a str) -> StoreFuture<'a, ()>;

    fn public_url(&self, key: &str) -> String;
}
