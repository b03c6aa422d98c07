use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::domain::entities::{DeletedFile, FilePayload};
use crate::domain::value_objects::FileId;

#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("backend error (status {status}): {message}")]
    Backend { status: u16, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

/// Port for the durable blob store.
///
/// The store is the source of truth for file content; the cache in front of
/// it is only ever a subset view.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store the payload under the id; returns the id on success.
    async fn upload(
        &self,
        file_id: FileId,
        payload: &FilePayload,
    ) -> Result<FileId, BlobStoreError>;

    /// `Ok(None)` only when the backend positively reports not-found; any
    /// transport or backend failure is an `Err`.
    async fn download(&self, file_id: FileId) -> Result<Option<FilePayload>, BlobStoreError>;

    /// Best-effort bulk delete; ids that do not exist are skipped.
    async fn delete_by_ids(&self, file_ids: &[FileId]) -> Result<(), BlobStoreError>;

    /// Delete every blob last modified before `now - days`, returning one
    /// receipt per deleted blob sorted ascending by timestamp.
    async fn delete_older_than(&self, days: u32) -> Result<Vec<DeletedFile>, BlobStoreError>;
}
