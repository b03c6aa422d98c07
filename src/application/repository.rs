use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::domain::entities::FilePayload;
use crate::domain::value_objects::FileId;

/// Uniform storage failure raised by [`FileRepository`].
///
/// Wraps whatever the blob-store backend reported, so callers never see a
/// vendor-specific error.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FileStorageError {
    message: String,
    #[source]
    source: BlobStoreError,
}

impl FileStorageError {
    fn new(message: impl Into<String>, source: BlobStoreError) -> Self {
        Self {
            message: message.into(),
            source,
        }
    }
}

/// Wraps the durable blob store, translating low-level failures into
/// [`FileStorageError`] and logging every outcome.
pub struct FileRepository {
    blob_store: Arc<dyn BlobStore>,
}

impl FileRepository {
    pub fn new(blob_store: Arc<dyn BlobStore>) -> Self {
        Self { blob_store }
    }

    pub async fn put_file(
        &self,
        file_id: FileId,
        payload: &FilePayload,
    ) -> Result<FileId, FileStorageError> {
        match self.blob_store.upload(file_id, payload).await {
            Ok(uploaded_id) => {
                info!(%file_id, "successfully uploaded file in file storage");
                Ok(uploaded_id)
            }
            Err(err) => {
                error!(%file_id, error = %err, "could not upload file");
                Err(FileStorageError::new("could not upload file", err))
            }
        }
    }

    /// `Ok(None)` only on a positive not-found from the backend.
    pub async fn find_by_id(
        &self,
        file_id: FileId,
    ) -> Result<Option<FilePayload>, FileStorageError> {
        match self.blob_store.download(file_id).await {
            Ok(Some(payload)) => {
                info!(%file_id, "successfully found file in file storage");
                Ok(Some(payload))
            }
            Ok(None) => {
                warn!(%file_id, "could not find file in file storage");
                Ok(None)
            }
            Err(err) => {
                error!(%file_id, error = %err, "could not download file");
                Err(FileStorageError::new("could not download file", err))
            }
        }
    }

    /// Bulk delete. Failure is all-or-nothing from the caller's perspective;
    /// no per-id success report is produced.
    pub async fn delete_files(&self, file_ids: &[FileId]) -> Result<(), FileStorageError> {
        match self.blob_store.delete_by_ids(file_ids).await {
            Ok(()) => {
                for file_id in file_ids {
                    info!(%file_id, "successfully deleted file in file storage");
                }
                Ok(())
            }
            Err(err) => {
                error!(?file_ids, error = %err, "could not delete files");
                Err(FileStorageError::new("could not delete files", err))
            }
        }
    }

    /// Age-based sweep; logs each receipt (ascending by timestamp) and
    /// returns how many files were removed.
    pub async fn delete_files_older_than(&self, days: u32) -> Result<usize, FileStorageError> {
        match self.blob_store.delete_older_than(days).await {
            Ok(deleted_files) => {
                for deleted_file in &deleted_files {
                    info!(
                        name = %deleted_file.name,
                        deleted_at = %deleted_file.deleted_at,
                        "deleted file"
                    );
                }
                Ok(deleted_files.len())
            }
            Err(err) => {
                error!(days, error = %err, "could not delete old files");
                Err(FileStorageError::new("could not delete old files", err))
            }
        }
    }
}
