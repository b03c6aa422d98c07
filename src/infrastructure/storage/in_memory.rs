use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::domain::entities::{DeletedFile, FilePayload};
use crate::domain::value_objects::FileId;

/// In-memory reference blob store.
///
/// Keeps each payload together with its upload timestamp so the age-based
/// sweep can filter on last-modified time like a real blob backend. Backed
/// by a lock-sharded concurrent map.
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: DashMap<FileId, StoredBlob>,
}

#[derive(Clone)]
struct StoredBlob {
    payload: FilePayload,
    uploaded_at: DateTime<Utc>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    /// Test hook: rewrite the upload timestamp of an existing blob so sweeps
    /// can be exercised without waiting out the retention window.
    pub fn backdate(&self, file_id: FileId, uploaded_at: DateTime<Utc>) {
        if let Some(mut blob) = self.blobs.get_mut(&file_id) {
            blob.uploaded_at = uploaded_at;
        }
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(
        &self,
        file_id: FileId,
        payload: &FilePayload,
    ) -> Result<FileId, BlobStoreError> {
        self.blobs.insert(
            file_id,
            StoredBlob {
                payload: payload.clone(),
                uploaded_at: Utc::now(),
            },
        );
        Ok(file_id)
    }

    async fn download(&self, file_id: FileId) -> Result<Option<FilePayload>, BlobStoreError> {
        Ok(self.blobs.get(&file_id).map(|blob| blob.payload.clone()))
    }

    async fn delete_by_ids(&self, file_ids: &[FileId]) -> Result<(), BlobStoreError> {
        for file_id in file_ids {
            self.blobs.remove(file_id);
        }
        Ok(())
    }

    async fn delete_older_than(&self, days: u32) -> Result<Vec<DeletedFile>, BlobStoreError> {
        let cutoff = Utc::now() - Duration::days(i64::from(days));

        let expired: Vec<(FileId, StoredBlob)> = self
            .blobs
            .iter()
            .filter(|entry| entry.value().uploaded_at < cutoff)
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        let mut deleted = Vec::with_capacity(expired.len());
        for (file_id, blob) in expired {
            // Compare-and-remove: a concurrent overwrite keeps the newer blob.
            let removed = self
                .blobs
                .remove_if(&file_id, |_, current| {
                    current.uploaded_at == blob.uploaded_at
                })
                .is_some();

            if removed {
                deleted.push(DeletedFile {
                    name: blob.payload.name.clone(),
                    deleted_at: blob.uploaded_at,
                });
            }
        }

        deleted.sort_by_key(|deleted_file| deleted_file.deleted_at);
        Ok(deleted)
    }
}
