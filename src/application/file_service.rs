use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::application::ports::{CacheError, FileCache};
use crate::application::repository::{FileRepository, FileStorageError};
use crate::domain::entities::FilePayload;
use crate::domain::value_objects::FileId;

#[derive(Debug, Error)]
pub enum FileServiceError {
    #[error("file with id {0} was not found")]
    NotFound(FileId),

    #[error(transparent)]
    Storage(#[from] FileStorageError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Cache-aside coordinator over the file cache and the storage repository.
///
/// Stateless: every operation is an independent sequence of at most two
/// external calls, so the service is safe for unbounded concurrent use.
/// There is no transaction spanning cache and store; a failed write is
/// repaired with an explicit compensation step instead.
pub struct FileService {
    file_cache: Arc<dyn FileCache>,
    file_repository: Arc<FileRepository>,
}

impl FileService {
    pub fn new(file_cache: Arc<dyn FileCache>, file_repository: Arc<FileRepository>) -> Self {
        Self {
            file_cache,
            file_repository,
        }
    }

    /// A cache hit wins and the durable store is not consulted; a miss falls
    /// through to the store. The cache is not repopulated on a store hit.
    /// A cache failure (as opposed to a missing entry) propagates without
    /// consulting the store.
    pub async fn find_by_id(&self, file_id: FileId) -> Result<FilePayload, FileServiceError> {
        if let Some(payload) = self.file_cache.get(file_id).await? {
            return Ok(payload);
        }

        self.file_repository
            .find_by_id(file_id)
            .await?
            .ok_or(FileServiceError::NotFound(file_id))
    }

    /// Writes the cache first, then the durable store. A store failure is
    /// compensated by removing the just-written cache entry before
    /// re-raising, so a failed put never leaves a value visible only in the
    /// cache. A cache failure aborts before the store is touched.
    pub async fn put(
        &self,
        file_id: FileId,
        payload: FilePayload,
    ) -> Result<FileId, FileServiceError> {
        self.file_cache.put(file_id, payload.clone()).await?;

        match self.file_repository.put_file(file_id, &payload).await {
            Ok(uploaded_id) => Ok(uploaded_id),
            Err(storage_err) => {
                // Best-effort compensation; the original failure is returned
                // even if the rollback itself fails.
                if let Err(cache_err) = self.file_cache.remove(file_id).await {
                    warn!(
                        %file_id,
                        error = %cache_err,
                        "could not roll back cache entry after storage failure"
                    );
                }
                Err(storage_err.into())
            }
        }
    }

    /// Bulk delete. An empty list is a logged no-op. The cache removal gates
    /// the store delete; a store failure after the cache was already cleared
    /// propagates, and the caller owns any retry.
    pub async fn delete(&self, file_ids: &[FileId]) -> Result<(), FileServiceError> {
        if file_ids.is_empty() {
            info!("list of file ids is empty");
            return Ok(());
        }

        self.file_cache.remove_all(file_ids).await?;
        self.file_repository.delete_files(file_ids).await?;
        Ok(())
    }

    /// Age-based sweep over the durable store only; the cache is not
    /// invalidated. A cache entry can therefore outlive a swept blob until
    /// its own horizon expires, which is expected to be far shorter than the
    /// retention window.
    pub async fn delete_files_older_than(&self, days: u32) -> Result<usize, FileServiceError> {
        Ok(self.file_repository.delete_files_older_than(days).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{BlobStoreError, MockBlobStore, MockFileCache};
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn sample_payload() -> FilePayload {
        FilePayload {
            name: "a.txt".to_string(),
            source_application_id: Some(1),
            source_application_instance_id: Some("instance-1".to_string()),
            media_type: Some("text/plain".to_string()),
            encoding: None,
            contents: vec![1, 2, 3],
        }
    }

    fn service(file_cache: MockFileCache, blob_store: MockBlobStore) -> FileService {
        FileService::new(
            Arc::new(file_cache),
            Arc::new(FileRepository::new(Arc::new(blob_store))),
        )
    }

    fn backend_failure() -> BlobStoreError {
        BlobStoreError::Backend {
            status: 500,
            message: "storage account unreachable".to_string(),
        }
    }

    #[tokio::test]
    async fn find_by_id_returns_cached_file_without_consulting_storage() {
        let file_id = FileId::new();
        let mut file_cache = MockFileCache::new();
        file_cache
            .expect_get()
            .with(eq(file_id))
            .times(1)
            .returning(|_| Ok(Some(sample_payload())));

        // No expectations on the store: any call panics.
        let service = service(file_cache, MockBlobStore::new());

        let found = service.find_by_id(file_id).await.unwrap();
        assert_eq!(found, sample_payload());
    }

    #[tokio::test]
    async fn find_by_id_falls_through_to_storage_on_cache_miss() {
        let file_id = FileId::new();
        let mut file_cache = MockFileCache::new();
        file_cache
            .expect_get()
            .with(eq(file_id))
            .times(1)
            .returning(|_| Ok(None));

        let mut blob_store = MockBlobStore::new();
        blob_store
            .expect_download()
            .with(eq(file_id))
            .times(1)
            .returning(|_| Ok(Some(sample_payload())));

        let service = service(file_cache, blob_store);

        let found = service.find_by_id(file_id).await.unwrap();
        assert_eq!(found, sample_payload());
    }

    #[tokio::test]
    async fn find_by_id_reports_not_found_when_absent_everywhere() {
        let file_id = FileId::new();
        let mut file_cache = MockFileCache::new();
        file_cache
            .expect_get()
            .times(1)
            .returning(|_| Ok(None));

        let mut blob_store = MockBlobStore::new();
        blob_store
            .expect_download()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(file_cache, blob_store);

        let err = service.find_by_id(file_id).await.unwrap_err();
        assert!(matches!(err, FileServiceError::NotFound(id) if id == file_id));
    }

    #[tokio::test]
    async fn find_by_id_propagates_cache_failure_without_consulting_storage() {
        let mut file_cache = MockFileCache::new();
        file_cache
            .expect_get()
            .times(1)
            .returning(|_| Err(CacheError::Unavailable("cache is down".to_string())));

        let service = service(file_cache, MockBlobStore::new());

        let err = service.find_by_id(FileId::new()).await.unwrap_err();
        assert!(matches!(err, FileServiceError::Cache(_)));
    }

    #[tokio::test]
    async fn find_by_id_propagates_storage_failure() {
        let mut file_cache = MockFileCache::new();
        file_cache
            .expect_get()
            .times(1)
            .returning(|_| Ok(None));

        let mut blob_store = MockBlobStore::new();
        blob_store
            .expect_download()
            .times(1)
            .returning(|_| Err(backend_failure()));

        let service = service(file_cache, blob_store);

        let err = service.find_by_id(FileId::new()).await.unwrap_err();
        assert!(matches!(err, FileServiceError::Storage(_)));
    }

    #[tokio::test]
    async fn put_writes_cache_before_storage() {
        let file_id = FileId::new();
        let mut seq = Sequence::new();

        let mut file_cache = MockFileCache::new();
        let mut blob_store = MockBlobStore::new();

        file_cache
            .expect_put()
            .withf(move |id, payload| *id == file_id && *payload == sample_payload())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        blob_store
            .expect_upload()
            .withf(move |id, _| *id == file_id)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|id, _| Ok(id));

        let service = service(file_cache, blob_store);

        let stored_id = service.put(file_id, sample_payload()).await.unwrap();
        assert_eq!(stored_id, file_id);
    }

    #[tokio::test]
    async fn put_removes_cache_entry_when_storage_write_fails() {
        let file_id = FileId::new();
        let mut seq = Sequence::new();

        let mut file_cache = MockFileCache::new();
        let mut blob_store = MockBlobStore::new();

        file_cache
            .expect_put()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        blob_store
            .expect_upload()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(backend_failure()));

        file_cache
            .expect_remove()
            .with(eq(file_id))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let service = service(file_cache, blob_store);

        let err = service.put(file_id, sample_payload()).await.unwrap_err();
        assert!(matches!(err, FileServiceError::Storage(_)));
    }

    #[tokio::test]
    async fn put_aborts_before_storage_when_cache_write_fails() {
        let mut file_cache = MockFileCache::new();
        file_cache
            .expect_put()
            .times(1)
            .returning(|_, _| Err(CacheError::Unavailable("cache is down".to_string())));

        let service = service(file_cache, MockBlobStore::new());

        let err = service
            .put(FileId::new(), sample_payload())
            .await
            .unwrap_err();
        assert!(matches!(err, FileServiceError::Cache(_)));
    }

    #[tokio::test]
    async fn put_returns_storage_failure_even_when_compensation_fails() {
        let mut file_cache = MockFileCache::new();
        let mut blob_store = MockBlobStore::new();

        file_cache.expect_put().times(1).returning(|_, _| Ok(()));
        blob_store
            .expect_upload()
            .times(1)
            .returning(|_, _| Err(backend_failure()));
        file_cache
            .expect_remove()
            .times(1)
            .returning(|_| Err(CacheError::Unavailable("cache is down".to_string())));

        let service = service(file_cache, blob_store);

        let err = service
            .put(FileId::new(), sample_payload())
            .await
            .unwrap_err();
        assert!(matches!(err, FileServiceError::Storage(_)));
    }

    #[tokio::test]
    async fn delete_with_empty_list_touches_neither_cache_nor_storage() {
        let service = service(MockFileCache::new(), MockBlobStore::new());

        assert!(service.delete(&[]).await.is_ok());
    }

    #[tokio::test]
    async fn delete_removes_from_cache_then_storage() {
        let file_ids = vec![FileId::new(), FileId::new(), FileId::new()];
        let cache_expected = file_ids.clone();
        let store_expected = file_ids.clone();
        let mut seq = Sequence::new();

        let mut file_cache = MockFileCache::new();
        let mut blob_store = MockBlobStore::new();

        file_cache
            .expect_remove_all()
            .withf(move |ids| ids == cache_expected.as_slice())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        blob_store
            .expect_delete_by_ids()
            .withf(move |ids| ids == store_expected.as_slice())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let service = service(file_cache, blob_store);

        assert!(service.delete(&file_ids).await.is_ok());
    }

    #[tokio::test]
    async fn delete_aborts_before_storage_when_cache_removal_fails() {
        let mut file_cache = MockFileCache::new();
        file_cache
            .expect_remove_all()
            .times(1)
            .returning(|_| Err(CacheError::Unavailable("cache is down".to_string())));

        let service = service(file_cache, MockBlobStore::new());

        let err = service.delete(&[FileId::new()]).await.unwrap_err();
        assert!(matches!(err, FileServiceError::Cache(_)));
    }

    #[tokio::test]
    async fn delete_propagates_storage_failure_after_cache_removal() {
        let mut file_cache = MockFileCache::new();
        file_cache
            .expect_remove_all()
            .times(1)
            .returning(|_| Ok(()));

        let mut blob_store = MockBlobStore::new();
        blob_store
            .expect_delete_by_ids()
            .times(1)
            .returning(|_| Err(backend_failure()));

        let service = service(file_cache, blob_store);

        let err = service.delete(&[FileId::new()]).await.unwrap_err();
        assert!(matches!(err, FileServiceError::Storage(_)));
    }

    #[tokio::test]
    async fn delete_files_older_than_delegates_without_touching_cache() {
        let mut blob_store = MockBlobStore::new();
        blob_store
            .expect_delete_older_than()
            .with(eq(180))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        // No expectations on the cache: the sweep must not touch it.
        let service = service(MockFileCache::new(), blob_store);

        let deleted = service.delete_files_older_than(180).await.unwrap();
        assert_eq!(deleted, 0);
    }
}
