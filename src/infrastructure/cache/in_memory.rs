use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::ports::{CacheError, FileCache};
use crate::domain::entities::FilePayload;
use crate::domain::value_objects::FileId;

/// In-memory reference cache backed by a lock-sharded concurrent map, safe
/// for concurrent read/write/remove without external locking.
#[derive(Default)]
pub struct InMemoryFileCache {
    entries: DashMap<FileId, FilePayload>,
}

impl InMemoryFileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl FileCache for InMemoryFileCache {
    async fn get(&self, file_id: FileId) -> Result<Option<FilePayload>, CacheError> {
        Ok(self.entries.get(&file_id).map(|entry| entry.clone()))
    }

    async fn put(&self, file_id: FileId, payload: FilePayload) -> Result<(), CacheError> {
        self.entries.insert(file_id, payload);
        Ok(())
    }

    async fn remove(&self, file_id: FileId) -> Result<(), CacheError> {
        self.entries.remove(&file_id);
        Ok(())
    }

    async fn remove_all(&self, file_ids: &[FileId]) -> Result<(), CacheError> {
        for file_id in file_ids {
            self.entries.remove(file_id);
        }
        Ok(())
    }
}
