use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::domain::entities::FilePayload;
use crate::domain::value_objects::FileId;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),

    #[error("internal cache error: {0}")]
    Internal(String),
}

/// Port for the fast file cache in front of the durable store.
///
/// `get` distinguishes a missing entry (`Ok(None)`) from a broken cache
/// (`Err`); callers must never conflate the two. Operations are independent
/// per key, and a `put` followed by a `get` on the same key from the same
/// caller observes the write.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FileCache: Send + Sync {
    async fn get(&self, file_id: FileId) -> Result<Option<FilePayload>, CacheError>;

    async fn put(&self, file_id: FileId, payload: FilePayload) -> Result<(), CacheError>;

    async fn remove(&self, file_id: FileId) -> Result<(), CacheError>;

    /// Bulk removal; independent per key.
    async fn remove_all(&self, file_ids: &[FileId]) -> Result<(), CacheError>;
}
