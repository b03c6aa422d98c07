pub mod blob_store;
pub mod file_cache;

pub use blob_store::{BlobStore, BlobStoreError};
pub use file_cache::{CacheError, FileCache};

#[cfg(test)]
pub use blob_store::MockBlobStore;
#[cfg(test)]
pub use file_cache::MockFileCache;
