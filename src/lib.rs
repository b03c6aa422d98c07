//! # File Depot - Cache-Aside File Storage Service
//!
//! A file-storage microservice: binary payloads with metadata are stored
//! under generated ids, with a fast in-memory cache in front of a durable
//! blob store and scheduled/event-driven deletion of stale or orphaned
//! files.
//!
//! ## Architecture Layers
//!
//! - **Domain**: payload and identifier types with their validation
//! - **Application**: ports (cache, blob store), the failure-translating
//!   storage repository, the cache-aside coordinator, and the cleanup/event
//!   entry points
//! - **Infrastructure**: concurrent in-memory reference adapters
//! - **API**: HTTP handlers and error mapping
//!
//! ## Consistency Model
//!
//! The durable store is the source of truth; the cache is only ever a
//! subset view of it. Reads are cache-aside (a hit wins, a miss falls
//! through, no repopulation), writes go cache-first with a compensating
//! cache removal when the store write fails, and deletes clear the cache
//! before the store.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use application::file_service::{FileService, FileServiceError};
pub use config::Config;
pub use domain::{entities, value_objects};
