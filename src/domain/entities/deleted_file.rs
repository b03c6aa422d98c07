use chrono::{DateTime, Utc};
use serde::Serialize;

/// Receipt for a file removed by the age-based sweep.
///
/// Not persisted; used for logging and deriving the sweep count. The
/// timestamp is the blob's last-modified time at the moment of deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedFile {
    pub name: String,
    pub deleted_at: DateTime<Utc>,
}
