use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{error, info};

use crate::application::file_service::{FileService, FileServiceError};

/// Periodic age-based cleanup of the durable store.
///
/// Runs independently of ordinary traffic: the sweep inspects store
/// timestamps only and needs no coordination with the cache-touching paths.
pub struct FileCleanupService {
    file_service: Arc<FileService>,
    retention_days: u32,
    initial_delay: Duration,
    period: Duration,
}

impl FileCleanupService {
    pub fn new(
        file_service: Arc<FileService>,
        retention_days: u32,
        initial_delay: Duration,
        period: Duration,
    ) -> Self {
        Self {
            file_service,
            retention_days,
            initial_delay,
            period,
        }
    }

    /// Run the cleanup loop: an initial delay, then one sweep per period.
    /// A failed cycle is logged and the loop continues.
    pub async fn run(self: Arc<Self>) {
        info!(
            retention_days = self.retention_days,
            initial_delay = ?self.initial_delay,
            period = ?self.period,
            "starting file cleanup task"
        );

        time::sleep(self.initial_delay).await;
        let mut interval = time::interval(self.period);

        loop {
            interval.tick().await;

            if let Err(err) = self.run_once().await {
                error!(error = %err, "file cleanup cycle failed");
            }
        }
    }

    /// One sweep cycle; returns the number of files deleted.
    pub async fn run_once(&self) -> Result<usize, FileServiceError> {
        info!(
            retention_days = self.retention_days,
            "cleaning up files older than retention window"
        );

        let deleted = self
            .file_service
            .delete_files_older_than(self.retention_days)
            .await?;

        info!(deleted, "deleted files during cleanup");
        Ok(deleted)
    }
}
