use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::application::file_service::{FileService, FileServiceError};
use crate::domain::value_objects::FileId;

/// Upstream notification that a source-application instance was deleted,
/// carrying the ids of the files that belonged to it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDeletedEvent {
    #[serde(default)]
    pub source_application_id: Option<i64>,

    #[serde(default)]
    pub source_application_instance_id: Option<String>,

    #[serde(default)]
    pub file_ids: Vec<FileId>,
}

/// Consumes instance-deleted events and removes the associated files.
pub struct InstanceDeletedConsumer {
    file_service: Arc<FileService>,
}

impl InstanceDeletedConsumer {
    pub fn new(file_service: Arc<FileService>) -> Self {
        Self { file_service }
    }

    /// Handle a single event. Failures propagate to the delivery layer,
    /// which owns the retry/skip policy.
    pub async fn handle(&self, event: &InstanceDeletedEvent) -> Result<(), FileServiceError> {
        info!(
            source_application_id = ?event.source_application_id,
            source_application_instance_id = ?event.source_application_instance_id,
            count = event.file_ids.len(),
            "deleting files related to deleted instance"
        );

        match self.file_service.delete(&event.file_ids).await {
            Ok(()) => {
                info!(
                    count = event.file_ids.len(),
                    "successfully deleted files related to deleted instance"
                );
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "could not delete files related to deleted instance");
                Err(err)
            }
        }
    }

    /// Consume events from the channel until it closes. No retries: a failed
    /// event is logged by `handle` and skipped.
    pub async fn run(self: Arc<Self>, mut events: mpsc::Receiver<InstanceDeletedEvent>) {
        info!("starting instance-deleted event consumer");

        while let Some(event) = events.recv().await {
            let _ = self.handle(&event).await;
        }

        info!("instance-deleted event channel closed, consumer stopping");
    }
}
