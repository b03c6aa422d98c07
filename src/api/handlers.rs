use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::application::events::InstanceDeletedEvent;
use crate::application::file_service::FileService;
use crate::domain::entities::FilePayload;
use crate::domain::value_objects::FileId;

/// GET /files/{id}
#[utoipa::path(
    get,
    path = "/files/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "File id")
    ),
    responses(
        (status = 200, description = "File found", body = FilePayload),
        (status = 400, description = "Invalid file id"),
        (status = 404, description = "File not found")
    )
)]
pub async fn get_file_handler(
    State(file_service): State<Arc<FileService>>,
    Path(id): Path<String>,
) -> Result<Json<FilePayload>, ApiError> {
    let file_id = id
        .parse::<FileId>()
        .map_err(|e| ApiError::bad_request(format!("Invalid file id: {}", e)))?;

    let payload = file_service.find_by_id(file_id).await?;

    Ok(Json(payload))
}

/// POST /files
/// Store a payload under a freshly generated id; the id is never
/// client-supplied.
#[utoipa::path(
    post,
    path = "/files",
    tag = "files",
    request_body = FilePayload,
    responses(
        (status = 201, description = "File stored", body = FileId),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn upload_file_handler(
    State(file_service): State<Arc<FileService>>,
    payload: Result<Json<FilePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<FileId>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    payload
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let file_id = FileId::new();
    let stored_id = file_service.put(file_id, payload).await?;

    Ok((StatusCode::CREATED, Json(stored_id)))
}

/// POST /internal/events/instance-deleted
/// Ingestion point for the upstream delivery layer; the event is queued and
/// processed asynchronously by the consumer.
#[utoipa::path(
    post,
    path = "/internal/events/instance-deleted",
    tag = "events",
    request_body = InstanceDeletedEvent,
    responses(
        (status = 202, description = "Event accepted"),
        (status = 400, description = "Malformed event")
    )
)]
pub async fn instance_deleted_handler(
    State(events): State<mpsc::Sender<InstanceDeletedEvent>>,
    event: Result<Json<InstanceDeletedEvent>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(event) = event.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    events
        .send(event)
        .await
        .map_err(|_| ApiError::internal_error("Event consumer is not running"))?;

    Ok(StatusCode::ACCEPTED)
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
