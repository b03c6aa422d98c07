use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::api::handlers::{
    get_file_handler, health_handler, instance_deleted_handler, upload_file_handler,
};
use crate::api::openapi::swagger_ui;
use crate::application::events::InstanceDeletedEvent;
use crate::application::file_service::FileService;

/// Payloads arrive base64-encoded in a JSON document, so the limit is on the
/// whole request body rather than the decoded file size.
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Application state container
#[derive(Clone)]
pub struct AppState {
    pub file_service: Arc<FileService>,
    pub events: mpsc::Sender<InstanceDeletedEvent>,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let file_state = Arc::clone(&state.file_service);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/files",
            post(upload_file_handler).with_state(Arc::clone(&file_state)),
        )
        .route("/files/{id}", get(get_file_handler).with_state(file_state))
        .route(
            "/internal/events/instance-deleted",
            post(instance_deleted_handler).with_state(state.events),
        )
        .merge(swagger_ui())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
