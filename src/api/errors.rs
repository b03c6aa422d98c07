use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::file_service::FileServiceError;

/// API error response
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
        }));

        (self.status, body).into_response()
    }
}

// Storage and cache internals stay out of response bodies; the service and
// repository layers already logged the cause.
impl From<FileServiceError> for ApiError {
    fn from(err: FileServiceError) -> Self {
        match err {
            FileServiceError::NotFound(_) => ApiError::not_found("File not found"),
            FileServiceError::Storage(_) | FileServiceError::Cache(_) => {
                ApiError::internal_error("Failed to process file operation")
            }
        }
    }
}
