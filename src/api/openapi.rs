use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::events::InstanceDeletedEvent;
use crate::domain::entities::FilePayload;
use crate::domain::value_objects::FileId;

/// OpenAPI specification for the File Depot API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "File Depot API",
        version = "1.0.0",
        description = "File storage service with a cache-aside coordinator over a durable blob store"
    ),
    paths(
        crate::api::handlers::health_handler,
        crate::api::handlers::get_file_handler,
        crate::api::handlers::upload_file_handler,
        crate::api::handlers::instance_deleted_handler,
    ),
    components(schemas(FilePayload, FileId, InstanceDeletedEvent)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "files", description = "File storage operations"),
        (name = "events", description = "Event ingestion")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI route
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
