use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use file_depot::{
    api::{create_router, router::AppState},
    application::{
        cleanup::FileCleanupService,
        events::InstanceDeletedConsumer,
        file_service::FileService,
        ports::{BlobStore, FileCache},
        repository::FileRepository,
    },
    infrastructure::{cache::InMemoryFileCache, storage::InMemoryBlobStore},
    Config,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting file-depot service");

    // Load configuration
    let config = Config::from_env();
    config.validate()?;
    info!("Configuration loaded and validated");

    // Initialize infrastructure layer
    let file_cache: Arc<dyn FileCache> = Arc::new(InMemoryFileCache::new());
    let blob_store: Arc<dyn BlobStore> = Arc::new(InMemoryBlobStore::new());
    let file_repository = Arc::new(FileRepository::new(Arc::clone(&blob_store)));
    info!("Infrastructure layer initialized");

    // Initialize the coordinator (application layer)
    let file_service = Arc::new(FileService::new(
        Arc::clone(&file_cache),
        Arc::clone(&file_repository),
    ));
    info!("Storage coordinator initialized");

    // Start the cleanup sweep in the background
    let cleanup = Arc::new(FileCleanupService::new(
        Arc::clone(&file_service),
        config.file_retention_days,
        Duration::from_secs(config.cleanup_initial_delay_secs),
        Duration::from_secs(config.cleanup_interval_secs),
    ));
    tokio::spawn(Arc::clone(&cleanup).run());
    info!("File cleanup task started");

    // Start the instance-deleted event consumer
    let (event_tx, event_rx) = mpsc::channel(config.event_queue_capacity);
    let consumer = Arc::new(InstanceDeletedConsumer::new(Arc::clone(&file_service)));
    tokio::spawn(Arc::clone(&consumer).run(event_rx));
    info!("Instance-deleted event consumer started");

    // Create app state and router
    let state = AppState {
        file_service,
        events: event_tx,
    };
    let app = create_router(state);

    // Start server
    info!("Listening on {}", config.listen_addr);
    let listener = TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
