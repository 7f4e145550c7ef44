//! Application setup and initialization
//!
//! Builds the storage client, the upload service and the router from a `Config`.

pub mod routes;
pub mod server;
pub mod storage;

use crate::services::upload::UploadService;
use crate::state::AppState;
use anyhow::{Context, Result};
use pixdrop_core::Config;
use pixdrop_processing::{ImageTransformer, TransformPlanner};
use pixdrop_storage::{Storage, StorageUploader};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(&config.environment)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        bucket = %config.storage.bucket,
        region = %config.storage.region,
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(&config).context("Failed to initialize storage")?;

    let state = build_state(config, storage);
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}

/// Wire the upload pipeline on top of an already-built storage backend
pub fn build_state(config: Config, storage: Arc<dyn Storage>) -> Arc<AppState> {
    let planner = TransformPlanner::new(Arc::new(ImageTransformer));
    let uploader = StorageUploader::new(storage);

    Arc::new(AppState {
        config,
        upload_service: UploadService::new(planner, uploader),
    })
}
