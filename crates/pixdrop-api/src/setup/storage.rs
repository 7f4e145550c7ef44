//! Storage setup and initialization

use anyhow::Result;
use pixdrop_core::Config;
use pixdrop_storage::{S3Storage, Storage};
use std::sync::Arc;

/// Build the S3 client once; it is shared by every request
pub fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing S3 storage...");
    let storage = S3Storage::new(&config.storage)?;
    tracing::info!(
        bucket = %storage.bucket(),
        endpoint = ?config.storage.endpoint,
        "S3 storage initialized successfully"
    );
    Ok(Arc::new(storage))
}
