//! Application state shared by every handler

use crate::services::upload::UploadService;
use pixdrop_core::Config;

/// Immutable after startup; handlers receive it as `Arc<AppState>`
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub upload_service: UploadService,
}
