//! Upload service: plan the request, then perform exactly one storage put

use crate::error::HttpAppError;
use pixdrop_core::{UploadRequest, UploadResponse};
use pixdrop_processing::TransformPlanner;
use pixdrop_storage::StorageUploader;
use std::time::Instant;

#[derive(Clone)]
pub struct UploadService {
    planner: TransformPlanner,
    uploader: StorageUploader,
}

impl UploadService {
    pub fn new(planner: TransformPlanner, uploader: StorageUploader) -> Self {
        Self { planner, uploader }
    }

    pub async fn upload(&self, request: UploadRequest) -> Result<UploadResponse, HttpAppError> {
        let start = Instant::now();

        let plan = self.planner.plan(&request).await?;
        let destination_path = plan.destination_path.clone();
        let response = self.uploader.upload(plan).await?;

        tracing::info!(
            key = %destination_path,
            url = %response.url,
            transformed = request.image_operations.is_some(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Upload completed"
        );

        Ok(response)
    }
}
