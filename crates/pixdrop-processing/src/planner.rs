//! Transform planner
//!
//! Turns an `UploadRequest` into an `UploadPlan`: the bytes to send, the content
//! type to declare and the final object key. An explicit output format is checked
//! against the format table before any I/O, so a bad format never reaches storage.

use crate::codec::{ImageCodec, TransformOptions};
use crate::error::TransformError;
use crate::image::encoder::EncoderConfig;
use base64::Engine;
use bytes::Bytes;
use pixdrop_core::{
    FormatInfo, ImageOperations, UploadBody, UploadPlan, UploadRequest, UploadSource,
};
use std::sync::Arc;

/// Reported name of output the codec cannot identify
const UNKNOWN_FORMAT: &str = "unknown";

#[derive(Clone)]
pub struct TransformPlanner {
    codec: Arc<dyn ImageCodec>,
}

impl TransformPlanner {
    pub fn new(codec: Arc<dyn ImageCodec>) -> Self {
        Self { codec }
    }

    /// Build the upload plan for `request`
    pub async fn plan(&self, request: &UploadRequest) -> Result<UploadPlan, TransformError> {
        let source = request.source().ok_or_else(TransformError::missing_source)?;

        let Some(ops) = request.image_operations.as_ref() else {
            let body = match source {
                UploadSource::LocalFile(path) => UploadBody::File(path.to_path_buf()),
                UploadSource::Inline(buffer) => UploadBody::Bytes(decode_buffer(buffer)?),
            };
            return Ok(UploadPlan {
                body,
                destination_path: request.destination_path.clone(),
                content_type: request.content_type.clone(),
                expires: request.expires,
            });
        };

        let explicit_format = match ops.format.as_deref() {
            Some(name) => Some(
                FormatInfo::lookup(name)
                    .ok_or_else(|| TransformError::UnsupportedFormat(name.to_string()))?,
            ),
            None => None,
        };

        let input = match source {
            UploadSource::LocalFile(path) => Bytes::from(tokio::fs::read(path).await?),
            UploadSource::Inline(buffer) => decode_buffer(buffer)?,
        };

        let encoder = self.select_encoder(explicit_format, &input, ops);

        tracing::debug!(
            key = %request.destination_path,
            format = encoder.format_name(),
            append_extension = ops.append_extension,
            input_bytes = input.len(),
            "Planning image transform"
        );

        let options = TransformOptions::from_operations(ops, encoder);
        let codec = self.codec.clone();
        let encoded =
            tokio::task::spawn_blocking(move || codec.transform(&input, &options)).await??;

        let mut destination_path = request.destination_path.clone();
        let mut derived_content_type = explicit_format.map(|info| info.content_type.to_string());

        if ops.append_extension {
            let info = match explicit_format {
                Some(info) => info,
                None => {
                    let detected = self
                        .codec
                        .detect_format(&encoded)
                        .unwrap_or_else(|| UNKNOWN_FORMAT.to_string());
                    FormatInfo::lookup(&detected)
                        .ok_or(TransformError::UnsupportedFormat(detected))?
                }
            };
            derived_content_type = Some(info.content_type.to_string());
            destination_path = info.apply_extension(&destination_path);
        }

        Ok(UploadPlan {
            body: UploadBody::Bytes(encoded),
            destination_path,
            content_type: request.content_type.clone().or(derived_content_type),
            expires: request.expires,
        })
    }

    fn select_encoder(
        &self,
        explicit_format: Option<&FormatInfo>,
        input: &[u8],
        ops: &ImageOperations,
    ) -> EncoderConfig {
        if let Some(config) =
            explicit_format.and_then(|info| EncoderConfig::for_format(info.name, ops))
        {
            return config;
        }
        let detected = self.codec.detect_format(input);
        EncoderConfig::for_input(detected.as_deref(), ops)
    }
}

fn decode_buffer(buffer: &str) -> Result<Bytes, TransformError> {
    let data = base64::engine::general_purpose::STANDARD.decode(buffer)?;
    Ok(Bytes::from(data))
}
