//! Image codec capability
//!
//! The planner never touches pixels itself. It hands the source bytes and a
//! `TransformOptions` to an `ImageCodec` and asks the same codec to identify formats.

use crate::error::TransformError;
use crate::image::encoder::EncoderConfig;
use crate::image::filters::ImageFilters;
use crate::image::orientation::ImageOrientation;
use crate::image::resize::{ImageResize, ResizeSpec};
use bytes::Bytes;
use image::{GenericImageView, ImageFormat};
use pixdrop_core::ImageOperations;
use std::io::Cursor;

/// Everything the codec needs to produce the output bytes
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOptions {
    pub resize: Option<ResizeSpec>,
    pub auto_rotate: bool,
    pub normalize: bool,
    pub grayscale: bool,
    pub encoder: EncoderConfig,
}

impl TransformOptions {
    pub fn from_operations(ops: &ImageOperations, encoder: EncoderConfig) -> Self {
        TransformOptions {
            resize: ResizeSpec::from_operations(ops),
            auto_rotate: ops.auto_rotate,
            normalize: ops.normalize,
            grayscale: ops.grayscale,
            encoder,
        }
    }
}

/// Decode, transform and re-encode images
///
/// `transform` is CPU bound and is called from a blocking task.
pub trait ImageCodec: Send + Sync {
    /// Apply `options` to the encoded image `data` and return the encoded result
    fn transform(&self, data: &[u8], options: &TransformOptions) -> Result<Bytes, TransformError>;

    /// Lowercase format name of encoded image data (`png`, `jpeg`, `webp`, ...)
    fn detect_format(&self, data: &[u8]) -> Option<String>;
}

/// `ImageCodec` backed by the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageTransformer;

impl ImageTransformer {
    pub fn format_name(format: ImageFormat) -> String {
        match format {
            ImageFormat::Png => "png".to_string(),
            ImageFormat::Jpeg => "jpeg".to_string(),
            ImageFormat::WebP => "webp".to_string(),
            ImageFormat::Tiff => "tiff".to_string(),
            ImageFormat::Gif => "gif".to_string(),
            other => format!("{:?}", other).to_lowercase(),
        }
    }
}

impl ImageCodec for ImageTransformer {
    /// Pipeline order:
    /// 1. EXIF auto-rotation, so the resize box applies to the upright frame
    /// 2. Resize (if requested)
    /// 3. Normalize
    /// 4. Grayscale
    /// 5. Encode
    fn transform(&self, data: &[u8], options: &TransformOptions) -> Result<Bytes, TransformError> {
        let cursor = Cursor::new(data);
        let mut img = image::ImageReader::new(cursor)
            .with_guessed_format()?
            .decode()?;

        let (orig_width, orig_height) = img.dimensions();

        if options.auto_rotate {
            img = ImageOrientation::apply_exif_orientation(img, data);
        }

        if let Some(ref spec) = options.resize {
            img = ImageResize::apply_resize(&img, spec);
        }

        if options.normalize {
            tracing::debug!("Applying normalize");
            img = ImageFilters::normalize(img);
        }

        if options.grayscale {
            img = ImageFilters::apply_grayscale(img);
        }

        let encoded = options.encoder.encode(&img)?;

        let (width, height) = img.dimensions();
        tracing::debug!(
            orig_width = orig_width,
            orig_height = orig_height,
            width = width,
            height = height,
            format = options.encoder.format_name(),
            input_bytes = data.len(),
            output_bytes = encoded.len(),
            "Image transformed"
        );

        Ok(encoded)
    }

    fn detect_format(&self, data: &[u8]) -> Option<String> {
        image::guess_format(data).ok().map(Self::format_name)
    }
}
