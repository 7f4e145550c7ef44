//! Output encoders
//!
//! The encoder target is chosen once per request and carried as a single tagged
//! `EncoderConfig`, so the per-format options can never disagree with the format.

use crate::error::TransformError;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::codecs::tiff::TiffEncoder;
use image::{DynamicImage, GenericImageView};
use pixdrop_core::{ImageOperations, JpegOptions, PngOptions, TiffOptions, WebpOptions};
use std::io::Cursor;

const DEFAULT_JPEG_QUALITY: u8 = 80;
const DEFAULT_PNG_COMPRESSION_LEVEL: u8 = 6;
const DEFAULT_WEBP_QUALITY: f32 = 80.0;

/// Encoder target together with its options
#[derive(Debug, Clone, PartialEq)]
pub enum EncoderConfig {
    Jpeg(JpegOptions),
    Png(PngOptions),
    Webp(WebpOptions),
    Tiff(TiffOptions),
}

impl EncoderConfig {
    /// Encoder for a format name, using the matching options block of `ops`
    pub fn for_format(name: &str, ops: &ImageOperations) -> Option<Self> {
        let config = match name {
            "jpeg" => EncoderConfig::Jpeg(ops.jpeg_options.clone().unwrap_or_default()),
            "png" => EncoderConfig::Png(ops.png_options.clone().unwrap_or_default()),
            "webp" => EncoderConfig::Webp(ops.webp_options.clone().unwrap_or_default()),
            "tiff" => EncoderConfig::Tiff(ops.tiff_options.clone().unwrap_or_default()),
            _ => return None,
        };
        Some(config)
    }

    /// Encoder that keeps the detected input format, or PNG for anything else
    pub fn for_input(detected: Option<&str>, ops: &ImageOperations) -> Self {
        detected
            .and_then(|name| Self::for_format(name, ops))
            .unwrap_or_else(|| EncoderConfig::Png(ops.png_options.clone().unwrap_or_default()))
    }

    pub fn format_name(&self) -> &'static str {
        match self {
            EncoderConfig::Jpeg(_) => "jpeg",
            EncoderConfig::Png(_) => "png",
            EncoderConfig::Webp(_) => "webp",
            EncoderConfig::Tiff(_) => "tiff",
        }
    }

    /// Encode `img` with this configuration
    pub fn encode(&self, img: &DynamicImage) -> Result<Bytes, TransformError> {
        let (width, height) = img.dimensions();
        tracing::debug!(
            format = self.format_name(),
            width = width,
            height = height,
            "Encoding image"
        );

        match self {
            EncoderConfig::Jpeg(options) => Self::encode_jpeg(img, options),
            EncoderConfig::Png(options) => Self::encode_png(img, options),
            EncoderConfig::Webp(options) => Self::encode_webp(img, options),
            EncoderConfig::Tiff(_) => Self::encode_tiff(img),
        }
    }

    fn encode_jpeg(img: &DynamicImage, options: &JpegOptions) -> Result<Bytes, TransformError> {
        let quality = options
            .quality
            .unwrap_or(DEFAULT_JPEG_QUALITY)
            .clamp(1, 100);
        let rgb_img = img.to_rgb8();

        let mut buffer = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| TransformError::Encode(e.to_string()))?;

        Ok(Bytes::from(buffer))
    }

    fn encode_png(img: &DynamicImage, options: &PngOptions) -> Result<Bytes, TransformError> {
        let compression = match options
            .compression_level
            .unwrap_or(DEFAULT_PNG_COMPRESSION_LEVEL)
        {
            0..=3 => CompressionType::Fast,
            4..=6 => CompressionType::Default,
            _ => CompressionType::Best,
        };
        let filter = if options.adaptive_filtering.unwrap_or(true) {
            FilterType::Adaptive
        } else {
            FilterType::NoFilter
        };

        let mut buffer = Vec::new();
        let encoder = PngEncoder::new_with_quality(&mut buffer, compression, filter);
        img.write_with_encoder(encoder)
            .map_err(|e| TransformError::Encode(e.to_string()))?;

        Ok(Bytes::from(buffer))
    }

    fn encode_webp(img: &DynamicImage, options: &WebpOptions) -> Result<Bytes, TransformError> {
        let (width, height) = img.dimensions();
        let rgba_img = img.to_rgba8();

        let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
        let webp_data = if options.lossless {
            encoder.encode_lossless()
        } else {
            let quality = options
                .quality
                .unwrap_or(DEFAULT_WEBP_QUALITY)
                .clamp(0.0, 100.0);
            encoder.encode(quality)
        };

        Ok(Bytes::copy_from_slice(&webp_data))
    }

    fn encode_tiff(img: &DynamicImage) -> Result<Bytes, TransformError> {
        let img = if img.color().has_alpha() {
            DynamicImage::ImageRgba8(img.to_rgba8())
        } else {
            DynamicImage::ImageRgb8(img.to_rgb8())
        };

        let mut cursor = Cursor::new(Vec::new());
        img.write_with_encoder(TiffEncoder::new(&mut cursor))
            .map_err(|e| TransformError::Encode(e.to_string()))?;

        Ok(Bytes::from(cursor.into_inner()))
    }
}
