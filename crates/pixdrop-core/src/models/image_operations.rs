use serde::{Deserialize, Serialize};

/// How `width` and `height` are applied when both are given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeStrategy {
    /// Cover the box, then crop the overflow (centered)
    #[default]
    None,
    /// Fit inside the box, preserving aspect ratio
    Max,
    /// Cover the box without cropping, preserving aspect ratio
    Min,
}

/// JPEG encoder options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JpegOptions {
    /// 1-100, defaults to 80
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
}

/// PNG encoder options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PngOptions {
    /// zlib level 0-9, defaults to 6
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression_level: Option<u8>,
    /// Defaults to true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adaptive_filtering: Option<bool>,
}

/// WebP encoder options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebpOptions {
    /// 0-100, defaults to 80. Ignored when `lossless` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<f32>,
    #[serde(default)]
    pub lossless: bool,
}

/// TIFF encoder options. The encoder takes no tunables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TiffOptions {}

/// Declarative image transformations requested for an upload
///
/// Absence of the whole structure on a request means "upload the bytes unchanged".
/// Geometry values are not validated here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOperations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default)]
    pub resize: ResizeStrategy,
    #[serde(default)]
    pub ignore_aspect_ratio: bool,
    #[serde(default)]
    pub auto_rotate: bool,
    #[serde(default)]
    pub normalize: bool,
    #[serde(default)]
    pub grayscale: bool,
    /// Output format name. Kept as a free string so unknown names reach the
    /// format table and fail there with a readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default)]
    pub append_extension: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jpeg_options: Option<JpegOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png_options: Option<PngOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webp_options: Option<WebpOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiff_options: Option<TiffOptions>,
}

impl ImageOperations {
    /// Requested width; 0 counts as absent
    pub fn target_width(&self) -> Option<u32> {
        self.width.filter(|width| *width > 0)
    }

    /// Requested height; 0 counts as absent
    pub fn target_height(&self) -> Option<u32> {
        self.height.filter(|height| *height > 0)
    }

    /// Whether any resize was requested
    pub fn has_geometry(&self) -> bool {
        self.target_width().is_some() || self.target_height().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let ops: ImageOperations = serde_json::from_str(
            r#"{
                "width": 256,
                "height": 128,
                "resize": "max",
                "ignoreAspectRatio": true,
                "autoRotate": true,
                "appendExtension": true,
                "format": "webp",
                "webpOptions": { "quality": 60, "lossless": false },
                "pngOptions": { "compressionLevel": 9 }
            }"#,
        )
        .unwrap();

        assert_eq!(ops.width, Some(256));
        assert_eq!(ops.height, Some(128));
        assert_eq!(ops.resize, ResizeStrategy::Max);
        assert!(ops.ignore_aspect_ratio);
        assert!(ops.auto_rotate);
        assert!(!ops.normalize);
        assert!(!ops.grayscale);
        assert!(ops.append_extension);
        assert_eq!(ops.format.as_deref(), Some("webp"));
        assert_eq!(ops.webp_options.unwrap().quality, Some(60.0));
        assert_eq!(ops.png_options.unwrap().compression_level, Some(9));
        assert!(ops.jpeg_options.is_none());
    }

    #[test]
    fn test_defaults_from_empty_object() {
        let ops: ImageOperations = serde_json::from_str("{}").unwrap();
        assert_eq!(ops, ImageOperations::default());
        assert_eq!(ops.resize, ResizeStrategy::None);
        assert!(!ops.has_geometry());
    }

    #[test]
    fn test_unknown_format_name_is_accepted() {
        let ops: ImageOperations = serde_json::from_str(r#"{ "format": "foo" }"#).unwrap();
        assert_eq!(ops.format.as_deref(), Some("foo"));
    }

    #[test]
    fn test_zero_dimensions_are_not_geometry() {
        let ops = ImageOperations {
            width: Some(0),
            height: Some(0),
            ..Default::default()
        };
        assert!(!ops.has_geometry());

        let ops = ImageOperations {
            width: Some(0),
            height: Some(64),
            ..Default::default()
        };
        assert!(ops.has_geometry());
        assert_eq!(ops.target_width(), None);
        assert_eq!(ops.target_height(), Some(64));
    }

    #[test]
    fn test_has_geometry() {
        let ops = ImageOperations {
            height: Some(10),
            ..Default::default()
        };
        assert!(ops.has_geometry());
    }
}
