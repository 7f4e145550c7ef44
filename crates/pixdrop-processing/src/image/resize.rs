use image::{DynamicImage, GenericImageView};
use pixdrop_core::{ImageOperations, ResizeStrategy};

/// Requested output geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSpec {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub strategy: ResizeStrategy,
    pub ignore_aspect_ratio: bool,
}

impl ResizeSpec {
    /// Geometry of `ops`, or `None` when neither side is set
    pub fn from_operations(ops: &ImageOperations) -> Option<Self> {
        if !ops.has_geometry() {
            return None;
        }
        Some(ResizeSpec {
            width: ops.target_width(),
            height: ops.target_height(),
            strategy: ops.resize,
            ignore_aspect_ratio: ops.ignore_aspect_ratio,
        })
    }
}

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Target size when only one side is given, keeping the aspect ratio
    pub fn calculate_dimensions(
        orig_width: u32,
        orig_height: u32,
        width: Option<u32>,
        height: Option<u32>,
    ) -> (u32, u32) {
        match (width, height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => {
                let aspect_ratio = orig_height as f32 / orig_width as f32;
                let h = (w as f32 * aspect_ratio).round() as u32;
                (w, h.max(1))
            }
            (None, Some(h)) => {
                let aspect_ratio = orig_width as f32 / orig_height as f32;
                let w = (h as f32 * aspect_ratio).round() as u32;
                (w.max(1), h)
            }
            (None, None) => (orig_width, orig_height),
        }
    }

    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> image::imageops::FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            image::imageops::FilterType::Triangle
        } else if max_ratio > 1.5 {
            image::imageops::FilterType::CatmullRom
        } else {
            image::imageops::FilterType::Lanczos3
        }
    }

    /// Resize image to exact dimensions
    pub fn resize_image(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let filter = Self::select_filter(orig_width, orig_height, width, height);
        img.resize_exact(width, height, filter)
    }

    /// Scale so the image covers `width x height`; nothing is cropped
    pub fn resize_to_cover(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let scale = (width as f64 / orig_width as f64).max(height as f64 / orig_height as f64);
        let new_width = ((orig_width as f64 * scale).round() as u32).max(1);
        let new_height = ((orig_height as f64 * scale).round() as u32).max(1);
        Self::resize_image(img, new_width, new_height)
    }

    /// Apply the requested geometry. A zero side is treated as absent.
    pub fn apply_resize(img: &DynamicImage, spec: &ResizeSpec) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let width = spec.width.filter(|w| *w > 0);
        let height = spec.height.filter(|h| *h > 0);

        if width.is_none() && height.is_none() {
            return img.clone();
        }

        tracing::debug!(
            orig_width = orig_width,
            orig_height = orig_height,
            width = ?width,
            height = ?height,
            strategy = ?spec.strategy,
            ignore_aspect_ratio = spec.ignore_aspect_ratio,
            "Applying resize"
        );

        if spec.ignore_aspect_ratio {
            let width = width.unwrap_or(orig_width);
            let height = height.unwrap_or(orig_height);
            return Self::resize_image(img, width, height);
        }

        match (width, height) {
            (Some(width), Some(height)) => match spec.strategy {
                ResizeStrategy::None => {
                    let filter = Self::select_filter(orig_width, orig_height, width, height);
                    img.resize_to_fill(width, height, filter)
                }
                ResizeStrategy::Max => {
                    let filter = Self::select_filter(orig_width, orig_height, width, height);
                    img.resize(width, height, filter)
                }
                ResizeStrategy::Min => Self::resize_to_cover(img, width, height),
            },
            (width, height) => {
                let (target_width, target_height) =
                    Self::calculate_dimensions(orig_width, orig_height, width, height);
                Self::resize_image(img, target_width, target_height)
            }
        }
    }
}
