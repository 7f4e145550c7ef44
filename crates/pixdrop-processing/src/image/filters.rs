use image::{DynamicImage, GenericImageView};

pub struct ImageFilters;

impl ImageFilters {
    /// Stretch the RGB range linearly so the darkest value maps to 0 and the
    /// brightest to 255. Alpha is left alone.
    pub fn normalize(img: DynamicImage) -> DynamicImage {
        let mut rgba = img.to_rgba8();

        let (min, max) = rgba.pixels().fold((u8::MAX, u8::MIN), |(min, max), pixel| {
            let [r, g, b, _] = pixel.0;
            (min.min(r).min(g).min(b), max.max(r).max(g).max(b))
        });

        if max <= min {
            return DynamicImage::ImageRgba8(rgba);
        }

        let range = (max - min) as f32;
        for pixel in rgba.pixels_mut() {
            for channel in pixel.0.iter_mut().take(3) {
                *channel = (((*channel - min) as f32 / range) * 255.0).round() as u8;
            }
        }

        DynamicImage::ImageRgba8(rgba)
    }

    /// Convert to grayscale
    pub fn apply_grayscale(img: DynamicImage) -> DynamicImage {
        let (width, height) = img.dimensions();
        tracing::debug!(width = width, height = height, "Applying grayscale");
        img.grayscale()
    }
}
