//! Pixdrop Processing Library
//!
//! This crate turns an upload request into an upload plan. The `TransformPlanner`
//! decides which bytes to send, which content type to declare and which key to write
//! to; the pixel work is delegated to an `ImageCodec`, implemented here on top of the
//! `image`, `webp` and `kamadak-exif` crates.

pub mod codec;
pub mod error;
pub mod image;
pub mod planner;

// Re-export commonly used types
pub use codec::{ImageCodec, ImageTransformer, TransformOptions};
pub use error::TransformError;
pub use crate::image::encoder::EncoderConfig;
pub use crate::image::resize::ResizeSpec;
pub use planner::TransformPlanner;
