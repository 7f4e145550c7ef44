//! Image operations backing `ImageTransformer`

pub mod encoder;
pub mod filters;
pub mod orientation;
pub mod resize;
