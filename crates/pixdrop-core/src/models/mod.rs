//! Request, plan and response models for the upload pipeline

pub mod image_operations;
pub mod upload;

pub use image_operations::{
    ImageOperations, JpegOptions, PngOptions, ResizeStrategy, TiffOptions, WebpOptions,
};
pub use upload::{UploadBody, UploadPlan, UploadRequest, UploadResponse, UploadSource};
