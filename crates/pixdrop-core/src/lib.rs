//! Pixdrop Core Library
//!
//! This crate provides the domain models, the output format table, error types and
//! configuration shared by the processing, storage, API and client crates.

pub mod config;
pub mod error;
pub mod formats;
pub mod models;

// Re-export commonly used types
pub use config::{Config, StorageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use formats::{FormatInfo, FORMAT_TABLE};
pub use models::{
    ImageOperations, JpegOptions, PngOptions, ResizeStrategy, TiffOptions, UploadBody,
    UploadPlan, UploadRequest, UploadResponse, UploadSource, WebpOptions,
};
