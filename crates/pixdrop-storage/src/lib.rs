//! Pixdrop Storage Library
//!
//! This crate provides the storage abstraction used by the upload pipeline, an
//! S3 implementation built on `object_store`, and the `StorageUploader` that turns
//! an upload plan into exactly one put and a public URL.
//!
//! Every object is written with public-read visibility. There is no private mode
//! and no retry: a failed put is reported to the caller as-is.

pub mod s3;
pub mod traits;
pub mod uploader;

// Re-export commonly used types
pub use s3::S3Storage;
pub use traits::{PutObjectOptions, Storage, StorageError, StorageResult};
pub use uploader::StorageUploader;
