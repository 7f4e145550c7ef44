//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::pin::Pin;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend's own message, unchanged
    #[error("{0}")]
    UploadFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Object metadata sent along with a put
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PutObjectOptions {
    pub content_type: Option<String>,
    pub expires: Option<DateTime<Utc>>,
}

/// Storage abstraction trait
///
/// A backend is bound to one bucket and one set of credentials for its lifetime.
/// Implementations must perform a single attempt per call.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `key` with public-read visibility and return its public URL
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        options: &PutObjectOptions,
    ) -> StorageResult<String>;

    /// Upload from a reader; the reader is consumed until EOF.
    ///
    /// The default implementation buffers the whole stream and issues one
    /// `put_object`, so the upload stays a single request.
    async fn put_object_stream(
        &self,
        key: &str,
        mut reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
        options: &PutObjectOptions,
    ) -> StorageResult<String> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer).await?;
        self.put_object(key, Bytes::from(buffer), options).await
    }

    /// Public URL of `key`; no existence check is made
    fn public_url(&self, key: &str) -> String;

    /// Bucket this backend writes to
    fn bucket(&self) -> &str;
}
