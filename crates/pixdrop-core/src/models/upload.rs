use base64::Engine;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::ImageOperations;

/// Body of `POST /upload`
///
/// Exactly one source is honored: `local_path` takes precedence over `buffer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Inline image data, base64 encoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer: Option<String>,
    /// Path of a file readable by the server process
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
    /// Object key in the bucket
    pub destination_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_operations: Option<ImageOperations>,
    /// Cache expiry passed through to storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
    /// Overrides the derived content type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Where the image bytes of a request come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSource<'a> {
    LocalFile(&'a Path),
    Inline(&'a str),
}

impl UploadRequest {
    /// Request for a file on the server's filesystem
    pub fn from_path(local_path: impl Into<PathBuf>, destination_path: impl Into<String>) -> Self {
        Self {
            buffer: None,
            local_path: Some(local_path.into()),
            destination_path: destination_path.into(),
            image_operations: None,
            expires: None,
            content_type: None,
        }
    }

    /// Request carrying the image inline; `data` is base64 encoded here
    pub fn from_bytes(data: &[u8], destination_path: impl Into<String>) -> Self {
        Self {
            buffer: Some(base64::engine::general_purpose::STANDARD.encode(data)),
            local_path: None,
            destination_path: destination_path.into(),
            image_operations: None,
            expires: None,
            content_type: None,
        }
    }

    pub fn with_operations(mut self, operations: ImageOperations) -> Self {
        self.image_operations = Some(operations);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// The honored source, or `None` when the request carries neither
    pub fn source(&self) -> Option<UploadSource<'_>> {
        match (&self.local_path, &self.buffer) {
            (Some(path), _) => Some(UploadSource::LocalFile(path.as_path())),
            (None, Some(buffer)) => Some(UploadSource::Inline(buffer.as_str())),
            (None, None) => None,
        }
    }
}

/// Bytes to upload: either a file streamed at upload time or an in-memory buffer
#[derive(Debug, Clone, PartialEq)]
pub enum UploadBody {
    File(PathBuf),
    Bytes(Bytes),
}

/// Resolved upload: what to send, where, and with which metadata
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPlan {
    pub body: UploadBody,
    pub destination_path: String,
    pub content_type: Option<String>,
    pub expires: Option<DateTime<Utc>>,
}

/// Successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}
