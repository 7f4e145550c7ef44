//! HTTP client for the pixdrop upload API.
//!
//! The base URL points at the mounted media router (e.g. `http://localhost:3000/media`);
//! `upload` posts to `{base}/upload`.

use anyhow::{anyhow, Context, Result};
use pixdrop_core::{UploadRequest, UploadResponse};
use reqwest::Client;
use serde_json::Value;

const DEFAULT_API_URL: &str = "http://localhost:3000/media";

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: PIXDROP_API_URL, defaulting to a local server.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("PIXDROP_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload an image, transforming it first when the request carries operations.
    ///
    /// A failed call returns an error whose message is the server's `error` string.
    pub async fn upload(&self, request: &UploadRequest) -> Result<UploadResponse> {
        let url = self.build_url("/upload");
        tracing::debug!(url = %url, key = %request.destination_path, "Sending upload request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .context("Failed to parse response as JSON")?;

        if status.as_u16() < 400 {
            return serde_json::from_value(body).context("Unexpected upload response shape");
        }

        match body.get("error").and_then(Value::as_str) {
            Some(message) => Err(anyhow!("{}", message)),
            None => Err(anyhow!("API request failed with status {}: {}", status, body)),
        }
    }
}
