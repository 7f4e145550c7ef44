use crate::traits::{PutObjectOptions, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::{
    Attribute, AttributeValue, Attributes, ClientOptions, ObjectStore, PutOptions, PutPayload,
    RetryConfig,
};
use chrono::{DateTime, Utc};
use pixdrop_core::StorageConfig;
use std::sync::Arc;

const ACL_HEADER: &str = "x-amz-acl";
const PUBLIC_READ: &str = "public-read";
const EXPIRES_METADATA_KEY: &str = "expires";

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage bound to the configured bucket and credentials
    ///
    /// Every request carries `x-amz-acl: public-read`, and the client is built with
    /// retries disabled so each put is attempted exactly once.
    pub fn new(config: &StorageConfig) -> StorageResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(ACL_HEADER),
            HeaderValue::from_static(PUBLIC_READ),
        );

        let retry = RetryConfig {
            max_retries: 0,
            ..Default::default()
        };

        let mut builder = AmazonS3Builder::new()
            .with_access_key_id(config.access_key_id.clone())
            .with_secret_access_key(config.secret_access_key.clone())
            .with_region(config.region.clone())
            .with_bucket_name(config.bucket.clone())
            .with_client_options(ClientOptions::new().with_default_headers(headers))
            .with_retry(retry);

        if let Some(ref endpoint) = config.endpoint {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::from_store(
            Arc::new(store),
            config.bucket.clone(),
            config.endpoint.clone(),
        ))
    }

    /// Wrap an already-built object store (any `object_store` backend)
    pub fn from_store(
        store: Arc<dyn ObjectStore>,
        bucket: String,
        endpoint_url: Option<String>,
    ) -> Self {
        S3Storage {
            store,
            bucket,
            endpoint_url,
        }
    }

    /// Object location for `key`, rejecting keys the store would rewrite
    ///
    /// `Path::parse` strips a leading `/` and refuses empty, `.` and `..` segments;
    /// either way the stored key would no longer match the returned URL.
    fn object_path(key: &str) -> StorageResult<Path> {
        let location = Path::parse(key).map_err(|e| {
            StorageError::UploadFailed(format!("Invalid object key {}: {}", key, e))
        })?;
        if location.as_ref() != key {
            return Err(StorageError::UploadFailed(format!(
                "Invalid object key {}: stored as {}",
                key, location
            )));
        }
        Ok(location)
    }

    /// `Cache-Control` value that makes caches expire the object at `expires`
    fn cache_control(expires: DateTime<Utc>, now: DateTime<Utc>) -> String {
        let max_age = (expires - now).num_seconds().max(0);
        format!("public, max-age={}", max_age)
    }

    fn put_options(options: &PutObjectOptions, now: DateTime<Utc>) -> PutOptions {
        let mut attributes = Attributes::new();
        if let Some(ref content_type) = options.content_type {
            attributes.insert(
                Attribute::ContentType,
                AttributeValue::from(content_type.clone()),
            );
        }
        if let Some(expires) = options.expires {
            attributes.insert(
                Attribute::CacheControl,
                AttributeValue::from(Self::cache_control(expires, now)),
            );
            attributes.insert(
                Attribute::Metadata(EXPIRES_METADATA_KEY.into()),
                AttributeValue::from(expires.to_rfc2822()),
            );
        }

        let mut put_options = PutOptions::default();
        put_options.attributes = attributes;
        put_options
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        options: &PutObjectOptions,
    ) -> StorageResult<String> {
        let size = data.len() as u64;
        let location = Self::object_path(key)?;
        let start = std::time::Instant::now();

        let result = self
            .store
            .put_opts(
                &location,
                PutPayload::from(data),
                Self::put_options(options, Utc::now()),
            )
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        let url = self.public_url(location.as_ref());

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            content_type = ?options.content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(url)
    }

    /// Public URL for an object
    ///
    /// For AWS S3: https://{bucket}.s3.amazonaws.com/{key}
    /// For S3-compatible providers, path-style under the endpoint: {endpoint}/{bucket}/{key}
    fn public_url(&self, key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/{}", base_url, self.bucket, key)
        } else {
            format!("https://{}.s3.amazonaws.com/{}", self.bucket, key)
        }
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
