use crate::traits::{PutObjectOptions, Storage, StorageResult};
use pixdrop_core::{UploadBody, UploadPlan, UploadResponse};
use std::sync::Arc;

/// Sends resolved upload plans to a storage backend
#[derive(Clone)]
pub struct StorageUploader {
    storage: Arc<dyn Storage>,
}

impl StorageUploader {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Upload the plan's body under its destination key.
    ///
    /// File bodies are opened here and streamed to the backend.
    pub async fn upload(&self, plan: UploadPlan) -> StorageResult<UploadResponse> {
        let options = PutObjectOptions {
            content_type: plan.content_type,
            expires: plan.expires,
        };

        let url = match plan.body {
            UploadBody::File(path) => {
                tracing::debug!(
                    path = %path.display(),
                    key = %plan.destination_path,
                    "Uploading local file"
                );
                let file = tokio::fs::File::open(&path).await?;
                self.storage
                    .put_object_stream(&plan.destination_path, Box::pin(file), &options)
                    .await?
            }
            UploadBody::Bytes(data) => {
                self.storage
                    .put_object(&plan.destination_path, data, &options)
                    .await?
            }
        };

        Ok(UploadResponse { url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::S3Storage;
    use crate::traits::StorageError;
    use async_trait::async_trait;
    use bytes::Bytes;
    use object_store::memory::InMemory;
    use object_store::path::Path;
    use object_store::{Attribute, ObjectStoreExt};
    use std::io::Write;

    fn memory_uploader() -> (Arc<InMemory>, StorageUploader) {
        let store = Arc::new(InMemory::new());
        let storage = S3Storage::from_store(store.clone(), "bucket".to_string(), None);
        (store, StorageUploader::new(Arc::new(storage)))
    }

    struct RejectingStorage;

    #[async_trait]
    impl Storage for RejectingStorage {
        async fn put_object(
            &self,
            _key: &str,
            _data: Bytes,
            _options: &PutObjectOptions,
        ) -> StorageResult<String> {
            Err(StorageError::UploadFailed("Access Denied".to_string()))
        }

        fn public_url(&self, key: &str) -> String {
            format!("https://denied/{}", key)
        }

        fn bucket(&self) -> &str {
            "denied"
        }
    }

    #[tokio::test]
    async fn test_upload_bytes() {
        let (store, uploader) = memory_uploader();
        let plan = UploadPlan {
            body: UploadBody::Bytes(Bytes::from_static(b"inline")),
            destination_path: "images/inline.png".to_string(),
            content_type: Some("image/png".to_string()),
            expires: None,
        };

        let response = uploader.upload(plan).await.unwrap();
        assert_eq!(
            response.url,
            "https://bucket.s3.amazonaws.com/images/inline.png"
        );

        let result = store.get(&Path::from("images/inline.png")).await.unwrap();
        assert_eq!(
            result
                .attributes
                .get(&Attribute::ContentType)
                .map(|v| v.as_ref()),
            Some("image/png")
        );
        assert_eq!(result.bytes().await.unwrap().as_ref(), b"inline");
    }

    #[tokio::test]
    async fn test_upload_local_file() {
        let (store, uploader) = memory_uploader();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"file contents").unwrap();

        let plan = UploadPlan {
            body: UploadBody::File(file.path().to_path_buf()),
            destination_path: "from-disk".to_string(),
            content_type: None,
            expires: None,
        };

        let response = uploader.upload(plan).await.unwrap();
        assert_eq!(response.url, "https://bucket.s3.amazonaws.com/from-disk");

        let bytes = store
            .get(&Path::from("from-disk"))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(bytes.as_ref(), b"file contents");
    }

    #[tokio::test]
    async fn test_upload_missing_file() {
        let (_, uploader) = memory_uploader();
        let plan = UploadPlan {
            body: UploadBody::File("/definitely/not/here.jpg".into()),
            destination_path: "missing".to_string(),
            content_type: None,
            expires: None,
        };

        let err = uploader.upload(plan).await.unwrap_err();
        assert!(matches!(err, StorageError::IoError(_)));
    }

    #[tokio::test]
    async fn test_backend_message_is_preserved() {
        let uploader = StorageUploader::new(Arc::new(RejectingStorage));
        let plan = UploadPlan {
            body: UploadBody::Bytes(Bytes::from_static(b"x")),
            destination_path: "x".to_string(),
            content_type: None,
            expires: None,
        };

        let err = uploader.upload(plan).await.unwrap_err();
        assert_eq!(err.to_string(), "Access Denied");
    }
}
