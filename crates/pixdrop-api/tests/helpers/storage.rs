//! Storage test doubles

use async_trait::async_trait;
use bytes::Bytes;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{Attribute, ObjectStoreExt};
use pixdrop_storage::{PutObjectOptions, S3Storage, Storage, StorageResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// `S3Storage` over an in-memory store that counts put calls
pub struct CountingStorage {
    inner: S3Storage,
    puts: AtomicUsize,
}

impl CountingStorage {
    pub fn over(store: Arc<InMemory>) -> Self {
        Self {
            inner: S3Storage::from_store(store, super::TEST_BUCKET.to_string(), None),
            puts: AtomicUsize::new(0),
        }
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for CountingStorage {
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        options: &PutObjectOptions,
    ) -> StorageResult<String> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put_object(key, data, options).await
    }

    fn public_url(&self, key: &str) -> String {
        self.inner.public_url(key)
    }

    fn bucket(&self) -> &str {
        self.inner.bucket()
    }
}

/// Object as written to the store
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
    pub expires: Option<String>,
}

pub async fn stored_object(store: &InMemory, key: &str) -> Option<StoredObject> {
    let result = store.get(&Path::from(key)).await.ok()?;
    let content_type = result
        .attributes
        .get(&Attribute::ContentType)
        .map(|value| value.as_ref().to_string());
    let cache_control = result
        .attributes
        .get(&Attribute::CacheControl)
        .map(|value| value.as_ref().to_string());
    let expires = result
        .attributes
        .get(&Attribute::Metadata("expires".into()))
        .map(|value| value.as_ref().to_string());
    let data = result.bytes().await.ok()?;

    Some(StoredObject {
        data,
        content_type,
        cache_control,
        expires,
    })
}
