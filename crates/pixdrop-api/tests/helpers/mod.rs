//! Test helpers: build the router over an in-memory object store.
//!
//! Run from workspace root: `cargo test -p pixdrop-api --test upload_test`.

pub mod fixtures;
pub mod storage;

use axum_test::TestServer;
use object_store::memory::InMemory;
use pixdrop_api::setup::{build_state, routes};
use pixdrop_core::Config;
use std::collections::HashMap;
use std::sync::Arc;
use storage::CountingStorage;
use tempfile::TempDir;

pub const TEST_BUCKET: &str = "test-bucket";

/// Configuration built without touching the process environment
pub fn test_config(robots_index: bool) -> Config {
    let mut vars: HashMap<&str, &str> = HashMap::from([
        ("AWS_KEY", "test-key"),
        ("AWS_SECRET", "test-secret"),
        ("AWS_S3_BUCKET", TEST_BUCKET),
    ]);
    if robots_index {
        vars.insert("ROBOTS_INDEX", "true");
    }
    Config::from_lookup(|key| vars.get(key).map(|value| value.to_string()))
        .expect("test config")
}

/// Test application: server, backing store and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemory>,
    pub storage: Arc<CountingStorage>,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Expected public URL of `key` in the test bucket
    pub fn url_for(&self, key: &str) -> String {
        format!("https://{}.s3.amazonaws.com/{}", TEST_BUCKET, key)
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(test_config(false)).await
}

pub async fn setup_test_app_with(config: Config) -> TestApp {
    let store = Arc::new(InMemory::new());
    let storage = Arc::new(CountingStorage::over(store.clone()));
    let state = build_state(config, storage.clone());
    let router = routes::setup_routes(state);

    TestApp {
        server: TestServer::new(router).expect("test server"),
        store,
        storage,
        temp_dir: tempfile::tempdir().expect("temp dir"),
    }
}
