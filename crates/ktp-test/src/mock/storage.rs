//! Mock object store for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use bytes::Bytes;
#[cfg(feature = "config")]
use clap::Args;
use ktp_core::{Error, ObjectStore, Result, StorageLocator};
use serde::{Deserialize, Serialize};

/// Bucket name used when none is configured.
const DEFAULT_MOCK_BUCKET: &str = "mock-bucket";

/// Configuration for the mock object store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct MockStorageConfig {
    /// Bucket name reported in returned locators.
    #[cfg_attr(feature = "config", arg(long = "mock-bucket", env = "MOCK_BUCKET"))]
    #[serde(default)]
    pub mock_bucket: Option<String>,

    /// When set, every write fails with this message.
    #[cfg_attr(
        feature = "config",
        arg(long = "mock-storage-error", env = "MOCK_STORAGE_ERROR")
    )]
    #[serde(default)]
    pub mock_storage_error: Option<String>,
}

/// An object captured by [`MockObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Key the object was written under.
    pub key: String,
    /// Object contents.
    pub data: Bytes,
}

/// Mock object store for testing.
///
/// Keeps every successful write in memory and returns `mock://` locators.
#[derive(Debug, Default)]
pub struct MockObjectStore {
    config: MockStorageConfig,
    calls: AtomicUsize,
    objects: Mutex<Vec<StoredObject>>,
}

impl MockObjectStore {
    /// Creates a new mock object store with the given configuration.
    pub fn new(config: MockStorageConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Creates a store whose writes all fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockStorageConfig {
            mock_storage_error: Some(message.into()),
            ..MockStorageConfig::default()
        })
    }

    /// Returns the bucket reported in locators.
    pub fn bucket(&self) -> &str {
        self.config
            .mock_bucket
            .as_deref()
            .unwrap_or(DEFAULT_MOCK_BUCKET)
    }

    /// Number of `put` calls, successful or not.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Objects written so far, in call order.
    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait::async_trait]
impl ObjectStore for MockObjectStore {
    async fn put(&self, key: &str, data: Bytes) -> Result<StorageLocator> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.config.mock_storage_error {
            return Err(Error::storage().with_message(message.clone()));
        }

        let mut objects = self.objects.lock().unwrap_or_else(PoisonError::into_inner);
        objects.retain(|object| object.key != key);
        objects.push(StoredObject {
            key: key.to_owned(),
            data,
        });

        Ok(StorageLocator::new("mock", self.bucket(), key))
    }
}
