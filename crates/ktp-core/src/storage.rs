//! Object storage gateway abstraction.

use std::sync::Arc;

use bytes::Bytes;
use derive_more::{AsRef, Display, Into};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Type alias for a shared, dynamically dispatched object store.
pub type BoxedObjectStore = Arc<dyn ObjectStore>;

/// Fully qualified address of a stored object, e.g. `gs://elvora/ktp_file/a.jpg`.
///
/// The locator is what gets handed to the recognizer and echoed back to the
/// client, so its textual form is part of the public contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, AsRef, Display, Into)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
#[as_ref(str)]
pub struct StorageLocator(String);

impl StorageLocator {
    /// Builds a locator from its scheme, bucket and key parts.
    pub fn new(scheme: &str, bucket: &str, key: &str) -> Self {
        Self(format!("{scheme}://{bucket}/{key}"))
    }

    /// Returns the locator as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for StorageLocator {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Gateway for writing uploaded bytes to an object store.
///
/// The bucket is fixed per implementation. Writes are blind overwrites: an
/// existing object under the same key is replaced.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `data` under `key` and returns the object's locator.
    async fn put(&self, key: &str, data: Bytes) -> Result<StorageLocator>;
}
