//! Mock gateway implementations for testing.
//!
//! These mocks stand in for the object store and the OCR backend, so the
//! verification pipeline can run without any network access.

mod recognizer;
mod storage;

#[cfg(feature = "config")]
use clap::Args;
use ktp_core::{BoxedObjectStore, BoxedTextRecognizer};
pub use recognizer::{MockRecognizerConfig, MockTextRecognizer};
use serde::{Deserialize, Serialize};
pub use storage::{MockObjectStore, MockStorageConfig, StoredObject};

/// Combined configuration for both mock gateways.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct MockConfig {
    /// Mock object store settings.
    #[cfg_attr(feature = "config", clap(flatten))]
    #[serde(default)]
    pub storage: MockStorageConfig,

    /// Mock recognizer settings.
    #[cfg_attr(feature = "config", clap(flatten))]
    #[serde(default)]
    pub recognizer: MockRecognizerConfig,
}

/// Creates both mock gateways from a single configuration.
pub fn create_mock_gateways(config: MockConfig) -> (BoxedObjectStore, BoxedTextRecognizer) {
    (
        std::sync::Arc::new(MockObjectStore::new(config.storage)),
        std::sync::Arc::new(MockTextRecognizer::new(config.recognizer)),
    )
}
