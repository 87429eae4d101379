//! Mock text recognizer for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

#[cfg(feature = "config")]
use clap::Args;
use ktp_core::{Error, Result, StorageLocator, TextRecognizer};
use serde::{Deserialize, Serialize};

/// Configuration for the mock text recognizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct MockRecognizerConfig {
    /// Text returned for every image. Empty when unset.
    #[cfg_attr(feature = "config", arg(long = "mock-text", env = "MOCK_TEXT"))]
    #[serde(default)]
    pub mock_text: Option<String>,

    /// When set, every recognition fails with this message.
    #[cfg_attr(
        feature = "config",
        arg(long = "mock-recognition-error", env = "MOCK_RECOGNITION_ERROR")
    )]
    #[serde(default)]
    pub mock_recognition_error: Option<String>,
}

/// Mock text recognizer for testing.
///
/// Returns the configured text for any locator and remembers which locators
/// it was asked about.
#[derive(Debug, Default)]
pub struct MockTextRecognizer {
    config: MockRecognizerConfig,
    calls: AtomicUsize,
    locators: Mutex<Vec<StorageLocator>>,
}

impl MockTextRecognizer {
    /// Creates a new mock recognizer with the given configuration.
    pub fn new(config: MockRecognizerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Creates a recognizer that always returns `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(MockRecognizerConfig {
            mock_text: Some(text.into()),
            ..MockRecognizerConfig::default()
        })
    }

    /// Creates a recognizer whose calls all fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockRecognizerConfig {
            mock_recognition_error: Some(message.into()),
            ..MockRecognizerConfig::default()
        })
    }

    /// Number of `recognize_text` calls, successful or not.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Locators passed to the recognizer, in call order.
    pub fn locators(&self) -> Vec<StorageLocator> {
        self.locators
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait::async_trait]
impl TextRecognizer for MockTextRecognizer {
    async fn recognize_text(&self, locator: &StorageLocator) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.locators
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(locator.clone());

        if let Some(message) = &self.config.mock_recognition_error {
            return Err(Error::recognition().with_message(message.clone()));
        }

        Ok(self.config.mock_text.clone().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use ktp_core::ErrorKind;

    use super::*;

    #[tokio::test]
    async fn returns_configured_text() {
        let recognizer = MockTextRecognizer::with_text("3201011234567890\n");
        let locator = StorageLocator::new("mock", "b", "k");

        let text = recognizer.recognize_text(&locator).await.unwrap();
        assert_eq!(text, "3201011234567890\n");
        assert_eq!(recognizer.locators(), vec![locator]);
    }

    #[tokio::test]
    async fn default_text_is_empty() {
        let recognizer = MockTextRecognizer::default();
        let text = recognizer
            .recognize_text(&StorageLocator::new("mock", "b", "k"))
            .await
            .unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn scripted_failure_is_counted() {
        let recognizer = MockTextRecognizer::failing("Bad image data.");
        let err = recognizer
            .recognize_text(&StorageLocator::new("mock", "b", "k"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Recognition);
        assert_eq!(err.to_string(), "Bad image data.");
        assert_eq!(recognizer.calls(), 1);
    }
}
