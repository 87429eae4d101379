//! Text recognition gateway abstraction.

use std::sync::Arc;

use crate::{Result, StorageLocator};

/// Type alias for a shared, dynamically dispatched text recognizer.
pub type BoxedTextRecognizer = Arc<dyn TextRecognizer>;

/// Gateway for running OCR over a previously stored image.
#[async_trait::async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Returns the full recognized text of the image at `locator`.
    ///
    /// An image without any detected text yields an empty string, not an error.
    async fn recognize_text(&self, locator: &StorageLocator) -> Result<String>;
}
