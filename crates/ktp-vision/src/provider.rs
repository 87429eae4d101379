//! [`TextRecognizer`] implementation backed by the Vision API.

use ktp_core::{StorageLocator, TextRecognizer};

use crate::VisionClient;

#[async_trait::async_trait]
impl TextRecognizer for VisionClient {
    async fn recognize_text(&self, locator: &StorageLocator) -> ktp_core::Result<String> {
        Ok(self.detect_text(locator.as_str()).await?)
    }
}
