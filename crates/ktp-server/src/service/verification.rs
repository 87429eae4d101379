//! The upload, recognize and extract pipeline.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use ktp_core::{
    BoxedObjectStore, BoxedTextRecognizer, KtpData, ObjectKey, StorageLocator, extract_ktp_data,
};

use crate::service::VerifyError;

/// Tracing target for the verification pipeline.
const TRACING_TARGET: &str = "ktp_server::service::verification";

/// Outcome of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Full text recognized on the card, possibly empty.
    pub full_text: String,
    /// Fields extracted from the text.
    pub ktp_data: KtpData,
    /// Locator of the stored upload.
    pub locator: StorageLocator,
}

/// Runs a card image through storage, recognition and field extraction.
///
/// The steps run strictly in sequence: recognition needs the locator that
/// the upload produces. The service holds no per-request state, so one
/// instance is shared by all requests.
#[derive(Clone)]
pub struct VerificationService {
    storage: BoxedObjectStore,
    recognizer: BoxedTextRecognizer,
    key_prefix: Arc<str>,
}

impl VerificationService {
    /// Creates a new service over the given gateways.
    pub fn new(
        storage: BoxedObjectStore,
        recognizer: BoxedTextRecognizer,
        key_prefix: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            storage,
            recognizer,
            key_prefix: key_prefix.into(),
        }
    }

    /// Returns the prefix prepended to every object key.
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Stores the upload, recognizes its text and extracts the card fields.
    ///
    /// # Errors
    ///
    /// - [`VerifyError::MissingFile`] if `filename` is empty; nothing is stored.
    /// - [`VerifyError::Storage`] if the upload fails; recognition is skipped.
    /// - [`VerifyError::Recognition`] if recognition fails. The upload has
    ///   already happened at that point and is left in place.
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    pub async fn verify(&self, filename: &str, data: Bytes) -> Result<Verification, VerifyError> {
        if filename.is_empty() {
            tracing::debug!(target: TRACING_TARGET, "upload has an empty filename");
            return Err(VerifyError::no_selected_file());
        }

        let key = ObjectKey::new(&self.key_prefix, filename);

        let locator = self
            .storage
            .put(key.as_str(), data)
            .await
            .map_err(|err| {
                tracing::error!(
                    target: TRACING_TARGET,
                    key = %key,
                    error = %err,
                    kind = err.kind_str(),
                    "failed to store upload"
                );
                VerifyError::Storage(err.to_string())
            })?;

        tracing::info!(target: TRACING_TARGET, locator = %locator, "upload stored");

        let full_text = self
            .recognizer
            .recognize_text(&locator)
            .await
            .map_err(|err| {
                tracing::error!(
                    target: TRACING_TARGET,
                    locator = %locator,
                    error = %err,
                    kind = err.kind_str(),
                    "text recognition failed"
                );
                VerifyError::Recognition(err.to_string())
            })?;

        let ktp_data = extract_ktp_data(&full_text);

        tracing::info!(
            target: TRACING_TARGET,
            locator = %locator,
            text_len = full_text.len(),
            matched_fields = ktp_data.len(),
            "verification completed"
        );

        Ok(Verification {
            full_text,
            ktp_data,
            locator,
        })
    }
}

impl fmt::Debug for VerificationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationService")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use ktp_core::DEFAULT_KEY_PREFIX;
    use ktp_test::{MockObjectStore, MockTextRecognizer};

    use super::*;

    const CARD_TEXT: &str = "3201011234567890\nBUDI SANTOSO\n01-01-1990";

    fn service(
        storage: &Arc<MockObjectStore>,
        recognizer: &Arc<MockTextRecognizer>,
    ) -> VerificationService {
        VerificationService::new(storage.clone(), recognizer.clone(), DEFAULT_KEY_PREFIX)
    }

    #[tokio::test]
    async fn verify_runs_the_full_pipeline() {
        let storage = Arc::new(MockObjectStore::default());
        let recognizer = Arc::new(MockTextRecognizer::with_text(CARD_TEXT));

        let verification = service(&storage, &recognizer)
            .verify("ktp.jpg", Bytes::from_static(b"image"))
            .await
            .unwrap();

        assert_eq!(verification.full_text, CARD_TEXT);
        assert_eq!(
            verification.locator.as_str(),
            "mock://mock-bucket/ktp_file/ktp.jpg"
        );
        assert_eq!(
            verification.ktp_data.nik.as_deref(),
            Some("3201011234567890")
        );
        assert_eq!(verification.ktp_data.nama.as_deref(), Some("BUDI SANTOSO"));
        assert_eq!(
            verification.ktp_data.tanggal_lahir.as_deref(),
            Some("01-01-1990")
        );

        let objects = storage.objects();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].key, "ktp_file/ktp.jpg");
        assert_eq!(objects[0].data, Bytes::from_static(b"image"));
        assert_eq!(recognizer.locators(), vec![verification.locator]);
    }

    #[tokio::test]
    async fn empty_filename_is_rejected_before_upload() {
        let storage = Arc::new(MockObjectStore::default());
        let recognizer = Arc::new(MockTextRecognizer::default());

        let error = service(&storage, &recognizer)
            .verify("", Bytes::from_static(b"image"))
            .await
            .unwrap_err();

        assert_eq!(error, VerifyError::no_selected_file());
        assert_eq!(storage.calls(), 0);
        assert_eq!(recognizer.calls(), 0);
    }

    #[tokio::test]
    async fn filename_is_sanitized_into_the_key() {
        let storage = Arc::new(MockObjectStore::default());
        let recognizer = Arc::new(MockTextRecognizer::default());

        let verification = VerificationService::new(storage.clone(), recognizer, "cards/")
            .verify("../../etc/my ktp.png", Bytes::from_static(b"image"))
            .await
            .unwrap();

        assert_eq!(storage.objects()[0].key, "cards/etc_my_ktp.png");
        assert!(verification.locator.as_str().ends_with("cards/etc_my_ktp.png"));
    }

    #[tokio::test]
    async fn storage_failure_skips_recognition() {
        let storage = Arc::new(MockObjectStore::failing("bucket elvora not found"));
        let recognizer = Arc::new(MockTextRecognizer::with_text(CARD_TEXT));

        let error = service(&storage, &recognizer)
            .verify("ktp.jpg", Bytes::from_static(b"image"))
            .await
            .unwrap_err();

        assert_eq!(
            error,
            VerifyError::Storage("bucket elvora not found".to_owned())
        );
        assert_eq!(storage.calls(), 1);
        assert_eq!(recognizer.calls(), 0);
    }

    #[tokio::test]
    async fn recognition_failure_happens_after_upload() {
        let storage = Arc::new(MockObjectStore::default());
        let recognizer = Arc::new(MockTextRecognizer::failing("Bad image data."));

        let error = service(&storage, &recognizer)
            .verify("ktp.jpg", Bytes::from_static(b"image"))
            .await
            .unwrap_err();

        assert_eq!(error, VerifyError::Recognition("Bad image data.".to_owned()));
        assert_eq!(storage.objects().len(), 1);
        assert_eq!(recognizer.calls(), 1);
        assert_eq!(
            recognizer.locators()[0].as_str(),
            "mock://mock-bucket/ktp_file/ktp.jpg"
        );
    }

    #[tokio::test]
    async fn empty_text_yields_empty_fields() {
        let storage = Arc::new(MockObjectStore::default());
        let recognizer = Arc::new(MockTextRecognizer::with_text(""));

        let verification = service(&storage, &recognizer)
            .verify("blank.jpg", Bytes::new())
            .await
            .unwrap();

        assert!(verification.full_text.is_empty());
        assert!(verification.ktp_data.is_empty());
    }
}
