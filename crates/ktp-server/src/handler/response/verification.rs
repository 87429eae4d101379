//! Verification response types.

use ktp_core::{KtpData, StorageLocator};
use serde::{Deserialize, Serialize};

use crate::service::Verification;

/// Successful `POST /verify-ktp` response.
///
/// The envelope is returned whether or not any field was extracted.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResponse {
    /// Full text recognized on the card, possibly empty.
    pub full_text: String,
    /// Fields extracted from the text.
    pub ktp_data: KtpData,
    /// Locator of the stored upload.
    pub gcs_url: StorageLocator,
}

impl From<Verification> for VerificationResponse {
    fn from(verification: Verification) -> Self {
        Self {
            full_text: verification.full_text,
            ktp_data: verification.ktp_data,
            gcs_url: verification.locator,
        }
    }
}
