use derive_more::{AsRef, Display, Into};
use uuid::Uuid;

use super::secure_filename;
use crate::TRACING_TARGET_PATH;

/// Prefix prepended to every uploaded object key by default.
pub const DEFAULT_KEY_PREFIX: &str = "ktp_file/";

/// Storage key for an uploaded card image: `{prefix}{sanitized filename}`.
///
/// The filename part is always non-empty. When sanitization removes every
/// character, a random UUID stands in for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, AsRef, Display, Into)]
#[as_ref(str)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Builds a key from a prefix and a raw client filename.
    pub fn new(prefix: &str, filename: &str) -> Self {
        let mut sanitized = secure_filename(filename);
        if sanitized.is_empty() {
            sanitized = Uuid::new_v4().to_string();
            tracing::debug!(
                target: TRACING_TARGET_PATH,
                fallback = %sanitized,
                "filename sanitized to nothing, using generated name"
            );
        }

        Self(format!("{prefix}{sanitized}"))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_prepended() {
        let key = ObjectKey::new(DEFAULT_KEY_PREFIX, "ktp.jpg");
        assert_eq!(key.as_str(), "ktp_file/ktp.jpg");
    }

    #[test]
    fn filename_is_sanitized() {
        let key = ObjectKey::new("uploads/", "../secret/ktp scan.jpg");
        assert_eq!(key.to_string(), "uploads/secret_ktp_scan.jpg");
    }

    #[test]
    fn empty_sanitized_name_falls_back_to_uuid() {
        let key = ObjectKey::new(DEFAULT_KEY_PREFIX, "東京");
        let name = key.as_str().strip_prefix(DEFAULT_KEY_PREFIX).unwrap();

        assert!(Uuid::parse_str(name).is_ok(), "unexpected key {key}");
    }

    #[test]
    fn empty_prefix_is_allowed() {
        let key = ObjectKey::new("", "a.png");
        assert_eq!(String::from(key), "a.png");
    }
}
