//! Application state and dependency injection.

use ktp_core::{BoxedObjectStore, BoxedTextRecognizer};

use crate::service::{Result, ServiceConfig, VerificationService};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection). The gateways
/// are created once at startup and shared by all requests.
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    verification: VerificationService,
}

impl ServiceState {
    /// Creates the state from already constructed gateways.
    pub fn new(
        storage: BoxedObjectStore,
        recognizer: BoxedTextRecognizer,
        key_prefix: impl Into<std::sync::Arc<str>>,
    ) -> Self {
        Self {
            verification: VerificationService::new(storage, recognizer, key_prefix),
        }
    }

    /// Initializes application state from configuration.
    ///
    /// Opens the object store and creates the Vision client. Neither is
    /// contacted until the first request.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let storage = config.connect_storage()?;
        let recognizer = config.connect_vision()?;

        Ok(Self::new(storage, recognizer, config.key_prefix.as_str()))
    }

    /// Returns the verification service.
    pub fn verification(&self) -> &VerificationService {
        &self.verification
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(verification: VerificationService);

#[cfg(test)]
mod tests {
    use ktp_opendal::{BackendType, StorageConfig};

    use super::*;

    #[test]
    fn from_config_with_memory_storage() {
        let config = ServiceConfig::builder()
            .with_key_prefix("cards/")
            .with_storage(StorageConfig::new(BackendType::Memory, "elvora"))
            .with_vision_api_key("test-key")
            .build()
            .unwrap();

        let state = ServiceState::from_config(&config).unwrap();
        assert_eq!(state.verification().key_prefix(), "cards/");
    }

    #[test]
    fn from_default_config() {
        let state = ServiceState::from_config(&ServiceConfig::default()).unwrap();
        assert_eq!(state.verification().key_prefix(), "ktp_file/");
    }

    #[test]
    fn from_config_validates() {
        let config = ServiceConfig {
            key_prefix: "/cards/".to_owned(),
            ..ServiceConfig::default()
        };

        assert!(ServiceState::from_config(&config).is_err());
    }
}
