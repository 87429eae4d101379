use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use ktp_core::{BoxedObjectStore, BoxedTextRecognizer};
use ktp_opendal::{StorageBackend, StorageConfig};
use ktp_vision::{VisionClient, VisionConfig, VisionCredentials};
use serde::{Deserialize, Serialize};

use crate::service::{Error, Result};

/// Tracing target for service configuration.
const TRACING_TARGET: &str = "ktp_server::service::config";

/// Default values for configuration options.
mod defaults {
    use ktp_opendal::{BackendType, DEFAULT_BUCKET, StorageConfig};

    /// Default prefix for uploaded object keys.
    pub const KEY_PREFIX: &str = ktp_core::DEFAULT_KEY_PREFIX;

    /// Default storage: the `elvora` bucket on Google Cloud Storage.
    pub fn storage() -> StorageConfig {
        StorageConfig::new(BackendType::Gcs, DEFAULT_BUCKET)
    }
}

/// App [`state`] configuration.
///
/// Built either from the command line (with the `config` feature) or through
/// [`ServiceConfig::builder`], which validates on build.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Prefix prepended to every uploaded object key.
    #[cfg_attr(
        feature = "config",
        arg(long = "key-prefix", env = "KTP_KEY_PREFIX", default_value = defaults::KEY_PREFIX)
    )]
    #[builder(default = "defaults::KEY_PREFIX.to_owned()")]
    pub key_prefix: String,

    /// Object storage settings, including the bucket.
    #[cfg_attr(feature = "config", command(flatten))]
    #[builder(default = "defaults::storage()")]
    pub storage: StorageConfig,

    /// Vision API key. Takes precedence over the service-account file.
    #[cfg_attr(
        feature = "config",
        arg(long = "vision-api-key", env = "VISION_API_KEY", hide_env_values = true)
    )]
    #[serde(default, skip_serializing)]
    #[builder(default)]
    pub vision_api_key: Option<String>,

    /// Vision API base URL, e.g. for an emulator.
    #[cfg_attr(
        feature = "config",
        arg(long = "vision-base-url", env = "VISION_BASE_URL")
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub vision_base_url: Option<String>,

    /// Vision request timeout in seconds. Disabled when unset.
    #[cfg_attr(
        feature = "config",
        arg(long = "vision-timeout", env = "VISION_TIMEOUT")
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub vision_timeout_secs: Option<u64>,
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Validates all configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if the key prefix is absolute, the storage settings
    /// are invalid, or the Vision timeout is zero.
    pub fn validate(&self) -> Result<()> {
        validate_key_prefix(&self.key_prefix).map_err(Error::config)?;
        validate_vision_timeout(self.vision_timeout_secs).map_err(Error::config)?;
        self.storage.validate()?;
        Ok(())
    }

    /// Opens the configured object store.
    pub fn connect_storage(&self) -> Result<BoxedObjectStore> {
        let backend = StorageBackend::new(self.storage.clone())?;

        tracing::info!(
            target: TRACING_TARGET,
            backend = %self.storage.backend,
            bucket = %self.storage.bucket,
            "object storage configured"
        );

        Ok(Arc::new(backend))
    }

    /// Creates the Vision client used for text recognition.
    ///
    /// No request is made here. Credentials are loaded once and shared by
    /// every request.
    pub fn connect_vision(&self) -> Result<BoxedTextRecognizer> {
        let config = {
            let mut builder = VisionConfig::builder();
            if let Some(base_url) = &self.vision_base_url {
                builder = builder.with_base_url(base_url.clone());
            }
            if let Some(secs) = self.vision_timeout_secs {
                builder = builder.with_timeout(Duration::from_secs(secs));
            }
            builder.build()
        }
        .map_err(|e| Error::external("vision", "Failed to build Vision config").with_source(e))?;

        let credentials = self.vision_credentials()?;

        tracing::info!(
            target: TRACING_TARGET,
            base_url = %config.base_url,
            credentials = credentials.kind(),
            "vision client configured"
        );

        let client = VisionClient::new(config, credentials)?;
        Ok(Arc::new(client))
    }

    /// Picks Vision credentials: API key, then service-account file, then none.
    fn vision_credentials(&self) -> Result<VisionCredentials> {
        if let Some(api_key) = &self.vision_api_key {
            return Ok(VisionCredentials::api_key(api_key.clone()));
        }

        match &self.storage.credential_path {
            Some(path) => Ok(VisionCredentials::service_account_file(path)?),
            None => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    "no Vision credentials configured, requests are sent unauthenticated"
                );
                Ok(VisionCredentials::none())
            }
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            key_prefix: defaults::KEY_PREFIX.to_owned(),
            storage: defaults::storage(),
            vision_api_key: None,
            vision_base_url: None,
            vision_timeout_secs: None,
        }
    }
}

impl ServiceConfigBuilder {
    /// Wrapper for builder validation that returns String errors.
    fn validate(builder: &ServiceConfigBuilder) -> std::result::Result<(), String> {
        if let Some(key_prefix) = &builder.key_prefix {
            validate_key_prefix(key_prefix)?;
        }

        if let Some(timeout) = &builder.vision_timeout_secs {
            validate_vision_timeout(*timeout)?;
        }

        if let Some(storage) = &builder.storage {
            storage.validate().map_err(|e| e.to_string())?;
        }

        if let Some(Some(base_url)) = &builder.vision_base_url
            && base_url.is_empty()
        {
            return Err("Vision base URL cannot be empty".to_string());
        }

        Ok(())
    }
}

fn validate_key_prefix(key_prefix: &str) -> std::result::Result<(), String> {
    if key_prefix.starts_with('/') {
        return Err(format!(
            "Key prefix '{key_prefix}' must be relative to the bucket"
        ));
    }

    Ok(())
}

fn validate_vision_timeout(timeout_secs: Option<u64>) -> std::result::Result<(), String> {
    if timeout_secs == Some(0) {
        return Err("Vision timeout must be greater than 0".to_string());
    }

    Ok(())
}
