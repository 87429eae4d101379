//! Storage configuration types.

use std::path::PathBuf;

#[cfg(feature = "config")]
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::error::{StorageError, StorageResult};

/// Default bucket receiving uploaded card images.
pub const DEFAULT_BUCKET: &str = "elvora";

/// Supported storage backends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[cfg_attr(feature = "config", derive(ValueEnum))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BackendType {
    /// Google Cloud Storage.
    #[default]
    Gcs,
    /// Amazon S3 or an S3-compatible service.
    S3,
    /// Local filesystem, one directory per bucket.
    Fs,
    /// In-process memory, lost on restart.
    Memory,
}

impl BackendType {
    /// Returns the URI scheme used in locators for this backend.
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Gcs => "gs",
            Self::S3 => "s3",
            Self::Fs => "file",
            Self::Memory => "memory",
        }
    }

    /// Returns whether this backend was compiled in.
    pub fn is_enabled(self) -> bool {
        match self {
            Self::Gcs => cfg!(feature = "gcs"),
            Self::S3 => cfg!(feature = "s3"),
            Self::Fs => cfg!(feature = "fs"),
            Self::Memory => cfg!(feature = "memory"),
        }
    }
}

/// Object storage configuration.
///
/// The bucket is fixed for the lifetime of a [`StorageBackend`].
///
/// [`StorageBackend`]: crate::StorageBackend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct StorageConfig {
    /// Storage backend to write uploads to.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "storage-backend",
            env = "KTP_STORAGE_BACKEND",
            value_enum,
            default_value_t = BackendType::Gcs
        )
    )]
    #[serde(default)]
    pub backend: BackendType,

    /// Bucket (or directory, for `fs`) receiving uploads.
    #[cfg_attr(
        feature = "config",
        arg(long = "bucket", env = "KTP_BUCKET", default_value = DEFAULT_BUCKET)
    )]
    pub bucket: String,

    /// Service-account JSON key used by the `gcs` backend.
    #[cfg_attr(
        feature = "config",
        arg(long = "storage-credential-path", env = "GOOGLE_APPLICATION_CREDENTIALS")
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_path: Option<PathBuf>,

    /// Custom endpoint, e.g. for emulators or S3-compatible services.
    #[cfg_attr(
        feature = "config",
        arg(long = "storage-endpoint", env = "KTP_STORAGE_ENDPOINT")
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Region used by the `s3` backend.
    #[cfg_attr(
        feature = "config",
        arg(long = "storage-region", env = "KTP_STORAGE_REGION")
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Root path inside the bucket, or the base directory for `fs`.
    #[cfg_attr(feature = "config", arg(long = "storage-root", env = "KTP_STORAGE_ROOT"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

impl StorageConfig {
    /// Creates a configuration for the given backend and bucket.
    pub fn new(backend: BackendType, bucket: impl Into<String>) -> Self {
        Self {
            backend,
            bucket: bucket.into(),
            credential_path: None,
            endpoint: None,
            region: None,
            root: None,
        }
    }

    /// Sets the credential file path.
    pub fn with_credential_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credential_path = Some(path.into());
        self
    }

    /// Sets a custom endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the root path.
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Validates the configuration.
    ///
    /// Fails when the selected backend's feature is disabled, so a missing
    /// backend is reported before anything connects.
    pub fn validate(&self) -> StorageResult<()> {
        if !self.backend.is_enabled() {
            return Err(StorageError::unsupported(self.backend.to_string()));
        }

        if self.bucket.trim().is_empty() {
            return Err(StorageError::init("bucket name cannot be empty"));
        }

        if self.bucket.contains('/') {
            return Err(StorageError::init(format!(
                "bucket name '{}' must not contain '/'",
                self.bucket
            )));
        }

        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(BackendType::default(), DEFAULT_BUCKET)
    }
}
