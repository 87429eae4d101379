//! Storage backend implementation.

use bytes::Bytes;
use ktp_core::{ObjectStore, StorageLocator};
use opendal::Operator;

use crate::TRACING_TARGET;
use crate::config::{BackendType, StorageConfig};
use crate::error::{StorageError, StorageResult};

/// Object store for a single bucket, backed by an OpenDAL operator.
#[derive(Clone)]
pub struct StorageBackend {
    operator: Operator,
    config: StorageConfig,
}

impl StorageBackend {
    /// Creates a new storage backend from configuration.
    ///
    /// No connection is made here; credentials and bucket existence are only
    /// checked by the first write.
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        config.validate()?;
        let operator = Self::create_operator(&config)?;

        tracing::info!(
            target: TRACING_TARGET,
            backend = %config.backend,
            bucket = %config.bucket,
            "Storage backend initialized"
        );

        Ok(Self { operator, config })
    }

    /// Returns the configuration for this backend.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Returns the backend type.
    pub fn backend_type(&self) -> BackendType {
        self.config.backend
    }

    /// Returns the locator an object under `key` would have.
    pub fn locator(&self, key: &str) -> StorageLocator {
        StorageLocator::new(self.config.backend.scheme(), &self.config.bucket, key)
    }

    /// Writes `data` under `key`, replacing any existing object.
    pub async fn write(&self, key: &str, data: Bytes) -> StorageResult<StorageLocator> {
        let size = data.len();
        tracing::debug!(
            target: TRACING_TARGET,
            key = %key,
            size,
            "Writing object"
        );

        self.operator.write(key, data).await?;

        let locator = self.locator(key);
        tracing::debug!(
            target: TRACING_TARGET,
            locator = %locator,
            size,
            "Object write complete"
        );

        Ok(locator)
    }

    /// Creates an OpenDAL operator based on configuration.
    #[allow(unreachable_patterns)]
    fn create_operator(config: &StorageConfig) -> StorageResult<Operator> {
        match config.backend {
            #[cfg(feature = "gcs")]
            BackendType::Gcs => {
                let mut builder = opendal::services::Gcs::default().bucket(&config.bucket);

                if let Some(ref path) = config.credential_path {
                    builder = builder.credential_path(&path.to_string_lossy());
                }

                if let Some(ref endpoint) = config.endpoint {
                    builder = builder.endpoint(endpoint);
                }

                if let Some(ref root) = config.root {
                    builder = builder.root(root);
                }

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }

            #[cfg(feature = "s3")]
            BackendType::S3 => {
                let mut builder = opendal::services::S3::default().bucket(&config.bucket);

                if let Some(ref region) = config.region {
                    builder = builder.region(region);
                }

                if let Some(ref endpoint) = config.endpoint {
                    builder = builder.endpoint(endpoint);
                }

                if let Some(ref root) = config.root {
                    builder = builder.root(root);
                }

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }

            #[cfg(feature = "fs")]
            BackendType::Fs => {
                let base = std::path::Path::new(config.root.as_deref().unwrap_or("."));
                let root = base.join(&config.bucket);
                let builder = opendal::services::Fs::default().root(&root.to_string_lossy());

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }

            #[cfg(feature = "memory")]
            BackendType::Memory => {
                let mut builder = opendal::services::Memory::default();

                if let Some(ref root) = config.root {
                    builder = builder.root(root);
                }

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }

            // Reached when the backend's feature is disabled.
            other => Err(StorageError::unsupported(other.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for StorageBackend {
    async fn put(&self, key: &str, data: Bytes) -> ktp_core::Result<StorageLocator> {
        self.write(key, data).await.map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET,
                bucket = %self.config.bucket,
                key = %key,
                error = %err,
                "Object write failed"
            );
            err.into()
        })
    }
}

impl std::fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageBackend")
            .field("backend", &self.config.backend)
            .field("bucket", &self.config.bucket)
            .finish()
    }
}
