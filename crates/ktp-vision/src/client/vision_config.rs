//! Vision client configuration.

use std::time::Duration;

use derive_builder::Builder;
use url::Url;

use crate::{Error, Result};

/// Public Vision API endpoint.
const DEFAULT_BASE_URL: &str = "https://vision.googleapis.com/";

/// Configuration for the Vision client.
///
/// Timeouts are disabled unless set; a stalled request surfaces as whatever
/// error the transport eventually reports.
#[derive(Debug, Clone, Builder)]
#[builder(
    name = "VisionConfigBuilder",
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate_config")
)]
pub struct VisionConfig {
    /// Base URL of the Vision API (or an emulator).
    #[builder(setter(custom), default = "DEFAULT_BASE_URL.to_owned()")]
    pub base_url: String,
    /// Total request timeout.
    #[builder(default)]
    pub timeout: Option<Duration>,
    /// Connection timeout.
    #[builder(default)]
    pub connect_timeout: Option<Duration>,
    /// User agent string for requests.
    #[builder(default = "VisionConfig::default_user_agent()")]
    pub user_agent: String,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            connect_timeout: None,
            user_agent: Self::default_user_agent(),
        }
    }
}

impl VisionConfig {
    /// Create a new configuration builder.
    pub fn builder() -> VisionConfigBuilder {
        VisionConfigBuilder::default()
    }

    /// Parses the base URL, making sure it ends with `/` so that relative
    /// endpoint paths are appended rather than replacing the last segment.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            Error::invalid_config(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(format!(
                "Base URL '{}' must use http or https",
                self.base_url
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }

    fn default_user_agent() -> String {
        format!("ktp-vision/{}", env!("CARGO_PKG_VERSION"))
    }
}

impl VisionConfigBuilder {
    /// Set the base URL for the Vision API.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    fn validate_config(&self) -> std::result::Result<(), String> {
        if let Some(Some(timeout)) = &self.timeout
            && timeout.is_zero()
        {
            return Err("Timeout must be greater than 0".to_string());
        }

        if let Some(Some(connect_timeout)) = &self.connect_timeout
            && connect_timeout.is_zero()
        {
            return Err("Connect timeout must be greater than 0".to_string());
        }

        if let Some(base_url) = &self.base_url {
            let config = VisionConfig {
                base_url: base_url.clone(),
                ..VisionConfig::default()
            };
            config.parsed_base_url().map_err(|e| e.to_string())?;
        }

        Ok(())
    }
}
