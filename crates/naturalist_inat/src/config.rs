//! Catalog client configuration.

use derive_builder::Builder;
use derive_getters::Getters;
use naturalist_error::{ConfigError, NaturalistResult};
use serde::{Deserialize, Serialize};

/// Settings for the iNaturalist HTTP client.
///
/// # Example
///
/// ```toml
/// [catalog]
/// base_url = "https://api.inaturalist.org/v1"
/// timeout_secs = 20
/// requests_per_minute = 60
/// locale = "en"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into), default)]
pub struct CatalogConfig {
    /// API root, without trailing slash
    #[serde(default = "default_base_url")]
    base_url: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    user_agent: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// Outbound request budget; zero disables throttling
    #[serde(default = "default_requests_per_minute")]
    requests_per_minute: u32,

    /// Locale for common names (e.g., "en", "fr")
    #[serde(default)]
    locale: Option<String>,
}

fn default_base_url() -> String {
    "https://api.inaturalist.org/v1".to_string()
}

fn default_user_agent() -> String {
    format!("naturalist/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_requests_per_minute() -> u32 {
    60
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            requests_per_minute: default_requests_per_minute(),
            locale: None,
        }
    }
}

impl CatalogConfig {
    /// Creates a new builder seeded with defaults.
    pub fn builder() -> CatalogConfigBuilder {
        CatalogConfigBuilder::default()
    }

    /// Check ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an empty or non-HTTP base URL or a
    /// zero timeout.
    pub fn validate(&self) -> NaturalistResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "catalog.base_url",
                format!("expected an http(s) URL, got '{}'", self.base_url),
            )
            .into());
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("catalog.timeout_secs", "must be at least 1").into());
        }
        Ok(())
    }
}
