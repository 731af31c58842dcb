//! Layered configuration for the naturalist picker.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (include_str! from naturalist.toml)
//! 2. User config in home directory (~/.config/naturalist/naturalist.toml)
//! 3. User config in current directory (./naturalist.toml)
//! 4. `NATURALIST_<SECTION>__<KEY>` environment variables

use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use config::builder::DefaultState;
use derive_getters::Getters;
use naturalist_core::TaxonGroup;
use naturalist_error::{ConfigError, ConfigErrorKind, NaturalistResult};
use naturalist_inat::CatalogConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../naturalist.toml");

/// Top-level naturalist configuration.
///
/// The eviction period is fixed at 24 hours and is not configurable.
///
/// # Example
///
/// ```no_run
/// use naturalist_bot::NaturalistConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = NaturalistConfig::load()?;
/// assert_eq!(config.group_label("birdpic").as_deref(), Some("Aves"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct NaturalistConfig {
    /// Catalog client settings
    #[serde(default)]
    catalog: CatalogConfig,

    /// Extra command aliases mapped to catalog taxon labels
    #[serde(default)]
    groups: BTreeMap<String, String>,
}

impl NaturalistConfig {
    /// Load configuration from every layer.
    ///
    /// User files are optional and skipped when missing.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a present source is malformed or a
    /// value is out of range.
    #[instrument]
    pub fn load() -> NaturalistResult<Self> {
        debug!("Loading configuration: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/naturalist/naturalist.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("naturalist").required(false))
            .add_source(
                Environment::with_prefix("NATURALIST")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::finish(builder)
    }

    /// Load configuration from a specific file layered over the bundled
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file is missing, malformed or
    /// holds out-of-range values.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> NaturalistResult<Self> {
        debug!("Loading configuration from file");
        let builder = Self::defaults().add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> NaturalistResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Load(e.to_string())))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))?;
        config.validate()?;
        debug!(
            base_url = config.catalog.base_url().as_str(),
            extra_groups = config.groups.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid catalog section or an
    /// alias that maps to an empty label.
    pub fn validate(&self) -> NaturalistResult<()> {
        self.catalog.validate()?;
        if let Some((alias, _)) = self.groups.iter().find(|(_, label)| label.trim().is_empty()) {
            return Err(ConfigError::invalid(format!("groups.{}", alias), "label is empty").into());
        }
        Ok(())
    }

    /// Catalog label for a command group name.
    ///
    /// Accepts `bird`, `birdpic`, `Aves` and configured aliases such as
    /// `spider`, case-insensitively. Configured aliases win over built-in
    /// groups.
    pub fn group_label(&self, name: &str) -> Option<String> {
        let name = name.trim().to_lowercase();
        let alias = name.strip_suffix("pic").unwrap_or(&name);
        if let Some((_, label)) = self
            .groups
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(alias))
        {
            return Some(label.clone());
        }
        name.parse::<TaxonGroup>()
            .ok()
            .map(|group| group.label().to_string())
    }
}
