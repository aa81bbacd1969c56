//! The `giftbox.toml` configuration file.
//!
//! ```toml
//! [store]
//! backend = "sqlite"
//! connection_string = "giftbox.db"
//!
//! [catalog]
//! path = "catalog.csv"
//!
//! [pricing]
//! card_price = 4
//! ```
//!
//! Every table is optional. A missing `[pricing]` table means the standard
//! price list; a missing `[catalog]` path means the bundled catalog.

use std::io;
use std::path::{Path, PathBuf};

use giftbox_core::PricingConfigError;
use giftbox_core::pricing::PricingConfig;
use giftbox_core::store::StoreConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// File read when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "giftbox.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid [pricing] table: {0}")]
    Pricing(#[from] PricingConfigError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// CSV file to load instead of the bundled catalog.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub catalog: CatalogConfig,
    pub pricing: PricingConfig,
}

impl AppConfig {
    /// Reads the config file.
    ///
    /// With `explicit` set, the file must exist. Otherwise
    /// [`DEFAULT_CONFIG_FILE`] is tried and its absence means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound && explicit.is_none() => {
                debug!("No {} found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config = Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        debug!(path = %path.display(), backend = %config.store.backend, "config loaded");
        Ok(config)
    }

    /// Parses and validates TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.pricing.validate()?;
        Ok(config)
    }

    /// Applies command-line overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        backend: Option<String>,
        connection_string: Option<String>,
        catalog: Option<PathBuf>,
    ) -> Self {
        if let Some(backend) = backend {
            self.store.backend = backend;
        }
        if let Some(connection_string) = connection_string {
            self.store.connection_string = connection_string;
        }
        if catalog.is_some() {
            self.catalog.path = catalog;
        }
        self
    }
}
