//! Layered configuration for the clustering binary.
//!
//! Configuration is loaded with precedence: CLI args > Env vars > Config file > Defaults
//!
//! # Example config file (bigcluster.toml)
//! ```toml
//! input = "data/clustering_big.txt"
//! min_spacing = 3
//! parallel = true
//! dedup_edges = false
//! log_filter = "info"
//! ```

mod defaults;

pub use defaults::*;

use crate::edges::DiscoveryOptions;
use crate::error::{ClusterError, ClusterResult};
use crate::model::Cost;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Node file to read
    pub input: PathBuf,
    /// Minimum Hamming spacing between clusters
    pub min_spacing: Cost,
    /// Run neighbor generation in parallel
    pub parallel: bool,
    /// Record only one orientation per edge
    pub dedup_edges: bool,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            min_spacing: DEFAULT_MIN_SPACING,
            parallel: DEFAULT_PARALLEL,
            dedup_edges: DEFAULT_DEDUP_EDGES,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClusterConfig {
    /// Load configuration with precedence: CLI args > Env > File > Defaults
    ///
    /// # Arguments
    /// * `config_path` - Optional path to TOML config file
    /// * `overrides` - CLI overrides to apply on top
    pub fn load(
        config_path: Option<&str>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(ClusterConfig::default()));

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));
        figment = figment.merge(Serialized::defaults(overrides));

        figment.extract().map_err(ConfigError::from)
    }

    /// Load from environment and optional config file only (no CLI overrides)
    pub fn from_env(config_path: Option<&str>) -> Result<Self, ConfigError> {
        Self::load(config_path, ConfigOverrides::default())
    }

    /// Reject settings the clustering engine cannot run with.
    pub fn validate(&self) -> ClusterResult<()> {
        if self.min_spacing == 0 {
            return Err(ClusterError::InvalidSpacing {
                min_spacing: self.min_spacing,
            });
        }
        Ok(())
    }

    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            parallel: self.parallel,
            dedup: self.dedup_edges,
        }
    }
}

/// CLI overrides that take precedence over file and env config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_spacing: Option<Cost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedup_edges: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

/// Configuration error.
#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self {
            message: e.to_string(),
        }
    }
}
