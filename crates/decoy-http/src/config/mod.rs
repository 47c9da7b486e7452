//! Configuration types for decoy.
//!
//! # Module Structure
//!
//! - `listen` - Listener address, admin prefix and history capacity
//! - `baseline` - Baseline primings, inline or from JSON priming files

mod baseline;
mod listen;

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::engine::EngineConfig;

pub use baseline::{load_priming_file, BaselineConfig};
pub use listen::{AdminConfig, HistoryConfig, ListenConfig, DEFAULT_ADMIN_PREFIX};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub history: HistoryConfig,

    /// JSON priming files merged into the baseline at startup, after the
    /// inline baseline and in the order listed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priming_files: Vec<PathBuf>,

    /// Primings restored on every reset
    #[serde(default)]
    pub baseline: BaselineConfig,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, anyhow::Error> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.history.capacity == 0 {
            anyhow::bail!("history.capacity must be greater than 0");
        }

        let prefix = &self.admin.prefix;
        if !prefix.starts_with('/') {
            anyhow::bail!("admin.prefix must start with '/', got '{}'", prefix);
        }
        if prefix.trim_end_matches('/').is_empty() {
            anyhow::bail!("admin.prefix cannot be '/': it would shadow every priming");
        }

        Ok(())
    }

    /// Admin prefix without a trailing slash.
    pub fn admin_prefix(&self) -> &str {
        self.admin.prefix.trim_end_matches('/')
    }

    /// Build the engine settings, reading every priming file.
    pub fn engine_config(&self) -> Result<EngineConfig, anyhow::Error> {
        let mut baseline = self.baseline.clone();
        for path in &self.priming_files {
            baseline.merge(load_priming_file(path)?);
        }
        Ok(EngineConfig {
            history_capacity: self.history.capacity,
            baseline: baseline.into_baseline(),
        })
    }
}
