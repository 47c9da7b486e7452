//! Listener, admin API and history configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ADMIN_PREFIX: &str = "/__admin";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ListenConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Admin API mount point. Requests under the prefix never reach the primings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_prefix")]
    pub prefix: String,
}

fn default_admin_prefix() -> String {
    DEFAULT_ADMIN_PREFIX.to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            prefix: default_admin_prefix(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Exchanges (and failed requests) retained before the oldest is evicted
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    crate::engine::DEFAULT_HISTORY_CAPACITY
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}
