//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Default byte budget for the served group (64 MiB)
const DEFAULT_CACHE_BYTES: usize = 64 * 1024 * 1024;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the group registered at startup
    pub group_name: String,
    /// Byte budget of that group, 0 = unbounded
    pub cache_bytes: usize,
    /// Directory the group's loader reads values from
    pub data_dir: PathBuf,
    /// HTTP server port
    pub server_port: u16,
    /// Statistics reporting interval in seconds
    pub stats_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `GROUP_NAME` - Group registered at startup (default: assets)
    /// - `CACHE_BYTES` - Byte budget of the group (default: 64 MiB)
    /// - `DATA_DIR` - Loader root directory (default: ./data)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STATS_INTERVAL` - Stats reporting frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            group_name: env::var("GROUP_NAME")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.group_name),
            cache_bytes: parse_var("CACHE_BYTES").unwrap_or(defaults.cache_bytes),
            data_dir: env::var("DATA_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            stats_interval: parse_var("STATS_INTERVAL").unwrap_or(defaults.stats_interval),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            group_name: "assets".to_string(),
            cache_bytes: DEFAULT_CACHE_BYTES,
            data_dir: PathBuf::from("./data"),
            server_port: 3000,
            stats_interval: 60,
        }
    }
}
