//! Rawat configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RawatError, Result};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawatConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub wa: WaConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for RawatConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            wa: WaConfig::default(),
            dispatch: DispatchConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl RawatConfig {
    /// Load config from the default path (~/.rawat/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RawatError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| RawatError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| RawatError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rawat")
            .join("config.toml")
    }

    /// Get the Rawat home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rawat")
    }
}

/// HTTP gateway (server) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 { 3000 }
fn default_host() -> String { "127.0.0.1".into() }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// WhatsApp API service (outbound client) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaConfig {
    #[serde(default = "default_wa_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds. A timed-out send counts as a
    /// delivery failure, identical to any other gateway error.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_wa_base_url() -> String { "http://localhost:3920/api".into() }
fn default_request_timeout() -> u64 { 30 }

impl Default for WaConfig {
    fn default() -> Self {
        Self {
            base_url: default_wa_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Daily dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Local wall-clock hour of the daily send.
    #[serde(default = "default_send_hour")]
    pub send_hour: u32,
    /// Local wall-clock minute of the daily send.
    #[serde(default)]
    pub send_minute: u32,
    /// IANA timezone name for the civil day and the daily trigger.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Lower bound of the randomized inter-message delay (seconds).
    #[serde(default = "default_delay_min")]
    pub delay_min_secs: u64,
    /// Upper bound of the randomized inter-message delay (seconds).
    #[serde(default = "default_delay_max")]
    pub delay_max_secs: u64,
}

fn default_send_hour() -> u32 { 7 }
fn default_timezone() -> String { "Asia/Jakarta".into() }
fn default_delay_min() -> u64 { 1 }
fn default_delay_max() -> u64 { 10 }

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            send_hour: default_send_hour(),
            send_minute: 0,
            timezone: default_timezone(),
            delay_min_secs: default_delay_min(),
            delay_max_secs: default_delay_max(),
        }
    }
}

/// Local storage (group config + message log) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database path. Empty = `~/.rawat/rawat.db`.
    #[serde(default)]
    pub db_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { db_path: String::new() }
    }
}

impl StoreConfig {
    /// Resolve the database path, falling back to the Rawat home dir.
    pub fn resolved_db_path(&self) -> PathBuf {
        if self.db_path.is_empty() {
            RawatConfig::home_dir().join("rawat.db")
        } else {
            PathBuf::from(&self.db_path)
        }
    }
}
