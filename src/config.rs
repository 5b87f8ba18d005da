//! Configuration Management
//!
//! Optional settings file for mprov. Command-line flags and environment
//! variables win over anything in here.

use crate::error::{ProvisionError, Result};
use crate::meraki::client::DEFAULT_BASE_URL;
use crate::poll::PollPolicy;
use crate::provision::networks::ExistingNetworkPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Organization used when none is given, matching the public DevNet sandbox
pub const DEFAULT_ORG_NAME: &str = "DevNet Sandbox";

/// Directory camera snapshots are written to by default
pub const DEFAULT_SNAPSHOT_DIR: &str = "camera_snapshots";

/// User configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Dashboard API root
    #[serde(default)]
    pub base_url: Option<String>,
    /// Organization for commands that take only a network name
    #[serde(default)]
    pub org_name: Option<String>,
    /// Where snapshots are saved
    #[serde(default)]
    pub snapshot_dir: Option<PathBuf>,
    /// What to do when a network in the batch already exists
    #[serde(default)]
    pub on_existing_network: Option<ExistingNetworkPolicy>,
    #[serde(default = "PollPolicy::webhook_default")]
    pub webhook_poll: PollPolicy,
    #[serde(default = "PollPolicy::snapshot_default")]
    pub snapshot_poll: PollPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            org_name: None,
            snapshot_dir: None,
            on_existing_network: None,
            webhook_poll: PollPolicy::webhook_default(),
            snapshot_poll: PollPolicy::snapshot_default(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mprov").join("config.json"))
    }

    /// Load configuration.
    ///
    /// An explicitly requested file must exist and parse. The default file
    /// is optional; if it is unreadable the defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let content = std::fs::read_to_string(path).map_err(|e| ProvisionError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            return Self::parse(path, &content);
        }

        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        match std::fs::read_to_string(&path).map_err(ProvisionError::from).and_then(|c| Self::parse(&path, &c)) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                Ok(Self::default())
            }
        }
    }

    fn parse(path: &Path, content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| ProvisionError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get effective base URL (CLI/env > config > default)
    pub fn effective_base_url(&self, cli: Option<String>) -> String {
        cli.or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Get effective organization (CLI/env > config > DevNet default)
    pub fn effective_org_name(&self, cli: Option<String>) -> String {
        cli.or_else(|| self.org_name.clone())
            .unwrap_or_else(|| DEFAULT_ORG_NAME.to_string())
    }

    /// Get effective snapshot directory (CLI > config > default)
    pub fn effective_snapshot_dir(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.snapshot_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_DIR))
    }

    /// Get effective existing-network policy (CLI > config > stop)
    pub fn effective_existing_policy(&self, cli: Option<ExistingNetworkPolicy>) -> ExistingNetworkPolicy {
        cli.or(self.on_existing_network).unwrap_or_default()
    }
}
