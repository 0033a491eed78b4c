//! CLI configuration management.
//!
//! Handles the ledger directory, default caller and deployment defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Proposal names used by `deploy` when none are given.
pub const DEFAULT_PROPOSALS: [&str; 3] = ["Proposal 1", "Proposal 2", "Proposal 3"];

/// Keys accepted by `config get` / `config set`.
pub const CONFIG_KEYS: [&str; 4] = ["data_dir", "default_account", "proposals", "log_level"];

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory holding the ledger snapshot
    pub data_dir: PathBuf,
    /// Default calling account (address or dev account index)
    pub default_account: Option<String>,
    /// Proposal names for `deploy` without arguments
    pub proposals: Vec<String>,
    /// Log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: base_dir().join("ledger"),
            default_account: None,
            proposals: DEFAULT_PROPOSALS.iter().map(|s| s.to_string()).collect(),
            log_level: "warn".to_string(),
        }
    }
}

fn base_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ballot")
}

impl CliConfig {
    /// Load configuration from the default location.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults if it does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: CliConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get configuration file path.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".ballot").join("config.toml"))
    }

    /// Read a single key as text.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data_dir" => Some(self.data_dir.display().to_string()),
            "default_account" => Some(self.default_account.clone().unwrap_or_default()),
            "proposals" => Some(self.proposals.join(",")),
            "log_level" => Some(self.log_level.clone()),
            _ => None,
        }
    }

    /// Set a single key from text. An empty `default_account` clears it;
    /// `proposals` is a comma-separated list.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "data_dir" => self.data_dir = PathBuf::from(value),
            "default_account" => {
                self.default_account = if value.is_empty() {
                    None
                } else {
                    crate::accounts::resolve_account(value)?;
                    Some(value.to_string())
                };
            }
            "proposals" => {
                let names: Vec<String> = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if names.is_empty() {
                    anyhow::bail!("At least one proposal name is required");
                }
                self.proposals = names;
            }
            "log_level" => {
                tracing_subscriber::EnvFilter::try_new(value)?;
                self.log_level = value.to_string();
            }
            _ => anyhow::bail!("Unknown config key: {} (expected one of {})", key, CONFIG_KEYS.join(", ")),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.data_dir.ends_with(".ballot/ledger"));
        assert_eq!(config.proposals, vec!["Proposal 1", "Proposal 2", "Proposal 3"]);
        assert_eq!(config.log_level, "warn");
        assert!(config.default_account.is_none());
    }

    #[test]
    fn test_get_set() {
        let mut config = CliConfig::default();
        config.set("proposals", "Yes, No ,").unwrap();
        assert_eq!(config.get("proposals").unwrap(), "Yes,No");

        config.set("default_account", "2").unwrap();
        assert_eq!(config.get("default_account").unwrap(), "2");
        config.set("default_account", "").unwrap();
        assert!(config.default_account.is_none());

        assert!(config.set("default_account", "0x12").is_err());
        assert!(config.set("proposals", " , ").is_err());
        assert!(config.set("rpc_url", "x").is_err());
        assert!(config.get("rpc_url").is_none());
    }
}
