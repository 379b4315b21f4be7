use crate::address::AddressSet;
use crate::error::{Result, StoreCtlError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_CONFIG_FILE: &str = "storectl.toml";

/// Main configuration structure loaded from storectl.toml and environment variables
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Storage servers addressed by each invocation
    pub hostlist: Vec<String>,
    /// Port appended to host list entries that carry none
    pub default_port: u16,
    pub output: OutputConfig,
}

/// Presentation settings for rendered reports
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Emit JSON instead of text listings
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hostlist: vec![format!("localhost:{}", DEFAULT_PORT)],
            default_port: DEFAULT_PORT,
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables.
    ///
    /// The file comes from `path`, then STORECTL_CONFIG, then "storectl.toml".
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Ok(env_path) = std::env::var("STORECTL_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::dotenv();
        }

        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => std::env::var("STORECTL_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE)),
        };

        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(content) => toml::from_str(&content).map_err(|e| StoreCtlError::Config {
                message: format!("{}: {}", config_path.display(), e),
            })?,
            Err(_) => {
                tracing::warn!(
                    "Config file {} not found, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        };

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Env-first overrides for the host list, port and output mode
    fn apply_env(&mut self) {
        if let Ok(hosts) = std::env::var("STORECTL_HOSTLIST") {
            self.hostlist = hosts
                .split(',')
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .collect();
            tracing::debug!("STORECTL_HOSTLIST env override applied");
        }

        if let Ok(port) = std::env::var("STORECTL_PORT") {
            match port.parse::<u16>() {
                Ok(p) => {
                    self.default_port = p;
                    tracing::debug!("STORECTL_PORT env override applied");
                }
                Err(_) => tracing::warn!("Ignoring invalid STORECTL_PORT '{}'", port),
            }
        }

        if let Ok(json) = std::env::var("STORECTL_JSON") {
            self.output.json = json == "1" || json.eq_ignore_ascii_case("true");
        }
    }

    pub fn validate(&mut self) -> Result<()> {
        if self.default_port == 0 {
            return Err(StoreCtlError::Config {
                message: "default_port must be non-zero".into(),
            });
        }

        if self.hostlist.is_empty() {
            tracing::warn!(
                "Empty hostlist, falling back to localhost:{}",
                self.default_port
            );
            self.hostlist = vec![format!("localhost:{}", self.default_port)];
        }

        Ok(())
    }

    /// Target set built from the host list
    pub fn addresses(&self) -> Result<AddressSet> {
        AddressSet::parse_hostlist(&self.hostlist.join(","), self.default_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_port, 10000);
        assert!(!config.output.json);
        assert_eq!(config.addresses().unwrap().to_string(), "[localhost:10000]");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("hostlist = [\"node1\", \"node2:10001\"]").unwrap();
        assert_eq!(config.default_port, DEFAULT_PORT);
        assert_eq!(
            config.addresses().unwrap().to_string(),
            "[node1:10000 node2:10001]"
        );
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config {
            default_port: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StoreCtlError::Config { .. })
        ));
    }

    #[test]
    fn test_validate_fills_empty_hostlist() {
        let mut config = Config {
            hostlist: vec![],
            default_port: 9000,
            output: OutputConfig::default(),
        };
        config.validate().unwrap();
        assert_eq!(config.hostlist, vec!["localhost:9000".to_string()]);
    }
}
