//! Harness configuration loading

use crate::error::{HarnessError, Result};
use crate::probe::DEFAULT_PROBE_COMMAND;
use crate::store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use stevedore_core::types::RetryPolicy;

/// Configuration file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["stevedore.yaml", "stevedore.yml"];

/// Top-level harness configuration
///
/// Every field has a default, so an absent or empty file yields a fully
/// usable configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HarnessConfig {
    /// Coordination-store container settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Retry policy for liveness probing
    #[serde(default)]
    pub retry: RetryPolicy,

    /// Command executed by the liveness probe
    #[serde(default = "default_probe_command")]
    pub probe_command: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            retry: RetryPolicy::default(),
            probe_command: default_probe_command(),
        }
    }
}

fn default_probe_command() -> String {
    DEFAULT_PROBE_COMMAND.to_string()
}

impl HarnessConfig {
    /// Load configuration from the specified path or search for it
    ///
    /// With an explicit path, a missing file is an error. Without one,
    /// the current directory is searched for `stevedore.yaml` /
    /// `stevedore.yml`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(p) => fs::read_to_string(p).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    HarnessError::config_not_found(p.display().to_string())
                } else {
                    HarnessError::Io(e)
                }
            })?,
            None => Self::find_config()?,
        };

        Ok(serde_yaml_ng::from_str(&content)?)
    }

    fn find_config() -> Result<String> {
        for name in CONFIG_FILE_NAMES {
            let candidate = Path::new(name);
            if candidate.exists() {
                return Ok(fs::read_to_string(candidate)?);
            }
        }

        Err(HarnessError::config_not_found(CONFIG_FILE_NAMES.join(" or ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.probe_command, "docker ps");
        assert_eq!(config.retry.max_retries, 10);
        assert_eq!(config.store.container_name, "etcd");
    }

    #[test]
    fn test_empty_yaml_yields_defaults() {
        let config: HarnessConfig = serde_yaml_ng::from_str("{}").unwrap();
        assert_eq!(config.probe_command, "docker ps");
        assert_eq!(config.store.cluster_token, "etcd-cluster-2");
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = HarnessConfig {
            probe_command: "docker info".to_string(),
            ..HarnessConfig::default()
        };

        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        assert!(yaml.contains("probe-command: docker info"));

        let back: HarnessConfig = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(back.probe_command, "docker info");
    }
}
