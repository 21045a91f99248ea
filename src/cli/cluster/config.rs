use cluster_balance::{EstimatorConfig, NetworksConfig, ServiceConfig};
use cluster_models::Network;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Configuration for the cluster CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Network used when `--network` is not given
    pub default_network: Network,
    /// Indexer endpoints per network
    pub networks: NetworksConfig,
    /// Estimation and fetch settings
    pub estimator: EstimatorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_network: Network::Mainnet,
            networks: NetworksConfig::default(),
            estimator: EstimatorConfig::default(),
        }
    }
}

impl Config {
    /// Default location, `<config dir>/ssv-cluster/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_default()
            .join("ssv-cluster")
            .join("config.toml")
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self, io::Error> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from `path`, writing the defaults there first if
    /// the file does not exist yet
    pub fn load_from(path: &Path) -> Result<Self, io::Error> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        let config_str = fs::read_to_string(path)?;
        toml::from_str::<Config>(&config_str).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), io::Error> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let toml = toml::to_string_pretty(self).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(path, toml)
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            networks: self.networks.clone(),
            estimator: self.estimator.clone(),
        }
    }
}
