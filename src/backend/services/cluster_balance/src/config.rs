use cluster_models::Network;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::services::balance_service::OperatorDeltaPolicy;
use crate::utils::errors::{Result, ServiceError};

pub const SECONDS_PER_DAY: u64 = 86_400;

const MAINNET_SUBGRAPH_URL: &str =
    "https://api.studio.thegraph.com/query/71118/ssv-network-ethereum/version/latest";
const HOLESKY_SUBGRAPH_URL: &str =
    "https://api.studio.thegraph.com/query/71118/ssv-network-holesky/version/latest";
const MAINNET_DAO_ADDRESS: &str = "0xdd9bc35ae942ef0cfa76930954a156b3ff30a4e1";
const HOLESKY_DAO_ADDRESS: &str = "0x38A4794cCEd47d3baf7370CcC43B560D3a1beEFA";

/// Where and how to reach one network's indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// GraphQL endpoint of the network's subgraph
    pub subgraph_url: Url,
    /// Entity id of the DAO values record
    pub dao_address: String,
    /// Average block time, used to turn runway blocks into days
    pub average_block_time_secs: u64,
}

impl NetworkConfig {
    pub fn default_for(network: Network) -> Self {
        let (url, dao_address) = match network {
            Network::Mainnet => (MAINNET_SUBGRAPH_URL, MAINNET_DAO_ADDRESS),
            Network::Holesky => (HOLESKY_SUBGRAPH_URL, HOLESKY_DAO_ADDRESS),
        };
        Self {
            subgraph_url: Url::parse(url).expect("invalid default subgraph URL"),
            dao_address: dao_address.to_string(),
            average_block_time_secs: 12,
        }
    }

    pub fn blocks_per_day(&self) -> f64 {
        SECONDS_PER_DAY as f64 / self.average_block_time_secs as f64
    }

    pub fn validate(&self) -> Result<()> {
        if self.average_block_time_secs == 0 {
            return Err(ServiceError::Validation(
                "average_block_time_secs must be positive".to_string(),
            ));
        }
        if self.dao_address.trim().is_empty() {
            return Err(ServiceError::Validation("dao_address is empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworksConfig {
    pub mainnet: NetworkConfig,
    pub holesky: NetworkConfig,
}

impl Default for NetworksConfig {
    fn default() -> Self {
        Self {
            mainnet: NetworkConfig::default_for(Network::Mainnet),
            holesky: NetworkConfig::default_for(Network::Holesky),
        }
    }
}

impl NetworksConfig {
    pub fn get(&self, network: Network) -> &NetworkConfig {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Holesky => &self.holesky,
        }
    }
}

/// Tuning of the estimation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// How per-operator accruals are combined
    pub operator_delta_policy: OperatorDeltaPolicy,
    /// Upper bound for a single indexer request
    pub request_timeout_secs: u64,
    /// Per-cluster fetches allowed in flight at once
    pub max_concurrent_fetches: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            operator_delta_policy: OperatorDeltaPolicy::default(),
            request_timeout_secs: 30,
            max_concurrent_fetches: 4,
        }
    }
}

impl EstimatorConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(ServiceError::Validation(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.max_concurrent_fetches == 0 {
            return Err(ServiceError::Validation(
                "max_concurrent_fetches must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration shared by the server and the CLI.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub networks: NetworksConfig,
    pub estimator: EstimatorConfig,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        for network in Network::ALL {
            self.networks.get(network).validate()?;
        }
        self.estimator.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_networks() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.networks.get(Network::Mainnet).blocks_per_day(), 7200.0);
        assert!(config
            .networks
            .get(Network::Holesky)
            .subgraph_url
            .as_str()
            .ends_with("ssv-network-holesky/version/latest"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ServiceConfig = serde_json::from_value(serde_json::json!({
            "estimator": { "operator_delta_policy": "clamp_per_operator" }
        }))
        .unwrap();

        assert_eq!(
            config.estimator.operator_delta_policy,
            OperatorDeltaPolicy::ClampPerOperator
        );
        assert_eq!(config.estimator.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.networks, NetworksConfig::default());
    }

    #[test]
    fn test_rejects_zero_block_time() {
        let mut config = ServiceConfig::default();
        config.networks.holesky.average_block_time_secs = 0;
        assert!(matches!(config.validate(), Err(ServiceError::Validation(_))));
    }
}
