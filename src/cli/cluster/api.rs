use anyhow::{Context, Result};
use cluster_balance::{DiscoveryService, GraphIndexer, OperatorDeltaPolicy};

use crate::config::Config;

/// Subgraph-backed estimator built from the CLI configuration.
pub fn discovery_service(
    config: &Config,
    clamp_operator_deltas: bool,
) -> Result<DiscoveryService<GraphIndexer>> {
    let mut service_config = config.service_config();
    if clamp_operator_deltas {
        service_config.estimator.operator_delta_policy = OperatorDeltaPolicy::ClampPerOperator;
    }
    DiscoveryService::from_config(&service_config).context("invalid estimator configuration")
}
