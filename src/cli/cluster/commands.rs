use anyhow::Result;
use cluster_balance::{BatchView, ClusterReport, DiscoveryService, GraphIndexer};
use cluster_models::{Address, Network, OperatorId};

use crate::{config::Config, output};

/// Commands for cluster estimation
pub struct ClusterCommands;

impl ClusterCommands {
    /// Estimate every active cluster of an account
    pub async fn account_clusters(
        service: &DiscoveryService<GraphIndexer>,
        config: &Config,
        account: &Address,
        network: Network,
        json: bool,
    ) -> Result<()> {
        let report = service.discover_and_estimate(account, network).await?;
        let view = BatchView::from_report(&report, config.networks.get(network));

        if json {
            println!("{}", serde_json::to_string_pretty(&view)?);
        } else {
            print!("{}", output::render_batch(&view));
        }
        Ok(())
    }

    /// Estimate one cluster given its operator ids
    pub async fn cluster(
        service: &DiscoveryService<GraphIndexer>,
        config: &Config,
        account: &Address,
        operator_ids: &[OperatorId],
        network: Network,
        json: bool,
    ) -> Result<()> {
        let estimate = service
            .estimate_cluster(account, operator_ids, network)
            .await?;
        let report = ClusterReport::from_estimate(&estimate, config.networks.get(network));

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", output::render_cluster(&report));
        }
        Ok(())
    }
}
