use cluster_models::{Address, BlockNumber, ClusterKey, Network, OperatorId};
use futures::{stream, StreamExt};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, info, instrument, warn};

use crate::config::{EstimatorConfig, ServiceConfig};
use crate::models::estimate::{BatchReport, ClusterEstimate, ClusterOutcome};
use crate::repositories::{
    graph::{subgraph_client::http_client, GraphIndexer},
    traits::IndexerRepository,
};
use crate::services::cluster_service::ClusterService;
use crate::utils::errors::{Result, ServiceError};

/// Finds an account's clusters and estimates each of them.
pub struct DiscoveryService<R> {
    repositories: BTreeMap<Network, Arc<R>>,
    cluster_service: ClusterService,
    config: EstimatorConfig,
}

impl<R: IndexerRepository> DiscoveryService<R> {
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            repositories: BTreeMap::new(),
            cluster_service: ClusterService::new(config.operator_delta_policy),
            config,
        }
    }

    pub fn with_network(mut self, network: Network, repository: Arc<R>) -> Self {
        self.repositories.insert(network, repository);
        self
    }

    /// Estimates every active cluster of `account`.
    ///
    /// The chain height is read once and every cluster is evaluated at it.
    /// A failing cluster is recorded in its outcome and does not stop the
    /// others; only failing to read the height or the memberships fails the
    /// whole call.
    #[instrument(skip(self, account), fields(account = %account))]
    pub async fn discover_and_estimate(
        &self,
        account: &Address,
        network: Network,
    ) -> Result<BatchReport> {
        let repository: &R = self.repository(network)?;

        let block = self.fetch(repository.current_block()).await?;
        let memberships = self.fetch(repository.active_clusters(account)).await?;
        info!(%network, block, clusters = memberships.len(), "estimating clusters");

        let outcomes: Vec<ClusterOutcome> = stream::iter(memberships)
            .map(|operator_ids| async move {
                let key = ClusterKey {
                    owner: account.clone(),
                    operator_ids,
                };
                let result = self.estimate_at(repository, &key, block).await;
                if let Err(err) = &result {
                    warn!(cluster = %key.cluster_id(), error = %err, "cluster estimation failed");
                }
                ClusterOutcome { key, result }
            })
            .buffered(self.config.max_concurrent_fetches.max(1))
            .collect()
            .await;

        let report = BatchReport {
            account: account.clone(),
            network,
            block,
            outcomes,
        };
        info!(
            estimated = report.estimates().count(),
            failed = report.failures().count(),
            "batch finished"
        );
        Ok(report)
    }

    /// Estimates a single cluster given its owner and operator set.
    #[instrument(skip(self, account), fields(account = %account))]
    pub async fn estimate_cluster(
        &self,
        account: &Address,
        operator_ids: &[OperatorId],
        network: Network,
    ) -> Result<ClusterEstimate> {
        let repository: &R = self.repository(network)?;
        let key = ClusterKey::new(account.clone(), operator_ids.to_vec())?;

        let block = self.fetch(repository.current_block()).await?;
        self.estimate_at(repository, &key, block).await
    }

    async fn estimate_at(
        &self,
        repository: &R,
        key: &ClusterKey,
        block: BlockNumber,
    ) -> Result<ClusterEstimate> {
        let bundle = self.fetch(repository.snapshot_bundle(key, block)).await?;
        let estimate = self.cluster_service.estimate(key, &bundle)?;
        debug!(
            cluster = %estimate.cluster_id,
            balance = %estimate.balance.balance,
            runway = ?estimate.runway.runway,
            "cluster estimated"
        );
        Ok(estimate)
    }

    async fn fetch<T, F>(&self, request: F) -> Result<T>
    where
        F: std::future::Future<Output = Result<T>>,
    {
        let timeout = self.config.request_timeout();
        tokio::time::timeout(timeout, request)
            .await
            .map_err(|_| ServiceError::Timeout(timeout))?
    }

    fn repository(&self, network: Network) -> Result<&Arc<R>> {
        self.repositories
            .get(&network)
            .ok_or_else(|| ServiceError::Validation(format!("network {} is not configured", network)))
    }
}

impl DiscoveryService<GraphIndexer> {
    /// Service with a subgraph-backed repository for every network in `config`.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;
        let client = http_client(config.estimator.request_timeout())?;

        Ok(Network::ALL
            .into_iter()
            .fold(Self::new(config.estimator.clone()), |service, network| {
                let indexer = GraphIndexer::new(network, config.networks.get(network), client.clone());
                service.with_network(network, Arc::new(indexer))
            }))
    }
}
