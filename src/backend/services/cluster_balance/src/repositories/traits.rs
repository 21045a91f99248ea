use async_trait::async_trait;
use cluster_models::{Address, BlockNumber, ClusterKey, OperatorId, SnapshotBundle};

use crate::utils::errors::Result;

/// Read access to one network's indexer.
#[async_trait]
pub trait IndexerRepository: Send + Sync {
    /// Latest block the indexer has processed.
    async fn current_block(&self) -> Result<BlockNumber>;

    /// Operator sets of the account's active clusters, each in on-chain order.
    async fn active_clusters(&self, account: &Address) -> Result<Vec<Vec<OperatorId>>>;

    /// DAO values, operator fees and cluster record, all as of `block`.
    async fn snapshot_bundle(&self, key: &ClusterKey, block: BlockNumber) -> Result<SnapshotBundle>;
}
