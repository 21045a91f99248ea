use async_trait::async_trait;
use cluster_models::{Address, BlockNumber, ClusterKey, Network, OperatorId, SnapshotBundle};
use reqwest::Client;
use serde_json::{json, Map, Value};

use super::dto::{ActiveClustersData, CurrentBlockData, SnapshotData};
use super::subgraph_client::SubgraphClient;
use crate::config::NetworkConfig;
use crate::repositories::traits::IndexerRepository;
use crate::utils::errors::Result;

const CURRENT_BLOCK_QUERY: &str = r#"
    query CurrentBlock {
        _meta {
            block {
                number
            }
        }
    }
"#;

const ACTIVE_CLUSTERS_QUERY: &str = r#"
    query ActiveClusters($account: ID!) {
        account(id: $account) {
            clusters(where: { active: true }) {
                operatorIds
            }
        }
    }
"#;

const CLUSTER_SNAPSHOT_QUERY: &str = r#"
    query ClusterSnapshot($block: Int!, $dao: ID!, $operatorIds: [ID!]!, $cluster: ID!) {
        daovalues(id: $dao, block: { number: $block }) {
            networkFee
            networkFeeIndex
            networkFeeIndexBlockNumber
            liquidationThreshold
            minimumLiquidationCollateral
        }
        operators(block: { number: $block }, where: { id_in: $operatorIds }) {
            id
            fee
            feeIndex
            feeIndexBlockNumber
        }
        cluster(id: $cluster, block: { number: $block }) {
            validatorCount
            networkFeeIndex
            index
            balance
        }
    }
"#;

/// [`IndexerRepository`] backed by the SSV network subgraph.
pub struct GraphIndexer {
    network: Network,
    client: SubgraphClient,
    dao_address: String,
}

impl GraphIndexer {
    pub fn new(network: Network, config: &NetworkConfig, client: Client) -> Self {
        Self {
            network,
            client: SubgraphClient::new(config.subgraph_url.clone(), client),
            dao_address: config.dao_address.clone(),
        }
    }
}

fn variables(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

#[async_trait]
impl IndexerRepository for GraphIndexer {
    async fn current_block(&self) -> Result<BlockNumber> {
        let data: CurrentBlockData = self.client.query(CURRENT_BLOCK_QUERY, None).await?;
        Ok(data.meta.block.number)
    }

    async fn active_clusters(&self, account: &Address) -> Result<Vec<Vec<OperatorId>>> {
        let data: ActiveClustersData = self
            .client
            .query(
                ACTIVE_CLUSTERS_QUERY,
                variables(json!({ "account": account.as_str() })),
            )
            .await?;
        Ok(data.into_memberships())
    }

    async fn snapshot_bundle(&self, key: &ClusterKey, block: BlockNumber) -> Result<SnapshotBundle> {
        let operator_ids: Vec<String> = key.operator_ids.iter().map(|id| id.to_string()).collect();
        let data: SnapshotData = self
            .client
            .query(
                CLUSTER_SNAPSHOT_QUERY,
                variables(json!({
                    "block": block,
                    "dao": self.dao_address,
                    "operatorIds": operator_ids,
                    "cluster": key.cluster_id().as_str(),
                })),
            )
            .await?;

        tracing::debug!(
            network = %self.network,
            cluster = %key.cluster_id(),
            block,
            "fetched cluster snapshot"
        );
        data.into_bundle(key, block)
    }
}
