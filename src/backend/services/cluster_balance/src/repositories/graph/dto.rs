//! Raw shapes returned by the SSV network subgraph.
//!
//! Integer fields arrive either as decimal strings (`BigInt`) or as JSON
//! numbers (`Int`); both are parsed without going through floating point.

use cluster_models::{
    Amount, BlockNumber, ClusterKey, ClusterSnapshot, DaoParameters, FeeSnapshot, OperatorFee,
    OperatorId, PackedIndex, SnapshotBundle,
};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use std::collections::HashMap;

use crate::utils::errors::{Result, ServiceError};

#[derive(Debug, Deserialize)]
pub struct CurrentBlockData {
    #[serde(rename = "_meta")]
    pub meta: Meta,
}

#[derive(Debug, Deserialize)]
pub struct Meta {
    pub block: MetaBlock,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct MetaBlock {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub number: u64,
}

#[derive(Debug, Deserialize)]
pub struct ActiveClustersData {
    pub account: Option<AccountData>,
}

#[derive(Debug, Deserialize)]
pub struct AccountData {
    pub clusters: Vec<ClusterMembership>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterMembership {
    #[serde_as(as = "Vec<PickFirst<(_, DisplayFromStr)>>")]
    pub operator_ids: Vec<u64>,
}

impl ActiveClustersData {
    pub fn into_memberships(self) -> Vec<Vec<OperatorId>> {
        self.account
            .map(|account| {
                account
                    .clusters
                    .into_iter()
                    .map(|cluster| cluster.operator_ids.into_iter().map(OperatorId).collect())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct SnapshotData {
    pub daovalues: Option<DaoValues>,
    #[serde(default)]
    pub operators: Vec<Operator>,
    pub cluster: Option<Cluster>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaoValues {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub network_fee: i128,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub network_fee_index: i128,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub network_fee_index_block_number: u64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub liquidation_threshold: u64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub minimum_liquidation_collateral: i128,
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: u64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub fee: i128,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub fee_index: i128,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub fee_index_block_number: u64,
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub validator_count: u32,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub network_fee_index: i128,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub index: i128,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub balance: i128,
}

impl SnapshotData {
    /// Validates the response against the requested cluster and converts it
    /// into domain records, operators ordered like `key.operator_ids`.
    pub fn into_bundle(self, key: &ClusterKey, block: BlockNumber) -> Result<SnapshotBundle> {
        let dao = self.daovalues.ok_or_else(|| {
            ServiceError::MalformedResponse("DAO values not found".to_string())
        })?;
        let cluster = self.cluster.ok_or_else(|| {
            ServiceError::MalformedResponse(format!("cluster {} not found", key.cluster_id()))
        })?;

        let by_id: HashMap<u64, Operator> = self
            .operators
            .into_iter()
            .map(|operator| (operator.id, operator))
            .collect();
        let operators = key
            .operator_ids
            .iter()
            .map(|id| {
                by_id
                    .get(&id.0)
                    .map(|operator| OperatorFee {
                        id: *id,
                        snapshot: FeeSnapshot {
                            rate_per_block: Amount(operator.fee),
                            index_at_snapshot: Amount(operator.fee_index),
                            block_at_snapshot: operator.fee_index_block_number,
                        },
                    })
                    .ok_or_else(|| {
                        ServiceError::MalformedResponse(format!("operator {} not found", id))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SnapshotBundle {
            block,
            dao: DaoParameters {
                minimum_liquidation_collateral: Amount(dao.minimum_liquidation_collateral),
                liquidation_threshold_blocks: dao.liquidation_threshold,
            },
            network_fee: FeeSnapshot {
                rate_per_block: Amount(dao.network_fee),
                index_at_snapshot: Amount(dao.network_fee_index),
                block_at_snapshot: dao.network_fee_index_block_number,
            },
            operators,
            cluster: ClusterSnapshot {
                validator_count: cluster.validator_count,
                network_fee_index: PackedIndex(cluster.network_fee_index),
                operator_fee_index: PackedIndex(cluster.index),
                stored_balance: Amount(cluster.balance),
            },
        })
    }
}
