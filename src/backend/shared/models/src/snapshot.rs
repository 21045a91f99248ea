use serde::{Deserialize, Serialize};

use crate::{
    amount::{Amount, PackedIndex},
    identity::OperatorId,
};

/// Block number type
pub type BlockNumber = u64;

/// A monotonically accruing fee counter sampled at a known block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSnapshot {
    /// Fee charged per block since the snapshot
    pub rate_per_block: Amount,
    /// Cumulative index at `block_at_snapshot`
    pub index_at_snapshot: Amount,
    /// Block the index was recorded at
    pub block_at_snapshot: BlockNumber,
}

/// A cluster's own bookkeeping baseline, captured the last time it was
/// touched on-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    pub validator_count: u32,
    /// Network fee index at the cluster's last update
    pub network_fee_index: PackedIndex,
    /// Aggregated operator fee index at the cluster's last update
    pub operator_fee_index: PackedIndex,
    /// Balance held by the cluster contract
    pub stored_balance: Amount,
}

/// Protocol wide liquidation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoParameters {
    pub minimum_liquidation_collateral: Amount,
    pub liquidation_threshold_blocks: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorFee {
    pub id: OperatorId,
    pub snapshot: FeeSnapshot,
}

/// Every input needed to estimate one cluster, read at a single block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotBundle {
    pub block: BlockNumber,
    pub dao: DaoParameters,
    pub network_fee: FeeSnapshot,
    /// One entry per operator, in the cluster's operator order
    pub operators: Vec<OperatorFee>,
    pub cluster: ClusterSnapshot,
}

impl SnapshotBundle {
    pub fn operator_snapshots(&self) -> impl Iterator<Item = &FeeSnapshot> + '_ {
        self.operators.iter().map(|operator| &operator.snapshot)
    }
}
