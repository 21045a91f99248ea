use cluster_models::{Address, BlockNumber, ClusterId, ClusterKey, Network, OperatorId};
use serde::Serialize;

use crate::services::{balance_service::BalanceBreakdown, runway_service::RunwayEstimate};
use crate::utils::errors::ServiceError;

/// Balance and runway of one cluster at one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterEstimate {
    pub cluster_id: ClusterId,
    pub operator_ids: Vec<OperatorId>,
    pub block: BlockNumber,
    pub validator_count: u32,
    pub balance: BalanceBreakdown,
    pub runway: RunwayEstimate,
}

/// Result of estimating one discovered cluster.
#[derive(Debug)]
pub struct ClusterOutcome {
    pub key: ClusterKey,
    pub result: Result<ClusterEstimate, ServiceError>,
}

/// Every active cluster of an account, in discovery order.
#[derive(Debug)]
pub struct BatchReport {
    pub account: Address,
    pub network: Network,
    /// Block all clusters of the batch were evaluated at
    pub block: BlockNumber,
    pub outcomes: Vec<ClusterOutcome>,
}

impl BatchReport {
    pub fn estimates(&self) -> impl Iterator<Item = &ClusterEstimate> + '_ {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&ClusterKey, &ServiceError)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err().map(|err| (&outcome.key, err)))
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }
}
