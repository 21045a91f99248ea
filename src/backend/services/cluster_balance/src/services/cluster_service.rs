use cluster_models::{Amount, ClusterKey, SnapshotBundle};

use crate::models::estimate::ClusterEstimate;
use crate::services::{
    balance_service::{BalanceService, OperatorDeltaPolicy},
    runway_service::RunwayService,
};
use crate::utils::errors::{Result, ServiceError};

/// Runs the balance and runway estimators over one snapshot bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterService {
    balance_service: BalanceService,
}

impl ClusterService {
    pub fn new(policy: OperatorDeltaPolicy) -> Self {
        Self {
            balance_service: BalanceService::new(policy),
        }
    }

    pub fn estimate(&self, key: &ClusterKey, bundle: &SnapshotBundle) -> Result<ClusterEstimate> {
        let balance = self.balance_service.estimate_balance(
            &bundle.cluster,
            &bundle.network_fee,
            bundle.operator_snapshots(),
            bundle.block,
        )?;

        let operator_fee_sum = Amount::checked_sum(
            bundle
                .operator_snapshots()
                .map(|snapshot| snapshot.rate_per_block),
        )
        .ok_or(ServiceError::Overflow("operator fee sum"))?;

        let runway = RunwayService::estimate_runway(
            balance.balance,
            bundle.cluster.validator_count,
            operator_fee_sum,
            bundle.network_fee.rate_per_block,
            &bundle.dao,
        )?;

        Ok(ClusterEstimate {
            cluster_id: key.cluster_id(),
            operator_ids: key.operator_ids.clone(),
            block: bundle.block,
            validator_count: bundle.cluster.validator_count,
            balance,
            runway,
        })
    }
}
