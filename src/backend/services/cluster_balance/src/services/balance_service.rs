use cluster_models::{Amount, BlockNumber, ClusterSnapshot, FeeSnapshot};
use serde::{Deserialize, Serialize};

use crate::services::fee_accrual::accrue;
use crate::utils::errors::{Result, ServiceError};

/// How accrued operator fees are reduced against the cluster's operator
/// index baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorDeltaPolicy {
    /// `sum(accrued) - baseline`, the baseline subtracted once. Negative
    /// totals are kept.
    #[default]
    Aggregate,
    /// `sum(max(0, accrued - baseline))` over every operator.
    ClampPerOperator,
}

/// Fee terms and resulting balance of a cluster at one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceBreakdown {
    pub network_accrued: Amount,
    pub operator_accrued: Amount,
    /// Stored balance net of fees; negative when the cluster is delinquent
    pub balance: Amount,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceService {
    policy: OperatorDeltaPolicy,
}

impl BalanceService {
    pub fn new(policy: OperatorDeltaPolicy) -> Self {
        Self { policy }
    }

    pub fn estimate_balance<'a, I>(
        &self,
        cluster: &ClusterSnapshot,
        network_fee: &FeeSnapshot,
        operator_fees: I,
        current_block: BlockNumber,
    ) -> Result<BalanceBreakdown>
    where
        I: IntoIterator<Item = &'a FeeSnapshot>,
    {
        let network_baseline = cluster
            .network_fee_index
            .expand()
            .ok_or(ServiceError::Overflow("network fee baseline"))?;
        let network_accrued = accrue(network_fee, current_block)?
            .checked_sub(network_baseline)
            .ok_or(ServiceError::Overflow("network fee accrual"))?;

        let operator_accrued = self.operator_accrued(cluster, operator_fees, current_block)?;

        let owed = network_accrued
            .checked_add(operator_accrued)
            .ok_or(ServiceError::Overflow("cluster fee accrual"))?;
        // A cluster without validators still owes the flat delta once.
        let owed = if cluster.validator_count > 0 {
            owed.checked_mul(u64::from(cluster.validator_count))
                .ok_or(ServiceError::Overflow("per-validator fee accrual"))?
        } else {
            owed
        };

        let balance = cluster
            .stored_balance
            .checked_sub(owed)
            .ok_or(ServiceError::Overflow("cluster balance"))?;

        Ok(BalanceBreakdown {
            network_accrued,
            operator_accrued,
            balance,
        })
    }

    fn operator_accrued<'a, I>(
        &self,
        cluster: &ClusterSnapshot,
        operator_fees: I,
        current_block: BlockNumber,
    ) -> Result<Amount>
    where
        I: IntoIterator<Item = &'a FeeSnapshot>,
    {
        let baseline = cluster
            .operator_fee_index
            .expand()
            .ok_or(ServiceError::Overflow("operator fee baseline"))?;

        let accrued = operator_fees
            .into_iter()
            .map(|fee| accrue(fee, current_block))
            .collect::<Result<Vec<_>>>()?;

        match self.policy {
            OperatorDeltaPolicy::Aggregate => Amount::checked_sum(accrued)
                .and_then(|total| total.checked_sub(baseline))
                .ok_or(ServiceError::Overflow("operator fee accrual")),
            OperatorDeltaPolicy::ClampPerOperator => {
                let deltas = accrued
                    .into_iter()
                    .map(|value| {
                        value
                            .checked_sub(baseline)
                            .map(|delta| delta.max(Amount::ZERO))
                            .ok_or(ServiceError::Overflow("operator fee delta"))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Amount::checked_sum(deltas).ok_or(ServiceError::Overflow("operator fee accrual"))
            }
        }
    }
}
