use cluster_models::{Amount, DaoParameters};
use serde::{Deserialize, Serialize};

use crate::utils::errors::{Result, ServiceError};

/// Blocks left before a cluster's balance reaches its liquidation
/// collateral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Runway {
    /// Negative when the cluster is already past its threshold
    Blocks(i128),
    /// Nothing is burning: no validators or no fees
    Unbounded,
}

impl Runway {
    pub fn blocks(self) -> Option<i128> {
        match self {
            Runway::Blocks(blocks) => Some(blocks),
            Runway::Unbounded => None,
        }
    }

    pub fn is_liquidatable(self) -> bool {
        matches!(self, Runway::Blocks(blocks) if blocks < 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunwayEstimate {
    /// Fees consumed per block across all validators
    pub burn_rate: Amount,
    pub liquidation_collateral: Amount,
    pub runway: Runway,
}

pub struct RunwayService;

impl RunwayService {
    pub fn estimate_runway(
        balance: Amount,
        validator_count: u32,
        operator_fee_sum: Amount,
        network_fee_rate: Amount,
        dao: &DaoParameters,
    ) -> Result<RunwayEstimate> {
        let burn_rate = operator_fee_sum
            .checked_add(network_fee_rate)
            .and_then(|rate| rate.checked_mul(u64::from(validator_count)))
            .ok_or(ServiceError::Overflow("burn rate"))?;

        let threshold_collateral = burn_rate
            .checked_mul(dao.liquidation_threshold_blocks)
            .ok_or(ServiceError::Overflow("liquidation collateral"))?;
        let liquidation_collateral = dao.minimum_liquidation_collateral.max(threshold_collateral);

        if burn_rate.is_zero() {
            return Ok(RunwayEstimate {
                burn_rate,
                liquidation_collateral,
                runway: Runway::Unbounded,
            });
        }

        let runway = balance
            .checked_sub(liquidation_collateral)
            .and_then(|spendable| spendable.checked_div_rounded(burn_rate))
            .ok_or(ServiceError::Overflow("runway"))?;

        Ok(RunwayEstimate {
            burn_rate,
            liquidation_collateral,
            runway: Runway::Blocks(runway),
        })
    }
}
