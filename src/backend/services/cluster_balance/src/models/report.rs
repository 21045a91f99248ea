//! Human readable views of estimates.

use cluster_models::{Address, BlockNumber, Network, OperatorId};
use serde::Serialize;

use crate::config::NetworkConfig;
use crate::models::estimate::{BatchReport, ClusterEstimate};

/// Decimals shown for balances in native units.
pub const DISPLAY_DECIMALS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterReport {
    pub operator_ids: Vec<OperatorId>,
    /// Balance in whole native units, e.g. `"12.345"`
    pub balance_native: String,
    /// `None` when the runway is unbounded
    pub runway_blocks: Option<i128>,
    pub runway_days: Option<f64>,
}

impl ClusterReport {
    pub fn from_estimate(estimate: &ClusterEstimate, network: &NetworkConfig) -> Self {
        let runway_blocks = estimate.runway.runway.blocks();
        Self {
            operator_ids: estimate.operator_ids.clone(),
            balance_native: estimate.balance.balance.to_native_string(DISPLAY_DECIMALS),
            runway_blocks,
            runway_days: runway_blocks.map(|blocks| blocks as f64 / network.blocks_per_day()),
        }
    }

    /// `"<days> days (<blocks> blocks)"`, or `"unbounded"`.
    pub fn runway_label(&self) -> String {
        match (self.runway_days, self.runway_blocks) {
            // `f64::round` breaks ties away from zero, unlike `{:.0}`
            (Some(days), Some(blocks)) => {
                format!("{} days ({} blocks)", days.round() as i128, blocks)
            }
            _ => "unbounded".to_string(),
        }
    }
}

/// One row of a batch view: either a report or the failure shown in its place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ClusterRow {
    Ok(ClusterReport),
    Error {
        operator_ids: Vec<OperatorId>,
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchView {
    pub account: Address,
    pub network: Network,
    pub block: BlockNumber,
    pub complete: bool,
    pub clusters: Vec<ClusterRow>,
}

impl BatchView {
    pub fn from_report(report: &BatchReport, network: &NetworkConfig) -> Self {
        let clusters = report
            .outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(estimate) => ClusterRow::Ok(ClusterReport::from_estimate(estimate, network)),
                Err(err) => ClusterRow::Error {
                    operator_ids: outcome.key.operator_ids.clone(),
                    error: err.user_message(),
                },
            })
            .collect();

        Self {
            account: report.account.clone(),
            network: report.network,
            block: report.block,
            complete: report.is_complete(),
            clusters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{
        balance_service::BalanceBreakdown,
        runway_service::{Runway, RunwayEstimate},
    };
    use cluster_models::{Amount, ClusterKey};

    fn estimate(balance: i128, runway: Runway) -> ClusterEstimate {
        let owner: Address = "0x00000000000000000000000000000000000000aa".parse().unwrap();
        let key = ClusterKey::new(owner, vec![OperatorId(1), OperatorId(2)]).unwrap();
        ClusterEstimate {
            cluster_id: key.cluster_id(),
            operator_ids: key.operator_ids.clone(),
            block: 100,
            validator_count: 1,
            balance: BalanceBreakdown {
                network_accrued: Amount::ZERO,
                operator_accrued: Amount::ZERO,
                balance: Amount(balance),
            },
            runway: RunwayEstimate {
                burn_rate: Amount(1),
                liquidation_collateral: Amount::ZERO,
                runway,
            },
        }
    }

    #[test]
    fn test_report_scales_balance_and_runway() {
        let network = NetworkConfig::default_for(Network::Mainnet);
        let report = ClusterReport::from_estimate(
            &estimate(2_500_000_000_000_000_000, Runway::Blocks(36_000)),
            &network,
        );

        assert_eq!(report.balance_native, "2.500");
        assert_eq!(report.runway_blocks, Some(36_000));
        assert_eq!(report.runway_days, Some(5.0));
        assert_eq!(report.runway_label(), "5 days (36000 blocks)");
    }

    #[test]
    fn test_half_day_runway_rounds_away_from_zero() {
        let network = NetworkConfig::default_for(Network::Mainnet);

        let report = ClusterReport::from_estimate(
            &estimate(1_000_000_000_000_000_000, Runway::Blocks(18_000)),
            &network,
        );
        assert_eq!(report.runway_days, Some(2.5));
        assert_eq!(report.runway_label(), "3 days (18000 blocks)");

        let report = ClusterReport::from_estimate(
            &estimate(-1_000_000_000_000_000_000, Runway::Blocks(-18_000)),
            &network,
        );
        assert_eq!(report.runway_label(), "-3 days (-18000 blocks)");

        let report = ClusterReport::from_estimate(
            &estimate(0, Runway::Blocks(3_600)),
            &network,
        );
        assert_eq!(report.runway_label(), "1 days (3600 blocks)");
    }

    #[test]
    fn test_unbounded_report() {
        let network = NetworkConfig::default_for(Network::Holesky);
        let report = ClusterReport::from_estimate(&estimate(0, Runway::Unbounded), &network);

        assert_eq!(report.runway_days, None);
        assert_eq!(report.runway_label(), "unbounded");
    }
}
