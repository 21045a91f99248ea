//! Balance and runway estimation for SSV clusters.
//!
//! The indexer only keeps fee index snapshots, so fees accrued since each
//! snapshot are reconstructed from `index + rate * elapsed_blocks` and netted
//! against the balance stored on the cluster record.

pub mod api;
pub mod config;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

pub use config::{EstimatorConfig, NetworkConfig, NetworksConfig, ServiceConfig};
pub use models::{
    estimate::{BatchReport, ClusterEstimate, ClusterOutcome},
    report::{BatchView, ClusterReport, ClusterRow},
};
pub use repositories::{GraphIndexer, IndexerRepository};
pub use services::{
    balance_service::{BalanceBreakdown, BalanceService, OperatorDeltaPolicy},
    cluster_service::ClusterService,
    discovery_service::DiscoveryService,
    fee_accrual::accrue,
    runway_service::{Runway, RunwayEstimate, RunwayService},
};
pub use utils::errors::{Result, ServiceError};
