pub mod balance_service;
pub mod cluster_service;
pub mod discovery_service;
pub mod fee_accrual;
pub mod runway_service;
