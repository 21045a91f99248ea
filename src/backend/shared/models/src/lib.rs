//! Snapshot records and identifiers shared by the cluster balance services.
//!
//! Everything in here is an immutable value read from the indexer. No type
//! in this crate performs I/O.

pub mod amount;
pub mod identity;
pub mod snapshot;

pub use amount::{Amount, PackedIndex, INDEX_PRECISION, NATIVE_DECIMALS};
pub use identity::{Address, ClusterId, ClusterKey, IdentityError, Network, OperatorId};
pub use snapshot::{
    BlockNumber, ClusterSnapshot, DaoParameters, FeeSnapshot, OperatorFee, SnapshotBundle,
};
