use cluster_models::{Amount, BlockNumber, FeeSnapshot};

use crate::utils::errors::{Result, ServiceError};

/// Extrapolates a fee index from its snapshot to `current_block`.
///
/// The indexer records a new snapshot on every rate change, so the index
/// grows linearly between snapshots.
pub fn accrue(snapshot: &FeeSnapshot, current_block: BlockNumber) -> Result<Amount> {
    let elapsed = current_block
        .checked_sub(snapshot.block_at_snapshot)
        .ok_or(ServiceError::StaleSnapshot {
            snapshot_block: snapshot.block_at_snapshot,
            current_block,
        })?;

    snapshot
        .rate_per_block
        .checked_mul(elapsed)
        .and_then(|growth| snapshot.index_at_snapshot.checked_add(growth))
        .ok_or(ServiceError::Overflow("accrued fee index"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn snapshot(rate: i128, index: i128, block: BlockNumber) -> FeeSnapshot {
        FeeSnapshot {
            rate_per_block: Amount(rate),
            index_at_snapshot: Amount(index),
            block_at_snapshot: block,
        }
    }

    #[test]
    fn test_linear_extrapolation() {
        let network_fee = snapshot(100, 1000, 500);
        assert_eq!(accrue(&network_fee, 600).unwrap(), Amount(11_000));
    }

    #[test]
    fn test_same_block_returns_index() {
        let fee = snapshot(987, 42, 1_000);
        assert_eq!(accrue(&fee, 1_000).unwrap(), Amount(42));
    }

    #[test]
    fn test_stale_snapshot() {
        let fee = snapshot(1, 0, 20);
        match accrue(&fee, 19) {
            Err(ServiceError::StaleSnapshot {
                snapshot_block,
                current_block,
            }) => {
                assert_eq!(snapshot_block, 20);
                assert_eq!(current_block, 19);
            }
            other => panic!("expected stale snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_overflow_is_reported() {
        let fee = snapshot(i128::MAX / 2, 0, 0);
        assert!(matches!(
            accrue(&fee, 3),
            Err(ServiceError::Overflow(_))
        ));
    }

    proptest! {
        #[test]
        fn zero_rate_never_moves_the_index(
            index in -1_000_000_000_000i128..1_000_000_000_000i128,
            block in 0u64..10_000_000,
            elapsed in 0u64..10_000_000,
        ) {
            let fee = snapshot(0, index, block);
            prop_assert_eq!(accrue(&fee, block + elapsed).unwrap(), Amount(index));
        }

        #[test]
        fn earlier_block_is_always_stale(
            rate in 0i128..1_000_000_000,
            block in 1u64..u64::MAX,
            behind in 1u64..1_000_000,
        ) {
            let fee = snapshot(rate, 0, block);
            let current = block.saturating_sub(behind);
            let is_stale = matches!(
                accrue(&fee, current),
                Err(ServiceError::StaleSnapshot { .. })
            );
            prop_assert!(is_stale);
        }
    }
}
