use cluster_models::{BlockNumber, IdentityError};
use std::time::Duration;
use thiserror::Error;

/// Message shown to users for any failure talking to the indexer.
pub const FETCH_FAILURE_MESSAGE: &str = "An error occurred while fetching data.";

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Indexer request failed: {0}")]
    Transport(String),

    #[error("Malformed indexer response: {0}")]
    MalformedResponse(String),

    #[error("Stale snapshot: recorded at block {snapshot_block}, current block is {current_block}")]
    StaleSnapshot {
        snapshot_block: BlockNumber,
        current_block: BlockNumber,
    },

    #[error("Arithmetic overflow computing {0}")]
    Overflow(&'static str),

    #[error("Indexer request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ServiceError {
    /// Transport, malformed and timed out requests are all surfaced the
    /// same way.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            ServiceError::Transport(_) | ServiceError::MalformedResponse(_) | ServiceError::Timeout(_)
        )
    }

    /// Text safe to show to an end user.
    pub fn user_message(&self) -> String {
        if self.is_fetch_failure() {
            FETCH_FAILURE_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::MalformedResponse(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}

impl From<IdentityError> for ServiceError {
    fn from(err: IdentityError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failures_hide_detail() {
        let err = ServiceError::Transport("connection refused to 10.0.0.1".to_string());
        assert!(err.is_fetch_failure());
        assert_eq!(err.user_message(), FETCH_FAILURE_MESSAGE);

        let err = ServiceError::Timeout(Duration::from_secs(3));
        assert_eq!(err.user_message(), FETCH_FAILURE_MESSAGE);
    }

    #[test]
    fn test_logic_errors_keep_detail() {
        let err = ServiceError::StaleSnapshot {
            snapshot_block: 10,
            current_block: 9,
        };
        assert!(!err.is_fetch_failure());
        assert_eq!(
            err.user_message(),
            "Stale snapshot: recorded at block 10, current block is 9"
        );
    }
}
