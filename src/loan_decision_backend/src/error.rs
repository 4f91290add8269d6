use candid::{CandidType, Deserialize};
use serde::Serialize;
use thiserror::Error;

/// Failures surfaced by the decision backend
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Error)]
pub enum LoanError {
    /// Rejected before the oracle is consulted
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Fatal for the request; never retried
    #[error("model oracle unavailable: {0}")]
    OracleUnavailable(String),
    #[error("prediction log write failed: {0}")]
    StoreWriteFailure(String),
}

pub type Result<T> = std::result::Result<T, LoanError>;
