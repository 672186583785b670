use serde::Serialize;
use thiserror::Error;

use super::{ProviderError, RepositoryError};

/// Errors returned synchronously to relay submission callers.
///
/// Everything that happens after a `TrackedEvent` exists is absorbed by the
/// confirmation tracker and surfaces only through event status and logs.
#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum RelayerError {
    /// Malformed input. No nonce was consumed and nothing was submitted.
    #[error("Invalid relay request: {0}")]
    InvalidRequest(String),
    /// Transient failure querying the ledger. Retryable by the caller.
    #[error("Ledger unavailable: {0}")]
    LedgerUnavailable(String),
    /// The ledger rejected the transaction after a nonce was consumed.
    /// The nonce is not returned to the pool.
    #[error("Transaction submission failed: {0}")]
    SubmissionFailed(String),
    /// Unreachable given the allocator invariant; observing it means an
    /// allocator bug and the request must not be retried blindly.
    #[error("Nonce conflict for address {address}: {reason}")]
    NonceConflict { address: String, reason: String },
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl RelayerError {
    /// Maps a provider failure observed while querying the ledger
    /// (pre-submission) onto the transient error kind.
    pub fn ledger_unavailable(err: ProviderError) -> Self {
        RelayerError::LedgerUnavailable(err.to_string())
    }
}
