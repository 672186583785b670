use alloy::transports::{RpcError, TransportErrorKind};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum ProviderError {
    #[error("RPC client error: {0}")]
    RpcError(String),
    #[error("RPC transport error: {0}")]
    Transport(String),
    #[error("Transaction rejected: {0}")]
    Rejected(String),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Invalid transaction hash: {0}")]
    InvalidHash(String),
    #[error("Network configuration error: {0}")]
    NetworkConfiguration(String),
}

impl From<RpcError<TransportErrorKind>> for ProviderError {
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        match err {
            RpcError::ErrorResp(payload) => ProviderError::Rejected(payload.to_string()),
            RpcError::Transport(kind) => ProviderError::Transport(kind.to_string()),
            other => ProviderError::RpcError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_maps_to_transport_variant() {
        // custom_str already wraps the kind into an RpcError
        let err = TransportErrorKind::custom_str("connection reset");
        let provider_err = ProviderError::from(err);
        assert!(matches!(provider_err, ProviderError::Transport(_)));
    }

    #[test]
    fn test_error_display() {
        let err = ProviderError::Rejected("nonce too low".to_string());
        assert_eq!(err.to_string(), "Transaction rejected: nonce too low");
    }
}
