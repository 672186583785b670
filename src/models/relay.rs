//! Relay request input model and validation.
//!
//! A relay request carries either a raw signed transaction or an unsigned
//! call descriptor executed from the relayer address. Requests are validated
//! once, before any nonce is reserved, and are immutable afterwards.

use alloy::{
    primitives::{Address, Bytes, TxKind},
    rpc::types::{TransactionInput, TransactionRequest},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::HEX_PREFIX;
use crate::models::RelayerError;

/// Unsigned call descriptor: target contract and ABI-encoded call data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallRequest {
    pub to: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayRequest {
    /// Raw signed transaction, 0x-prefixed hex.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_tx: Option<String>,
    /// Unsigned call descriptor, submitted from the relayer address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call: Option<CallRequest>,
    /// Caller-supplied correlation id (poll/reference id).
    pub poll_id: String,
    pub chain_id: u64,
    /// Optional unix-seconds deadline. Expired requests are rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<i64>,
}

impl RelayRequest {
    /// Validates the request. Returns `InvalidRequest` on the first
    /// violation; a failed validation has no side effects.
    pub fn validate(&self) -> Result<(), RelayerError> {
        match (&self.signed_tx, &self.call) {
            (None, None) => {
                return Err(RelayerError::InvalidRequest(
                    "either signed_tx or call must be provided".to_string(),
                ));
            }
            (Some(_), Some(_)) => {
                return Err(RelayerError::InvalidRequest(
                    "signed_tx and call are mutually exclusive".to_string(),
                ));
            }
            (Some(signed_tx), None) => validate_hex_payload(signed_tx, "signed_tx")?,
            (None, Some(call)) => {
                call.to.parse::<Address>().map_err(|_| {
                    RelayerError::InvalidRequest(format!("invalid target address: {}", call.to))
                })?;
                validate_hex_payload(&call.data, "call data")?;
            }
        }

        if self.poll_id.trim().is_empty() {
            return Err(RelayerError::InvalidRequest(
                "poll_id is required".to_string(),
            ));
        }

        if self.chain_id == 0 {
            return Err(RelayerError::InvalidRequest(
                "chain_id must be a positive integer".to_string(),
            ));
        }

        if let Some(deadline) = self.deadline {
            if deadline <= Utc::now().timestamp() {
                return Err(RelayerError::InvalidRequest(
                    "deadline has already passed".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Decodes the raw signed payload. Only meaningful for signed requests.
    pub fn signed_payload(&self) -> Result<Bytes, RelayerError> {
        let signed_tx = self.signed_tx.as_ref().ok_or_else(|| {
            RelayerError::InvalidRequest("request carries no signed payload".to_string())
        })?;
        signed_tx
            .parse::<Bytes>()
            .map_err(|_| RelayerError::InvalidRequest("signed_tx is not valid hex".to_string()))
    }
}

fn validate_hex_payload(payload: &str, field: &str) -> Result<(), RelayerError> {
    if !payload.starts_with(HEX_PREFIX) {
        return Err(RelayerError::InvalidRequest(format!(
            "{} must be 0x-prefixed hex",
            field
        )));
    }
    if payload.len() <= HEX_PREFIX.len() {
        return Err(RelayerError::InvalidRequest(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

impl CallRequest {
    /// Builds an alloy transaction request executing this call from the
    /// relayer address with an already-reserved nonce. Gas fields are left
    /// for the node to fill.
    pub fn to_transaction_request(
        &self,
        from: &str,
        nonce: u64,
        chain_id: u64,
    ) -> Result<TransactionRequest, RelayerError> {
        let from = from.parse::<Address>().map_err(|_| {
            RelayerError::InvalidRequest(format!("invalid relayer address: {}", from))
        })?;
        let to = self.to.parse::<Address>().map_err(|_| {
            RelayerError::InvalidRequest(format!("invalid target address: {}", self.to))
        })?;
        let data = self
            .data
            .parse::<Bytes>()
            .map_err(|_| RelayerError::InvalidRequest("call data is not valid hex".to_string()))?;

        Ok(TransactionRequest {
            from: Some(from),
            to: Some(TxKind::Call(to)),
            input: TransactionInput::from(data),
            nonce: Some(nonce),
            chain_id: Some(chain_id),
            ..Default::default()
        })
    }
}

/// Synchronous result of a relay submission. The eventual fate of the
/// transaction is observable only through the tracked event's status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayResponse {
    pub request_id: String,
    pub transaction_hash: String,
    pub nonce: u64,
}
