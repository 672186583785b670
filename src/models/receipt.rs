use serde::{Deserialize, Serialize};

/// Minimal view of a transaction receipt, as consumed by the confirmation
/// tracker. `block_number` is absent while the transaction sits in a block
/// that has not been assigned a number yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionReceiptData {
    pub block_number: Option<u64>,
    /// Execution outcome: `false` means the transaction reverted.
    pub succeeded: bool,
}
