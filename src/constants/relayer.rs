//! Relay submission constants.

/// Timeout applied to every RPC call, in seconds.
pub const DEFAULT_RPC_TIMEOUT_SECONDS: u64 = 30;

/// Chain id assumed when none is configured (Ethereum mainnet).
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Required hex prefix for raw signed transaction payloads and call data.
pub const HEX_PREFIX: &str = "0x";
