/// Configuration for the server and the confirmation worker.
use std::env;

use crate::constants::{
    DEFAULT_BACKOFF_BASE_MS, DEFAULT_BACKOFF_JITTER, DEFAULT_BACKOFF_MAX_MS, DEFAULT_CHAIN_ID,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_REQUIRED_CONFIRMATIONS, DEFAULT_RPC_TIMEOUT_SECONDS,
    DEFAULT_WORKER_BATCH_SIZE, DEFAULT_WORKER_MAX_ATTEMPTS,
};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address the server will bind to.
    pub host: String,
    /// The port number the server will listen on.
    pub port: u16,
    /// The RPC endpoint of the target ledger.
    pub rpc_url: String,
    /// The sponsoring relayer's sender address.
    pub relayer_address: String,
    /// The chain id this relayer serves.
    pub chain_id: u64,
    /// Timeout for individual RPC calls, in seconds.
    pub rpc_timeout_seconds: u64,
    /// Confirmation depth required before an event is finalized.
    pub required_confirmations: u64,
    /// Interval between confirmation cycles, in milliseconds.
    pub poll_interval_ms: u64,
    /// Maximum due events fetched per cycle.
    pub worker_batch_size: usize,
    /// Processing attempts before an event is marked failed.
    pub worker_max_attempts: u32,
    /// Initial retry delay, in milliseconds.
    pub backoff_base_ms: u64,
    /// Cap on the exponential retry delay, in milliseconds.
    pub backoff_max_ms: u64,
    /// Jitter fraction applied on top of the exponential delay.
    pub backoff_jitter: f64,
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

impl ServerConfig {
    /// Creates a new `ServerConfig` instance from environment variables.
    ///
    /// # Panics
    ///
    /// This function will panic if the `RPC_URL` or `RELAYER_ADDRESS`
    /// environment variables are not set, as they are required for the
    /// relayer to function.
    ///
    /// # Defaults
    ///
    /// - `HOST` defaults to `"0.0.0.0"`.
    /// - `APP_PORT` defaults to `8080`.
    /// - `CHAIN_ID` defaults to `1`.
    /// - Worker and backoff settings default to the values in `constants`.
    /// - Invalid numeric values fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("APP_PORT", 8080),
            rpc_url: env::var("RPC_URL").expect("RPC_URL must be set"),
            relayer_address: env::var("RELAYER_ADDRESS").expect("RELAYER_ADDRESS must be set"),
            chain_id: env_or("CHAIN_ID", DEFAULT_CHAIN_ID),
            rpc_timeout_seconds: env_or("RPC_TIMEOUT_SECONDS", DEFAULT_RPC_TIMEOUT_SECONDS),
            required_confirmations: env_or(
                "CONFIRMATIONS_REQUIRED",
                DEFAULT_REQUIRED_CONFIRMATIONS,
            ),
            poll_interval_ms: env_or("POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS),
            worker_batch_size: env_or("WORKER_BATCH_SIZE", DEFAULT_WORKER_BATCH_SIZE),
            worker_max_attempts: env_or("WORKER_MAX_ATTEMPTS", DEFAULT_WORKER_MAX_ATTEMPTS),
            backoff_base_ms: env_or("BACKOFF_BASE_MS", DEFAULT_BACKOFF_BASE_MS),
            backoff_max_ms: env_or("BACKOFF_MAX_MS", DEFAULT_BACKOFF_MAX_MS),
            backoff_jitter: env_or("BACKOFF_JITTER", DEFAULT_BACKOFF_JITTER),
        }
    }
}
