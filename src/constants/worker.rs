//! Confirmation worker constants.
//!
//! Default tuning values for the background confirmation tracker. All of them
//! can be overridden through environment variables (see `config`).

/// Blocks on top of the inclusion block required before an event is final.
pub const DEFAULT_REQUIRED_CONFIRMATIONS: u64 = 2;

/// Interval between confirmation cycles, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;

/// Maximum number of due events fetched per cycle.
pub const DEFAULT_WORKER_BATCH_SIZE: usize = 50;

/// Processing attempts before an event is marked failed.
pub const DEFAULT_WORKER_MAX_ATTEMPTS: u32 = 5;

/// Initial retry delay, in milliseconds.
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 1_000;

/// Upper bound on the exponential part of the retry delay, in milliseconds.
pub const DEFAULT_BACKOFF_MAX_MS: u64 = 60_000;

/// Fraction of the exponential delay added as uniform random jitter.
pub const DEFAULT_BACKOFF_JITTER: f64 = 0.2;
