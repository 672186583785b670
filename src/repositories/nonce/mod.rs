//! Nonce cache storage.
//!
//! Holds the last nonce handed out per sender address. The store is the
//! single shared-mutation point of the relay path; `reserve` runs its
//! read-compare-set under a per-address critical section so no two callers
//! can observe the same value.

use crate::models::RepositoryError;

mod nonce_in_memory;
pub use nonce_in_memory::*;

pub trait NonceStoreTrait: Send + Sync {
    /// Last assigned nonce for the address, if any was handed out yet.
    fn get(&self, address: &str) -> Result<Option<u64>, RepositoryError>;

    /// Reserves the next nonce for the address given the network-reported
    /// pending nonce: `max(network_nonce, last_assigned + 1)`. The returned
    /// value is recorded as assigned before the critical section is left.
    fn reserve(&self, address: &str, network_nonce: u64) -> Result<u64, RepositoryError>;

    /// Overwrites the cached value, e.g. when reconciling after a restart.
    fn set(&self, address: &str, value: u64) -> Result<(), RepositoryError>;
}
