//! This module provides the nonce allocation service.
//!
//! `NonceManager` serializes nonce assignment for a sender address across
//! concurrent relay calls. The network-reported pending nonce is fetched
//! outside the critical section; the compare-and-set against the local cache
//! happens inside the store's per-address entry lock, so N concurrent callers
//! always receive N distinct, strictly increasing values.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::models::RelayerError;
use crate::repositories::{InMemoryNonceStore, NonceStoreTrait};
use crate::services::EvmProviderTrait;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait NonceManagerTrait: Send + Sync {
    /// Reserves the next nonce for `address`. Fails with `LedgerUnavailable`
    /// (and leaves the cache untouched) when the network query fails.
    async fn reserve_nonce(&self, address: &str) -> Result<u64, RelayerError>;
}

pub struct NonceManager<P, S = InMemoryNonceStore>
where
    P: EvmProviderTrait,
    S: NonceStoreTrait,
{
    provider: Arc<P>,
    store: Arc<S>,
}

impl<P, S> NonceManager<P, S>
where
    P: EvmProviderTrait,
    S: NonceStoreTrait,
{
    pub fn new(provider: Arc<P>, store: Arc<S>) -> Self {
        Self { provider, store }
    }
}

#[async_trait]
impl<P, S> NonceManagerTrait for NonceManager<P, S>
where
    P: EvmProviderTrait,
    S: NonceStoreTrait,
{
    async fn reserve_nonce(&self, address: &str) -> Result<u64, RelayerError> {
        let network_nonce = self
            .provider
            .get_transaction_count(address)
            .await
            .map_err(RelayerError::ledger_unavailable)?;

        let nonce = self.store.reserve(address, network_nonce)?;
        debug!(
            "Reserved nonce {} for {} (network reported {})",
            nonce, address, network_nonce
        );
        Ok(nonce)
    }
}
