//! In-memory nonce store.
//!
//! Uses a `DashMap` keyed by sender address; the map's entry guard is the
//! per-address critical section, so unrelated addresses never serialize on
//! each other.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::models::RepositoryError;
use crate::repositories::NonceStoreTrait;

#[derive(Debug, Default)]
pub struct InMemoryNonceStore {
    // address -> last assigned nonce
    store: DashMap<String, u64>,
}

impl InMemoryNonceStore {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }
}

impl NonceStoreTrait for InMemoryNonceStore {
    fn get(&self, address: &str) -> Result<Option<u64>, RepositoryError> {
        Ok(self.store.get(address).map(|entry| *entry))
    }

    fn reserve(&self, address: &str, network_nonce: u64) -> Result<u64, RepositoryError> {
        let next = match self.store.entry(address.to_string()) {
            Entry::Occupied(mut entry) => {
                let next = network_nonce.max(*entry.get() + 1);
                entry.insert(next);
                next
            }
            Entry::Vacant(entry) => {
                entry.insert(network_nonce);
                network_nonce
            }
        };
        Ok(next)
    }

    fn set(&self, address: &str, value: u64) -> Result<(), RepositoryError> {
        self.store.insert(address.to_string(), value);
        Ok(())
    }
}
