use std::sync::Arc;

use crate::domain::RelaySubmitter;
use crate::repositories::InMemoryEventRepository;
use crate::services::{EvmProvider, NonceManager};

/// Shared application state handed to the HTTP handlers.
pub struct AppState<P, N, E> {
    pub relayer: Arc<RelaySubmitter<P, N, E>>,
    pub event_repository: Arc<E>,
}

impl<P, N, E> Clone for AppState<P, N, E> {
    fn clone(&self) -> Self {
        Self {
            relayer: Arc::clone(&self.relayer),
            event_repository: Arc::clone(&self.event_repository),
        }
    }
}

impl<P, N, E> AppState<P, N, E> {
    pub fn new(relayer: Arc<RelaySubmitter<P, N, E>>, event_repository: Arc<E>) -> Self {
        Self {
            relayer,
            event_repository,
        }
    }
}

pub type DefaultAppState = AppState<EvmProvider, NonceManager<EvmProvider>, InMemoryEventRepository>;
