//! Tracked event storage.
//!
//! The confirmation tracker relies on `update_if_status` being an atomic
//! conditional write: a transition is applied only if the stored status still
//! matches the one the caller read. This keeps double-processing across
//! worker instances idempotent.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{EventStatus, EventUpdateRequest, RepositoryError, TrackedEvent};

#[cfg(test)]
use mockall::automock;

mod event_in_memory;
pub use event_in_memory::*;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait EventRepositoryTrait: Send + Sync {
    async fn create(&self, event: TrackedEvent) -> Result<TrackedEvent, RepositoryError>;

    async fn get_by_id(&self, request_id: &str) -> Result<TrackedEvent, RepositoryError>;

    /// Returns up to `limit` events with the given status whose retry time is
    /// unset or has elapsed. Ordering within the batch is unspecified.
    async fn find_due(
        &self,
        status: EventStatus,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<TrackedEvent>, RepositoryError>;

    /// Applies `update` only if the stored status equals `expected`.
    /// Returns `false` when the condition no longer holds.
    async fn update_if_status(
        &self,
        request_id: &str,
        expected: EventStatus,
        update: &EventUpdateRequest,
    ) -> Result<bool, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<TrackedEvent>, RepositoryError>;

    async fn count(&self) -> Result<usize, RepositoryError>;
}
