//! In-memory implementation of the tracked event repository.
//!
//! Events are kept in a `DashMap` keyed by request id. Conditional updates
//! run under the map's per-entry lock, which makes the status check and the
//! patch application a single atomic step.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::models::{EventStatus, EventUpdateRequest, RepositoryError, TrackedEvent};
use crate::repositories::EventRepositoryTrait;

#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    store: DashMap<String, TrackedEvent>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }
}

#[async_trait]
impl EventRepositoryTrait for InMemoryEventRepository {
    async fn create(&self, event: TrackedEvent) -> Result<TrackedEvent, RepositoryError> {
        if self.store.contains_key(&event.request_id) {
            return Err(RepositoryError::AlreadyExists(format!(
                "Event with id {} already exists",
                event.request_id
            )));
        }
        self.store.insert(event.request_id.clone(), event.clone());
        Ok(event)
    }

    async fn get_by_id(&self, request_id: &str) -> Result<TrackedEvent, RepositoryError> {
        self.store
            .get(request_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| RepositoryError::NotFound(format!("Event with id {} not found", request_id)))
    }

    async fn find_due(
        &self,
        status: EventStatus,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<TrackedEvent>, RepositoryError> {
        let due = self
            .store
            .iter()
            .filter(|entry| {
                entry.status == status
                    && entry
                        .next_retry_at
                        .map(|retry_at| retry_at <= now)
                        .unwrap_or(true)
            })
            .take(limit)
            .map(|entry| entry.clone())
            .collect();
        Ok(due)
    }

    async fn update_if_status(
        &self,
        request_id: &str,
        expected: EventStatus,
        update: &EventUpdateRequest,
    ) -> Result<bool, RepositoryError> {
        let mut entry = self.store.get_mut(request_id).ok_or_else(|| {
            RepositoryError::NotFound(format!("Event with id {} not found", request_id))
        })?;

        if entry.status != expected {
            return Ok(false);
        }
        entry.apply(update);
        Ok(true)
    }

    async fn list_all(&self) -> Result<Vec<TrackedEvent>, RepositoryError> {
        Ok(self.store.iter().map(|entry| entry.clone()).collect())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.store.len())
    }
}
