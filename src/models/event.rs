//! Tracked event model.
//!
//! One `TrackedEvent` is persisted per submitted transaction and records its
//! lifecycle from submission to finalization or failure. Events are created
//! by the relay submitter and mutated exclusively by the confirmation
//! tracker; status transitions only ever move forward.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    Pending,
    Finalized,
    Failed,
}

impl EventStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventStatus::Finalized | EventStatus::Failed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackedEvent {
    /// Unique id generated at enqueue time, returned to the caller.
    pub request_id: String,
    pub transaction_hash: String,
    /// Caller-supplied correlation id (poll/reference id).
    pub correlation_id: String,
    pub status: EventStatus,
    /// Confirmation depth as last read from the ledger.
    pub confirmations: u64,
    /// Processing cycles that did not finalize the event.
    pub attempts: u32,
    /// When the event becomes due again. `None` once terminal.
    pub next_retry_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrackedEvent {
    /// Creates a pending event eligible for immediate polling.
    pub fn new(transaction_hash: impl Into<String>, correlation_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            request_id: Uuid::new_v4().to_string(),
            transaction_hash: transaction_hash.into(),
            correlation_id: correlation_id.into(),
            status: EventStatus::Pending,
            confirmations: 0,
            attempts: 0,
            next_retry_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update and refreshes `updated_at`.
    pub fn apply(&mut self, update: &EventUpdateRequest) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(confirmations) = update.confirmations {
            self.confirmations = confirmations;
        }
        if let Some(attempts) = update.attempts {
            self.attempts = attempts;
        }
        if let Some(next_retry_at) = update.next_retry_at {
            self.next_retry_at = next_retry_at;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update for a tracked event. The nested option on `next_retry_at`
/// distinguishes "leave unchanged" from "clear".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventUpdateRequest {
    pub status: Option<EventStatus>,
    pub confirmations: Option<u64>,
    pub attempts: Option<u32>,
    pub next_retry_at: Option<Option<DateTime<Utc>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_event_defaults() {
        let event = TrackedEvent::new("0xabc", "poll-1");
        assert_eq!(event.status, EventStatus::Pending);
        assert_eq!(event.confirmations, 0);
        assert_eq!(event.attempts, 0);
        assert_eq!(event.next_retry_at, Some(event.created_at));
        assert!(!event.request_id.is_empty());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!EventStatus::Pending.is_terminal());
        assert!(EventStatus::Finalized.is_terminal());
        assert!(EventStatus::Failed.is_terminal());
    }

    #[test]
    fn test_apply_retry_update() {
        let mut event = TrackedEvent::new("0xabc", "poll-1");
        let due = Utc::now() + chrono::Duration::seconds(4);
        event.apply(&EventUpdateRequest {
            attempts: Some(1),
            confirmations: Some(1),
            next_retry_at: Some(Some(due)),
            ..Default::default()
        });

        assert_eq!(event.attempts, 1);
        assert_eq!(event.confirmations, 1);
        assert_eq!(event.next_retry_at, Some(due));
        assert_eq!(event.status, EventStatus::Pending);
    }

    #[test]
    fn test_apply_terminal_update_clears_retry() {
        let mut event = TrackedEvent::new("0xabc", "poll-1");
        event.apply(&EventUpdateRequest {
            status: Some(EventStatus::Finalized),
            confirmations: Some(2),
            next_retry_at: Some(None),
            ..Default::default()
        });

        assert_eq!(event.status, EventStatus::Finalized);
        assert_eq!(event.next_retry_at, None);
    }

    #[test]
    fn test_serde_round_trip_preserves_fields() {
        let mut event = TrackedEvent::new("0xdeadbeef", "poll-42");
        event.confirmations = 1;
        event.attempts = 3;

        let json = serde_json::to_string(&event).unwrap();
        let decoded: TrackedEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&EventStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
    }
}
