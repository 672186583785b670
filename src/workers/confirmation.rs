//! Confirmation tracking worker.
//!
//! A recurring background process that polls due tracked events, checks
//! their confirmation depth on the ledger and drives the retry state
//! machine. Cycles run strictly sequentially on a fixed interval; a new
//! cycle never starts while the previous one is in flight. Per-event
//! failures are folded into the backoff path and never abort the cycle or
//! the loop.
//!
//! State machine per event: PENDING -> FINALIZED once the confirmation
//! threshold is reached, PENDING -> FAILED when the transaction reverted or
//! the attempt budget is exhausted. Terminal events are never revisited.
//! All transitions go through conditional writes so that a second worker
//! instance processing the same event degrades to a harmless lost race.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, error, info, warn};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::models::{
    EventStatus, EventUpdateRequest, ProviderError, RepositoryError, TrackedEvent,
};
use crate::repositories::EventRepositoryTrait;
use crate::services::EvmProviderTrait;
use crate::workers::BackoffPolicy;

/// Outcome of a single ledger check for one event.
enum CheckOutcome {
    /// Confirmation threshold reached with this freshly read depth.
    Finalized(u64),
    /// Receipt exists but the transaction reverted; it can never confirm.
    Reverted,
    /// Unmined, or mined with insufficient depth (the fresh reading, if any).
    NotYetConfirmed(Option<u64>),
}

pub struct ConfirmationTracker<P, E> {
    provider: Arc<P>,
    event_repository: Arc<E>,
    backoff: BackoffPolicy,
    required_confirmations: u64,
    max_attempts: u32,
    batch_size: usize,
}

impl<P, E> ConfirmationTracker<P, E>
where
    P: EvmProviderTrait,
    E: EventRepositoryTrait,
{
    pub fn new(
        provider: Arc<P>,
        event_repository: Arc<E>,
        backoff: BackoffPolicy,
        required_confirmations: u64,
        max_attempts: u32,
        batch_size: usize,
    ) -> Self {
        Self {
            provider,
            event_repository,
            backoff,
            required_confirmations,
            max_attempts,
            batch_size,
        }
    }

    /// Runs confirmation cycles on a fixed interval until shutdown is
    /// signalled. The in-flight cycle is always drained before stopping.
    pub async fn run(self: Arc<Self>, poll_interval: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            "Confirmation tracker started (interval {}ms, threshold {}, max attempts {})",
            poll_interval.as_millis(),
            self.required_confirmations,
            self.max_attempts
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.process_cycle().await {
                        Ok(0) => {}
                        Ok(processed) => debug!("Confirmation cycle processed {} events", processed),
                        Err(err) => error!("Confirmation cycle failed: {}", err),
                    }
                }
                _ = shutdown.changed() => {
                    info!("Confirmation tracker stopping");
                    break;
                }
            }
        }
    }

    /// Fetches one batch of due pending events and processes each in turn.
    /// Returns the number of events picked up.
    pub async fn process_cycle(&self) -> Result<usize, RepositoryError> {
        let due = self
            .event_repository
            .find_due(EventStatus::Pending, Utc::now(), self.batch_size)
            .await?;
        let picked_up = due.len();

        for event in due {
            if let Err(err) = self.process_event(&event).await {
                // storage failure for one event must not starve the rest
                error!("[{}] Failed to persist tracking update: {}", event.request_id, err);
            }
        }

        Ok(picked_up)
    }

    async fn process_event(&self, event: &TrackedEvent) -> Result<(), RepositoryError> {
        match self.check_confirmations(event).await {
            Ok(CheckOutcome::Finalized(confirmations)) => {
                self.finalize(event, confirmations).await
            }
            Ok(CheckOutcome::Reverted) => {
                warn!(
                    "[{}] Tx {} reverted on chain",
                    event.request_id, event.transaction_hash
                );
                self.fail(event, None, "reverted").await
            }
            Ok(CheckOutcome::NotYetConfirmed(confirmations)) => {
                self.schedule_retry(event, confirmations).await
            }
            Err(err) => {
                warn!(
                    "[{}] Ledger query failed for tx {}: {}",
                    event.request_id, event.transaction_hash, err
                );
                self.schedule_retry(event, None).await
            }
        }
    }

    async fn check_confirmations(
        &self,
        event: &TrackedEvent,
    ) -> Result<CheckOutcome, ProviderError> {
        let receipt = self
            .provider
            .get_transaction_receipt(&event.transaction_hash)
            .await?;

        let receipt = match receipt {
            Some(receipt) => receipt,
            None => return Ok(CheckOutcome::NotYetConfirmed(None)),
        };

        if !receipt.succeeded {
            return Ok(CheckOutcome::Reverted);
        }

        let receipt_block = match receipt.block_number {
            Some(block) => block,
            None => return Ok(CheckOutcome::NotYetConfirmed(Some(0))),
        };

        let current_block = self.provider.get_block_number().await?;
        // depth of the inclusion block itself counts as one confirmation
        let confirmations = (current_block + 1).saturating_sub(receipt_block);

        if confirmations >= self.required_confirmations {
            Ok(CheckOutcome::Finalized(confirmations))
        } else {
            Ok(CheckOutcome::NotYetConfirmed(Some(confirmations)))
        }
    }

    async fn finalize(&self, event: &TrackedEvent, confirmations: u64) -> Result<(), RepositoryError> {
        let applied = self
            .event_repository
            .update_if_status(
                &event.request_id,
                EventStatus::Pending,
                &EventUpdateRequest {
                    status: Some(EventStatus::Finalized),
                    confirmations: Some(confirmations),
                    next_retry_at: Some(None),
                    ..Default::default()
                },
            )
            .await?;

        if applied {
            info!(
                "[{}] FINALIZED (conf={}) tx={}",
                event.request_id, confirmations, event.transaction_hash
            );
        } else {
            debug!("[{}] Already transitioned, skipping", event.request_id);
        }
        Ok(())
    }

    async fn fail(
        &self,
        event: &TrackedEvent,
        attempts: Option<u32>,
        reason: &str,
    ) -> Result<(), RepositoryError> {
        let applied = self
            .event_repository
            .update_if_status(
                &event.request_id,
                EventStatus::Pending,
                &EventUpdateRequest {
                    status: Some(EventStatus::Failed),
                    attempts,
                    next_retry_at: Some(None),
                    ..Default::default()
                },
            )
            .await?;

        if applied {
            error!(
                "[{}] FAILED ({}) tx={}",
                event.request_id, reason, event.transaction_hash
            );
        }
        Ok(())
    }

    /// Not-yet-finalized outcome: bump the attempt count and either give up
    /// or push the event back with a backoff delay.
    async fn schedule_retry(
        &self,
        event: &TrackedEvent,
        confirmations: Option<u64>,
    ) -> Result<(), RepositoryError> {
        let attempts = event.attempts + 1;

        if attempts >= self.max_attempts {
            self.persist_confirmations(event, confirmations).await?;
            return self
                .fail(event, Some(attempts), "retries exhausted")
                .await;
        }

        let delay = self.backoff.delay(attempts);
        let next_retry_at = Utc::now() + chrono::Duration::milliseconds(delay.as_millis() as i64);

        let applied = self
            .event_repository
            .update_if_status(
                &event.request_id,
                EventStatus::Pending,
                &EventUpdateRequest {
                    attempts: Some(attempts),
                    confirmations,
                    next_retry_at: Some(Some(next_retry_at)),
                    ..Default::default()
                },
            )
            .await?;

        if applied {
            debug!(
                "[{}] Only {:?} confirmations, attempt {} of {}, retry in {}ms",
                event.request_id,
                confirmations,
                attempts,
                self.max_attempts,
                delay.as_millis()
            );
        }
        Ok(())
    }

    async fn persist_confirmations(
        &self,
        event: &TrackedEvent,
        confirmations: Option<u64>,
    ) -> Result<(), RepositoryError> {
        if confirmations.is_none() {
            return Ok(());
        }
        self.event_repository
            .update_if_status(
                &event.request_id,
                EventStatus::Pending,
                &EventUpdateRequest {
                    confirmations,
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }
}
