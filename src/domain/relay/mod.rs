//! Relay submission logic.
//!
//! `RelaySubmitter` validates a relay request, reserves a nonce for the
//! relayer address, submits the transaction and enqueues exactly one pending
//! `TrackedEvent` per successful submission. Submission is not retried here;
//! only the confirmation tracker retries, and only for queries. A nonce
//! consumed by a failed submission stays burned.

use std::sync::Arc;

use log::{info, warn};

use crate::models::{RelayRequest, RelayResponse, RelayerError, TrackedEvent};
use crate::repositories::EventRepositoryTrait;
use crate::services::{EvmProviderTrait, NonceManagerTrait, ProviderError};

pub struct RelaySubmitter<P, N, E> {
    provider: Arc<P>,
    nonce_manager: Arc<N>,
    event_repository: Arc<E>,
    relayer_address: String,
    chain_id: u64,
}

impl<P, N, E> RelaySubmitter<P, N, E>
where
    P: EvmProviderTrait,
    N: NonceManagerTrait,
    E: EventRepositoryTrait,
{
    pub fn new(
        provider: Arc<P>,
        nonce_manager: Arc<N>,
        event_repository: Arc<E>,
        relayer_address: String,
        chain_id: u64,
    ) -> Self {
        Self {
            provider,
            nonce_manager,
            event_repository,
            relayer_address,
            chain_id,
        }
    }

    /// Submits a relay request and returns synchronously once the
    /// transaction has been handed to the ledger and its tracking event is
    /// persisted. The eventual fate of the transaction is only observable
    /// through the event's status.
    pub async fn submit(&self, request: RelayRequest) -> Result<RelayResponse, RelayerError> {
        request.validate()?;

        if request.chain_id != self.chain_id {
            return Err(RelayerError::InvalidRequest(format!(
                "request targets chain {} but the relayer serves chain {}",
                request.chain_id, self.chain_id
            )));
        }

        // Decode before reserving so a bad payload never consumes a nonce.
        let raw_payload = request
            .signed_tx
            .as_ref()
            .map(|_| request.signed_payload())
            .transpose()?;

        let nonce = self.nonce_manager.reserve_nonce(&self.relayer_address).await?;

        let submission = match (&raw_payload, &request.call) {
            (Some(payload), _) => self.provider.send_raw_transaction(payload).await,
            (None, Some(call)) => {
                let tx =
                    call.to_transaction_request(&self.relayer_address, nonce, request.chain_id)?;
                self.provider.send_transaction(tx).await
            }
            // validate() guarantees one payload form is present
            (None, None) => {
                return Err(RelayerError::InvalidRequest(
                    "request carries no payload".to_string(),
                ))
            }
        };

        let transaction_hash = submission.map_err(|err| {
            warn!(
                "Submission failed for poll {} (nonce {} burned): {}",
                request.poll_id, nonce, err
            );
            self.map_submission_error(err)
        })?;

        let event = self
            .event_repository
            .create(TrackedEvent::new(
                transaction_hash.clone(),
                request.poll_id.clone(),
            ))
            .await?;

        info!(
            "[{}] Relayed tx {} for poll {} with nonce {}",
            event.request_id, transaction_hash, request.poll_id, nonce
        );

        Ok(RelayResponse {
            request_id: event.request_id,
            transaction_hash,
            nonce,
        })
    }

    fn map_submission_error(&self, err: ProviderError) -> RelayerError {
        match err {
            ProviderError::Rejected(reason) if reason.to_lowercase().contains("nonce") => {
                RelayerError::NonceConflict {
                    address: self.relayer_address.clone(),
                    reason,
                }
            }
            other => RelayerError::SubmissionFailed(other.to_string()),
        }
    }
}
