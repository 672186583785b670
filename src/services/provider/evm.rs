//! EVM provider implementation for interacting with the target ledger.
//!
//! Wraps an HTTP RPC provider. Every call carries a request timeout so a
//! stalled node surfaces as a transport error instead of hanging the caller.

use std::time::Duration;

use alloy::{
    primitives::{Address, TxHash},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::{client::ClientBuilder, types::TransactionRequest},
    transports::http::{Client, Http},
};
use async_trait::async_trait;
use reqwest::ClientBuilder as ReqwestClientBuilder;

use crate::models::{ProviderError, TransactionReceiptData};

#[cfg(test)]
use mockall::automock;

/// Trait defining the ledger interactions the relayer depends on.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EvmProviderTrait: Send + Sync {
    /// Gets the current block number of the chain.
    async fn get_block_number(&self) -> Result<u64, ProviderError>;

    /// Sends a raw signed transaction to the network.
    async fn send_raw_transaction(&self, tx: &[u8]) -> Result<String, ProviderError>;

    /// Sends an unsigned transaction request to the network.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<String, ProviderError>;

    /// Gets a transaction receipt by its hash, if the transaction is known.
    async fn get_transaction_receipt(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TransactionReceiptData>, ProviderError>;

    /// Gets the pending transaction count (next nonce) for an address.
    async fn get_transaction_count(&self, address: &str) -> Result<u64, ProviderError>;

    /// Performs a health check by fetching the latest block number.
    async fn health_check(&self) -> Result<bool, ProviderError>;
}

#[derive(Clone)]
pub struct EvmProvider {
    provider: RootProvider<Http<Client>>,
}

impl EvmProvider {
    pub fn new(url: &str, timeout_seconds: u64) -> Result<Self, ProviderError> {
        let rpc_url = url.parse().map_err(|e| {
            ProviderError::NetworkConfiguration(format!("Invalid URL format: {}", e))
        })?;

        let client = ReqwestClientBuilder::default()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| {
                ProviderError::NetworkConfiguration(format!("Failed to build HTTP client: {}", e))
            })?;

        let mut transport = Http::new(rpc_url);
        transport.set_client(client);

        let is_local = transport.guess_local();
        let rpc_client = ClientBuilder::default().transport(transport, is_local);
        let provider = ProviderBuilder::new().on_client(rpc_client);

        Ok(Self { provider })
    }
}

#[async_trait]
impl EvmProviderTrait for EvmProvider {
    async fn get_block_number(&self) -> Result<u64, ProviderError> {
        self.provider
            .get_block_number()
            .await
            .map_err(ProviderError::from)
    }

    async fn send_raw_transaction(&self, tx: &[u8]) -> Result<String, ProviderError> {
        let pending_tx = self
            .provider
            .send_raw_transaction(tx)
            .await
            .map_err(ProviderError::from)?;
        Ok(pending_tx.tx_hash().to_string())
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<String, ProviderError> {
        let pending_tx = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(ProviderError::from)?;
        Ok(pending_tx.tx_hash().to_string())
    }

    async fn get_transaction_receipt(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TransactionReceiptData>, ProviderError> {
        let hash = tx_hash
            .parse::<TxHash>()
            .map_err(|e| ProviderError::InvalidHash(e.to_string()))?;

        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(ProviderError::from)?;

        Ok(receipt.map(|receipt| TransactionReceiptData {
            block_number: receipt.block_number,
            succeeded: receipt.status(),
        }))
    }

    async fn get_transaction_count(&self, address: &str) -> Result<u64, ProviderError> {
        let address = address
            .parse::<Address>()
            .map_err(|e| ProviderError::InvalidAddress(e.to_string()))?;

        self.provider
            .get_transaction_count(address)
            .pending()
            .await
            .map_err(ProviderError::from)
    }

    async fn health_check(&self) -> Result<bool, ProviderError> {
        self.get_block_number().await.map(|_| true)
    }
}
