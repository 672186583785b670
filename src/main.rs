//! # Ballot Relayer
//!
//! A gas-sponsored transaction relayer for EVM networks. End users submit
//! signed transactions (or call descriptors) over HTTP; the relayer forwards
//! them to the ledger under its own nonce sequence and tracks each submission
//! in the background until it reaches the required confirmation depth or its
//! retry budget is exhausted.
//!
//! ## Architecture
//!
//! The service is built using Actix-web and provides:
//! - HTTP endpoints for relay submission and status polling
//! - In-memory repository implementations
//! - A recurring confirmation-tracking worker
//!
//! ## Usage
//!
//! ```bash
//! RPC_URL=... RELAYER_ADDRESS=... cargo run
//! ```

use std::sync::Arc;
use std::time::Duration;

use actix_web::{
    middleware::{self, Logger},
    web, App, HttpServer,
};
use color_eyre::{eyre::WrapErr, Result};
use dotenvy::dotenv;
use log::info;
use tokio::sync::watch;

use ballot_relayer::{
    api, config::ServerConfig, domain::RelaySubmitter, logging::setup_logging, models::AppState,
    repositories::{InMemoryEventRepository, InMemoryNonceStore}, services::{EvmProvider, NonceManager},
    workers::{BackoffPolicy, ConfirmationTracker},
};

#[actix_web::main]
async fn main() -> Result<()> {
    // Initialize error reporting with eyre
    color_eyre::install().wrap_err("Failed to initialize error reporting")?;

    dotenv().ok();
    setup_logging();

    let config = ServerConfig::from_env();

    let provider = Arc::new(
        EvmProvider::new(&config.rpc_url, config.rpc_timeout_seconds)
            .wrap_err("Failed to initialize ledger provider")?,
    );
    let nonce_manager = Arc::new(NonceManager::new(
        Arc::clone(&provider),
        Arc::new(InMemoryNonceStore::new()),
    ));
    let event_repository = Arc::new(InMemoryEventRepository::new());

    let relayer = Arc::new(RelaySubmitter::new(
        Arc::clone(&provider),
        nonce_manager,
        Arc::clone(&event_repository),
        config.relayer_address.clone(),
        config.chain_id,
    ));

    let tracker = Arc::new(ConfirmationTracker::new(
        Arc::clone(&provider),
        Arc::clone(&event_repository),
        BackoffPolicy::new(
            Duration::from_millis(config.backoff_base_ms),
            Duration::from_millis(config.backoff_max_ms),
            config.backoff_jitter,
        ),
        config.required_confirmations,
        config.worker_max_attempts,
        config.worker_batch_size,
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let tracker_handle = tokio::spawn(tracker.run(
        Duration::from_millis(config.poll_interval_ms),
        shutdown_rx,
    ));

    let app_state = AppState::new(relayer, event_repository);

    info!("Starting server on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            .wrap(Logger::default())
            .app_data(web::ThinData(app_state.clone()))
            .service(web::scope("/api/v1").configure(api::routes::configure_routes))
    })
    .bind((config.host.as_str(), config.port))
    .wrap_err_with(|| format!("Failed to bind server to {}:{}", config.host, config.port))?
    .shutdown_timeout(5)
    .run()
    .await
    .wrap_err("Server runtime error")?;

    // Let the tracker drain its in-flight cycle before exiting.
    let _ = shutdown_tx.send(true);
    tracker_handle
        .await
        .wrap_err("Confirmation tracker task panicked")?;

    Ok(())
}
