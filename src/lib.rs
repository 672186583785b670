//! Ballot Relayer Library
//!
//! This library provides functionality for relaying signed transactions to an
//! EVM network on behalf of end users (gas-sponsored submission) and for
//! tracking each submission asynchronously until it reaches a sufficient
//! confirmation depth or is abandoned. It includes:
//!
//! - Concurrency-safe nonce allocation for the relayer address
//! - Raw and call-descriptor transaction submission
//! - A recurring confirmation-tracking worker with bounded exponential backoff
//! - Extensible repository and service architecture
//!
//! # Module Structure
//!
//! - `config`: Configuration management
//! - `logging`: Logging setup
//! - `models`: Data structures for relay requests, tracked events and errors
//! - `repositories`: Event and nonce storage
//! - `services`: Blockchain providers and nonce allocation
//! - `domain`: Relay submission logic
//! - `workers`: Background confirmation tracking
//! - `api`: HTTP routes and controllers

pub mod api;
pub mod config;
pub mod constants;
pub mod domain;
pub mod logging;
pub mod models;
pub mod repositories;
pub mod services;
pub mod workers;

pub use models::{ApiError, AppState, DefaultAppState};
