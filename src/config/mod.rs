//! # Config Module
//!
//! Environment-driven configuration for the relayer service.

mod server_config;
pub use server_config::*;
