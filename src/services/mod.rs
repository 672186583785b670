//! # Services Module
//!
//! Blockchain access and nonce allocation.

mod nonce;
pub use nonce::*;

mod provider;
pub use provider::*;
