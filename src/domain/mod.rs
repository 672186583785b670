//! # Domain Module
//!
//! Core business logic of the relayer.

mod relay;
pub use relay::*;
