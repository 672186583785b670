//! # Repository Module
//!
//! Implements the data persistence layer for the relayer service using the
//! repository pattern. Durable storage is an external collaborator; the core
//! only depends on the traits defined here, with in-memory implementations
//! backing a single-process deployment.

mod event;
pub use event::*;

mod nonce;
pub use nonce::*;
