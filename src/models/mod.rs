//! # Models Module
//!
//! Contains core data structures and type definitions for the relayer service.

mod api_response;
pub use api_response::*;

mod app_state;
pub use app_state::*;

mod error;
pub use error::*;

mod event;
pub use event::*;

mod receipt;
pub use receipt::*;

mod relay;
pub use relay::*;
