//! # Workers Module
//!
//! Background processing for submitted transactions.

mod backoff;
pub use backoff::*;

mod confirmation;
pub use confirmation::*;
