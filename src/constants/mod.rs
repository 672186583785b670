//! This module contains all the constant values used in the system
mod relayer;
pub use relayer::*;

mod worker;
pub use worker::*;
