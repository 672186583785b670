pub mod evm;
pub use evm::*;

pub use crate::models::ProviderError;
