mod api;
pub use api::*;

mod provider;
pub use provider::*;

mod relayer;
pub use relayer::*;

mod repository;
pub use repository::*;
