//! Database models, store backends and initialization

pub mod init;
pub mod models;
pub mod seed;
pub mod songs;
pub mod store;

pub use init::*;
pub use models::*;
pub use seed::*;
pub use songs::SqliteSongStore;
pub use store::*;
