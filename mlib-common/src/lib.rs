//! # Music Library Common
//!
//! Shared code for the music library services:
//! - Song model and its JSON wire format
//! - Record store trait with SQLite and in-memory backends
//! - Database initialization and sample catalog seeding
//! - Configuration resolution

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use db::models::{Song, SongDraft};
pub use db::store::{MemorySongStore, SongStore};
pub use error::{Error, Result};
