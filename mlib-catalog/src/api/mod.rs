//! HTTP API handlers for mlib-catalog

pub mod health;
pub mod params;
pub mod songs;
pub mod text;

pub use health::health_routes;
pub use songs::{add_song, delete_song, edit_song, list_songs};
pub use text::get_song_text;
