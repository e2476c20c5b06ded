//! Record store abstraction
//!
//! Handlers receive the store as an injected `Arc<dyn SongStore>`, so the
//! SQLite backend can be swapped for [`MemorySongStore`] in tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::models::{Song, SongDraft};
use crate::{time, Error, Result};

/// Persistence contract consumed by the catalog engines
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Full scan in store order
    async fn find_all(&self) -> Result<Vec<Song>>;

    /// Point lookup; `None` when the id is unknown
    async fn find_by_id(&self, id: i64) -> Result<Option<Song>>;

    /// Persist a new song, assigning its id and timestamps
    async fn insert(&self, draft: SongDraft) -> Result<Song>;

    /// Overwrite every mutable column of an existing song in one write
    async fn update(&self, song: &Song) -> Result<()>;

    /// Remove a song by its id
    async fn delete(&self, song: &Song) -> Result<()>;

    /// Number of stored songs
    async fn count(&self) -> Result<i64>;
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    songs: Vec<Song>,
}

/// Vec-backed store that keeps insertion order as scan order
#[derive(Debug, Default)]
pub struct MemorySongStore {
    state: RwLock<MemoryState>,
}

impl MemorySongStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SongStore for MemorySongStore {
    async fn find_all(&self) -> Result<Vec<Song>> {
        Ok(self.state.read().await.songs.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Song>> {
        let state = self.state.read().await;
        Ok(state.songs.iter().find(|s| s.id == id).cloned())
    }

    async fn insert(&self, draft: SongDraft) -> Result<Song> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let song = draft.into_song(state.last_id, time::now());
        state.songs.push(song.clone());
        Ok(song)
    }

    async fn update(&self, song: &Song) -> Result<()> {
        let mut state = self.state.write().await;
        let slot = state
            .songs
            .iter_mut()
            .find(|s| s.id == song.id)
            .ok_or_else(|| Error::NotFound(format!("song {}", song.id)))?;
        *slot = song.clone();
        Ok(())
    }

    async fn delete(&self, song: &Song) -> Result<()> {
        let mut state = self.state.write().await;
        let before = state.songs.len();
        state.songs.retain(|s| s.id != song.id);
        if state.songs.len() == before {
            return Err(Error::NotFound(format!("song {}", song.id)));
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.state.read().await.songs.len() as i64)
    }
}
