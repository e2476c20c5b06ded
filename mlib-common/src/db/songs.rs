//! SQLite-backed song store

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use super::models::{Song, SongDraft};
use super::store::SongStore;
use crate::{time, Error, Result};

const SONG_COLUMNS: &str =
    "id, group_name, title, release_date, text, link, created_at, updated_at";

/// Song store on top of a shared SQLite pool
#[derive(Debug, Clone)]
pub struct SqliteSongStore {
    pool: SqlitePool,
}

impl SqliteSongStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_song(row: &SqliteRow) -> Result<Song> {
    Ok(Song {
        id: row.try_get("id")?,
        group: row.try_get("group_name")?,
        title: row.try_get("title")?,
        release_date: row.try_get("release_date")?,
        text: row.try_get("text")?,
        link: row.try_get("link")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl SongStore for SqliteSongStore {
    /// No ORDER BY: results come back in SQLite scan order
    async fn find_all(&self) -> Result<Vec<Song>> {
        let rows = sqlx::query(&format!("SELECT {} FROM songs", SONG_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_song).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Song>> {
        let row = sqlx::query(&format!("SELECT {} FROM songs WHERE id = ?", SONG_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_song).transpose()
    }

    async fn insert(&self, draft: SongDraft) -> Result<Song> {
        let created_at = time::now();

        let result = sqlx::query(
            r#"
            INSERT INTO songs (group_name, title, release_date, text, link, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&draft.group)
        .bind(&draft.title)
        .bind(draft.release_date)
        .bind(&draft.text)
        .bind(&draft.link)
        .bind(created_at)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(draft.into_song(result.last_insert_rowid(), created_at))
    }

    async fn update(&self, song: &Song) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE songs
            SET group_name = ?, title = ?, release_date = ?, text = ?, link = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&song.group)
        .bind(&song.title)
        .bind(song.release_date)
        .bind(&song.text)
        .bind(&song.link)
        .bind(song.updated_at)
        .bind(song.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("song {}", song.id)));
        }
        Ok(())
    }

    async fn delete(&self, song: &Song) -> Result<()> {
        let result = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(song.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("song {}", song.id)));
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
