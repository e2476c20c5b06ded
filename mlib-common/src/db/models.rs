//! Database models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalog entry as persisted and as returned to clients
///
/// Wire names follow the public API: the title travels as `song` and the
/// date as `releaseDate` (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Store-assigned identifier, never reused
    pub id: i64,
    /// Performing artist or band
    pub group: String,
    #[serde(rename = "song")]
    pub title: String,
    #[schema(example = "2006-07-16")]
    pub release_date: NaiveDate,
    /// Lyrics; verses are separated by a blank line
    pub text: String,
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Song contents before the store assigns an id and timestamps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongDraft {
    pub group: String,
    pub title: String,
    pub release_date: NaiveDate,
    pub text: String,
    pub link: String,
}

impl SongDraft {
    /// Materialize the draft into a stored song
    pub fn into_song(self, id: i64, created_at: DateTime<Utc>) -> Song {
        Song {
            id,
            group: self.group,
            title: self.title,
            release_date: self.release_date,
            text: self.text,
            link: self.link,
            created_at,
            updated_at: created_at,
        }
    }
}
