//! Sample catalog used to populate an empty database

use chrono::NaiveDate;
use tracing::info;

use super::models::SongDraft;
use super::store::SongStore;
use crate::{Error, Result};

const SAMPLE_LYRICS: &str = "Test test, this is the first verse.\n\
The melody flows like a gentle breeze.\n\
\n\
Test test, this is the second verse.\n\
The rhythm keeps you on your toes, dancing in the streets.\n\
\n\
Test test, this is the third verse.\n\
We sing out loud under the starry sky.\n\
\n\
Test test, this is the final verse.\n\
The music fades, but the memories remain forever.";

const SAMPLE_SONGS: &[(&str, &str, (i32, u32, u32), &str)] = &[
    ("Muse", "Supermassive Black Hole", (2006, 7, 16), "https://www.youtube.com/watch?v=Xsp3_a-PMTw"),
    ("Radiohead", "Creep", (1992, 9, 21), "https://www.youtube.com/watch?v=d1J5kz5T6Bo"),
    ("Nirvana", "Smells Like Teen Spirit", (1991, 9, 10), "https://www.youtube.com/watch?v=hTWKbfoikeg"),
    ("Queen", "Bohemian Rhapsody", (1975, 10, 31), "https://www.youtube.com/watch?v=fJ9rUzIMcZQ"),
    ("The Beatles", "Hey Jude", (1968, 8, 26), "https://www.youtube.com/watch?v=A_MjCqQoLLA"),
    ("Pink Floyd", "Comfortably Numb", (1979, 11, 30), "https://www.youtube.com/watch?v=JwYX52BP2Sk"),
    ("Led Zeppelin", "Stairway to Heaven", (1971, 11, 8), "https://www.youtube.com/watch?v=QkF3oxziUI4"),
    ("AC/DC", "Back In Black", (1980, 7, 25), "https://www.youtube.com/watch?v=pAgnJDJN4VA"),
    ("The Rolling Stones", "Paint It Black", (1966, 5, 7), "https://www.youtube.com/watch?v=O4irXQhgMqg"),
    ("U2", "With or Without You", (1987, 3, 21), "https://www.youtube.com/watch?v=XmSdTa9kaiQ"),
    ("Metallica", "Enter Sandman", (1991, 7, 29), "https://www.youtube.com/watch?v=CD-E-LDc384"),
    ("Oasis", "Wonderwall", (1995, 10, 30), "https://www.youtube.com/watch?v=bx1Bh8ZvH84"),
];

/// Build the sample catalog: twelve well-known songs plus a four-verse test song
pub fn sample_catalog() -> Result<Vec<SongDraft>> {
    let date = |(y, m, d): (i32, u32, u32)| {
        NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| Error::Internal(format!("invalid sample date {}-{}-{}", y, m, d)))
    };

    let mut drafts = SAMPLE_SONGS
        .iter()
        .map(|&(group, title, ymd, link)| {
            Ok(SongDraft {
                group: group.to_string(),
                title: title.to_string(),
                release_date: date(ymd)?,
                text: "Some lyrics".to_string(),
                link: link.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    drafts.push(SongDraft {
        group: "test".to_string(),
        title: "test".to_string(),
        release_date: date((1995, 10, 30))?,
        text: SAMPLE_LYRICS.to_string(),
        link: "https://www.youtube.com/watch?TESTTEST".to_string(),
    });

    Ok(drafts)
}

/// Insert the sample catalog when the store is empty
///
/// Returns the number of inserted songs (0 when data already existed).
pub async fn seed_sample_catalog(store: &dyn SongStore) -> Result<usize> {
    if store.count().await? > 0 {
        info!("Catalog already has songs, skipping sample data");
        return Ok(0);
    }

    let drafts = sample_catalog()?;
    let inserted = drafts.len();
    for draft in drafts {
        store.insert(draft).await?;
    }

    info!("Inserted {} sample songs", inserted);
    Ok(inserted)
}
