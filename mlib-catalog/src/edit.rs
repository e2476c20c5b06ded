//! Partial song updates
//!
//! An edit request names the fields to touch (`paramsToEdit=group,text`)
//! and carries a flat JSON object of string values. The request is first
//! turned into a [`SongPatch`]; only a fully valid patch is applied, to a
//! copy of the record, which the caller then persists in a single write.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use mlib_common::{time, Song};
use thiserror::Error;

/// Edit errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// No field names supplied
    #[error("Missing paramsToEdit parameter")]
    MissingFields,

    /// `releaseDate` is not `YYYY-MM-DD`
    #[error("Invalid releaseDate format. Use YYYY-MM-DD (got {0:?})")]
    InvalidReleaseDate(String),
}

/// Fields an edit is allowed to touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableField {
    Group,
    Title,
    ReleaseDate,
    Text,
    Link,
}

impl EditableField {
    /// Look up a field by its wire name; matching is exact
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "group" => Some(Self::Group),
            "song" => Some(Self::Title),
            "releaseDate" => Some(Self::ReleaseDate),
            "text" => Some(Self::Text),
            "link" => Some(Self::Link),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Title => "song",
            Self::ReleaseDate => "releaseDate",
            Self::Text => "text",
            Self::Link => "link",
        }
    }
}

/// Split the comma-separated field list
///
/// Names are kept verbatim; unknown ones are dropped later by
/// [`SongPatch::from_payload`].
pub fn parse_field_list(raw: Option<&str>) -> Result<Vec<&str>, EditError> {
    match raw {
        None | Some("") => Err(EditError::MissingFields),
        Some(list) => Ok(list.split(',').collect()),
    }
}

/// Set of optional field replacements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongPatch {
    pub group: Option<String>,
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub text: Option<String>,
    pub link: Option<String>,
}

impl SongPatch {
    /// Build a patch from the requested field names and the request payload
    ///
    /// Unknown field names are ignored. A requested field missing from the
    /// payload is set to the empty string (and so fails date parsing for
    /// `releaseDate`).
    pub fn from_payload(
        field_names: &[&str],
        payload: &HashMap<String, String>,
    ) -> Result<Self, EditError> {
        let mut patch = Self::default();

        for field in field_names.iter().filter_map(|name| EditableField::from_name(name)) {
            let value = payload
                .get(field.name())
                .map(String::as_str)
                .unwrap_or_default();

            match field {
                EditableField::Group => patch.group = Some(value.to_string()),
                EditableField::Title => patch.title = Some(value.to_string()),
                EditableField::ReleaseDate => {
                    let date = time::parse_iso_date(value)
                        .ok_or_else(|| EditError::InvalidReleaseDate(value.to_string()))?;
                    patch.release_date = Some(date);
                }
                EditableField::Text => patch.text = Some(value.to_string()),
                EditableField::Link => patch.link = Some(value.to_string()),
            }
        }

        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Produce the edited copy of `song`, stamped with `now`
    ///
    /// `updated_at` never moves before `created_at`.
    pub fn apply(&self, song: &Song, now: DateTime<Utc>) -> Song {
        let mut updated = song.clone();

        if let Some(group) = &self.group {
            updated.group = group.clone();
        }
        if let Some(title) = &self.title {
            updated.title = title.clone();
        }
        if let Some(date) = self.release_date {
            updated.release_date = date;
        }
        if let Some(text) = &self.text {
            updated.text = text.clone();
        }
        if let Some(link) = &self.link {
            updated.link = link.clone();
        }

        updated.updated_at = now.max(song.created_at);
        updated
    }
}

/// Validate the edit request and return the updated record
///
/// Nothing is mutated on error; the original `song` is never modified.
pub fn apply_edit(
    song: &Song,
    field_names: &[&str],
    payload: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> Result<Song, EditError> {
    let patch = SongPatch::from_payload(field_names, payload)?;
    Ok(patch.apply(song, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mlib_common::SongDraft;

    fn song() -> Song {
        let created = "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        SongDraft {
            group: "Radiohead".to_string(),
            title: "Creep".to_string(),
            release_date: NaiveDate::from_ymd_opt(1992, 9, 21).unwrap(),
            text: "When you were here before".to_string(),
            link: "https://www.youtube.com/watch?v=d1J5kz5T6Bo".to_string(),
        }
        .into_song(2, created)
    }

    fn payload(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn later(song: &Song) -> DateTime<Utc> {
        song.created_at + Duration::hours(1)
    }

    #[test]
    fn test_parse_field_list() {
        assert_eq!(parse_field_list(None), Err(EditError::MissingFields));
        assert_eq!(parse_field_list(Some("")), Err(EditError::MissingFields));
        assert_eq!(
            parse_field_list(Some("group,releaseDate")).unwrap(),
            vec!["group", "releaseDate"]
        );
        // no trimming
        assert_eq!(parse_field_list(Some("group, song")).unwrap(), vec!["group", " song"]);
    }

    #[test]
    fn test_field_names_round_trip() {
        for name in ["group", "song", "releaseDate", "text", "link"] {
            assert_eq!(EditableField::from_name(name).unwrap().name(), name);
        }
        assert_eq!(EditableField::from_name("title"), None);
        assert_eq!(EditableField::from_name("Group"), None);
    }

    #[test]
    fn test_only_named_fields_change() {
        let original = song();
        let body = payload(&[("group", "Thom Yorke"), ("text", "ignored")]);

        let updated = apply_edit(&original, &["group"], &body, later(&original)).unwrap();

        assert_eq!(updated.group, "Thom Yorke");
        assert_eq!(updated.text, original.text);
        assert_eq!(updated.title, original.title);
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
    }

    #[test]
    fn test_all_fields() {
        let original = song();
        let body = payload(&[
            ("group", "Muse"),
            ("song", "Uprising"),
            ("releaseDate", "2009-09-07"),
            ("text", "Paranoia is in bloom"),
            ("link", "https://example.com/uprising"),
        ]);
        let fields = parse_field_list(Some("group,song,releaseDate,text,link")).unwrap();

        let updated = apply_edit(&original, &fields, &body, later(&original)).unwrap();

        assert_eq!(updated.group, "Muse");
        assert_eq!(updated.title, "Uprising");
        assert_eq!(updated.release_date, NaiveDate::from_ymd_opt(2009, 9, 7).unwrap());
        assert_eq!(updated.text, "Paranoia is in bloom");
        assert_eq!(updated.link, "https://example.com/uprising");
    }

    #[test]
    fn test_unknown_field_only_bumps_timestamp() {
        let original = song();
        let now = later(&original);

        let updated =
            apply_edit(&original, &["bogusField"], &payload(&[("bogusField", "x")]), now).unwrap();

        assert_eq!(updated.updated_at, now);
        let mut expected = original.clone();
        expected.updated_at = now;
        assert_eq!(updated, expected);
    }

    #[test]
    fn test_invalid_release_date_rejects_whole_edit() {
        let original = song();
        let body = payload(&[("group", "Changed"), ("releaseDate", "21.09.1992")]);

        let result = apply_edit(&original, &["group", "releaseDate"], &body, later(&original));

        assert_eq!(
            result,
            Err(EditError::InvalidReleaseDate("21.09.1992".to_string()))
        );
    }

    #[test]
    fn test_missing_payload_key_reads_as_empty() {
        let original = song();

        let updated = apply_edit(&original, &["link"], &HashMap::new(), later(&original)).unwrap();
        assert_eq!(updated.link, "");

        let result = apply_edit(&original, &["releaseDate"], &HashMap::new(), later(&original));
        assert_eq!(result, Err(EditError::InvalidReleaseDate(String::new())));
    }

    #[test]
    fn test_updated_at_not_before_created_at() {
        let original = song();
        let earlier = original.created_at - Duration::days(1);

        let updated = apply_edit(&original, &["text"], &payload(&[("text", "x")]), earlier).unwrap();
        assert_eq!(updated.updated_at, original.created_at);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(SongPatch::default().is_empty());
        let patch = SongPatch::from_payload(&["bogus"], &HashMap::new()).unwrap();
        assert!(patch.is_empty());
        let patch = SongPatch::from_payload(&["text"], &HashMap::new()).unwrap();
        assert!(!patch.is_empty());
    }
}
