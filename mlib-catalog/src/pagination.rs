//! Catalog filtering and page windowing
//!
//! The full catalog is fetched from the store, narrowed by case-insensitive
//! substring filters on group and title, and then cut into fixed-size pages.
//! No sort is applied: page contents follow store scan order.

use mlib_common::Song;
use thiserror::Error;

/// Default number of songs per catalog page
pub const PAGE_SIZE: usize = 10;

/// Catalog query errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// `page` was supplied but is not an integer
    #[error("Invalid page parameter: {0}")]
    InvalidPage(String),

    /// Window start lies past the end of the filtered set
    #[error("Page out of range: {0}")]
    PageOutOfRange(i64),
}

/// Group/title substring filter
///
/// Empty filter strings impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    group: Option<String>,
    title: Option<String>,
}

impl SongFilter {
    pub fn new(group: Option<&str>, title: Option<&str>) -> Self {
        let normalize = |value: Option<&str>| {
            value
                .filter(|v| !v.is_empty())
                .map(|v| v.to_lowercase())
        };

        Self {
            group: normalize(group),
            title: normalize(title),
        }
    }

    /// Both active filters must match (AND semantics)
    pub fn matches(&self, song: &Song) -> bool {
        let contains = |haystack: &str, needle: &Option<String>| match needle {
            Some(needle) => haystack.to_lowercase().contains(needle.as_str()),
            None => true,
        };

        contains(&song.group, &self.group) && contains(&song.title, &self.title)
    }
}

/// One page of the filtered catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    pub songs: Vec<Song>,
    pub page: i64,
    /// Index of the first returned song within the filtered set
    pub start: usize,
    /// One past the index of the last returned song
    pub end: usize,
    /// Size of the filtered set
    pub total: usize,
}

/// Parse the `page` query parameter
///
/// Absent or empty means page 1; anything else must be an integer.
pub fn parse_page(raw: Option<&str>) -> Result<i64, QueryError> {
    match raw {
        None | Some("") => Ok(1),
        Some(value) => value
            .parse::<i64>()
            .map_err(|_| QueryError::InvalidPage(value.to_string())),
    }
}

/// Filter the catalog and return the requested page
///
/// A page whose start equals the filtered count is a valid empty page; a
/// start beyond the filtered count is out of range.
pub fn query_catalog(
    songs: Vec<Song>,
    filter: &SongFilter,
    page: i64,
    page_size: usize,
) -> Result<CatalogPage, QueryError> {
    let filtered: Vec<Song> = songs.into_iter().filter(|s| filter.matches(s)).collect();
    let total = filtered.len();
    tracing::debug!("Filtered {} songs based on query parameters", total);

    let start = page
        .checked_sub(1)
        .and_then(|p| usize::try_from(p).ok())
        .and_then(|p| p.checked_mul(page_size))
        .ok_or(QueryError::PageOutOfRange(page))?;

    if start > total {
        return Err(QueryError::PageOutOfRange(page));
    }

    let end = start.saturating_add(page_size).min(total);
    tracing::debug!("Returning songs from index {} to {}", start, end);

    let songs = filtered.into_iter().skip(start).take(end - start).collect();

    Ok(CatalogPage {
        songs,
        page,
        start,
        end,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use mlib_common::SongDraft;

    fn song(id: i64, group: &str, title: &str) -> Song {
        SongDraft {
            group: group.to_string(),
            title: title.to_string(),
            release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            text: String::new(),
            link: String::new(),
        }
        .into_song(id, Utc::now())
    }

    fn catalog(n: i64) -> Vec<Song> {
        (1..=n).map(|i| song(i, "Band", &format!("Track {}", i))).collect()
    }

    fn ids(page: &CatalogPage) -> Vec<i64> {
        page.songs.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_parse_page_defaults_and_rejects() {
        assert_eq!(parse_page(None), Ok(1));
        assert_eq!(parse_page(Some("")), Ok(1));
        assert_eq!(parse_page(Some("3")), Ok(3));
        assert_eq!(
            parse_page(Some("two")),
            Err(QueryError::InvalidPage("two".to_string()))
        );
        assert!(parse_page(Some("1.5")).is_err());
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let filter = SongFilter::new(Some("ROLLING"), None);
        assert!(filter.matches(&song(1, "The Rolling Stones", "Paint It Black")));
        assert!(!filter.matches(&song(2, "Radiohead", "Creep")));
    }

    #[test]
    fn test_filter_uses_and_semantics() {
        let songs = vec![
            song(1, "Metallica", "Enter Sandman"),
            song(2, "Metallica", "One"),
            song(3, "U2", "One"),
        ];
        let filter = SongFilter::new(Some("metal"), Some("one"));

        let page = query_catalog(songs, &filter, 1, PAGE_SIZE).unwrap();
        assert_eq!(ids(&page), vec![2]);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let filter = SongFilter::new(Some(""), Some(""));
        assert_eq!(filter, SongFilter::default());

        let page = query_catalog(catalog(5), &filter, 1, PAGE_SIZE).unwrap();
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_second_page_of_twelve() {
        let page = query_catalog(catalog(12), &SongFilter::default(), 2, PAGE_SIZE).unwrap();
        assert_eq!(page.start, 10);
        assert_eq!(page.end, 12);
        assert_eq!(ids(&page), vec![11, 12]);
    }

    #[test]
    fn test_third_page_of_twelve_out_of_range() {
        let result = query_catalog(catalog(12), &SongFilter::default(), 3, PAGE_SIZE);
        assert_eq!(result, Err(QueryError::PageOutOfRange(3)));
    }

    #[test]
    fn test_start_equal_to_count_is_empty_page() {
        // 10 songs, page 2 starts exactly at the end
        let page = query_catalog(catalog(10), &SongFilter::default(), 2, PAGE_SIZE).unwrap();
        assert!(page.songs.is_empty());
        assert_eq!(page.start, 10);
        assert_eq!(page.end, 10);
    }

    #[test]
    fn test_start_one_past_count_is_error() {
        // page size 1 makes start == count + 1 reachable
        let empty = query_catalog(catalog(3), &SongFilter::default(), 4, 1).unwrap();
        assert!(empty.songs.is_empty());

        let result = query_catalog(catalog(3), &SongFilter::default(), 5, 1);
        assert_eq!(result, Err(QueryError::PageOutOfRange(5)));
    }

    #[test]
    fn test_empty_catalog_first_page() {
        let page = query_catalog(Vec::new(), &SongFilter::default(), 1, PAGE_SIZE).unwrap();
        assert!(page.songs.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_non_positive_page_out_of_range() {
        assert_eq!(
            query_catalog(catalog(3), &SongFilter::default(), 0, PAGE_SIZE),
            Err(QueryError::PageOutOfRange(0))
        );
        assert_eq!(
            query_catalog(catalog(3), &SongFilter::default(), -4, PAGE_SIZE),
            Err(QueryError::PageOutOfRange(-4))
        );
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let result = query_catalog(catalog(3), &SongFilter::default(), i64::MAX, PAGE_SIZE);
        assert_eq!(result, Err(QueryError::PageOutOfRange(i64::MAX)));
    }

    #[test]
    fn test_preserves_store_order() {
        let songs = vec![song(9, "B", "x"), song(2, "A", "x"), song(5, "C", "x")];
        let page = query_catalog(songs, &SongFilter::default(), 1, PAGE_SIZE).unwrap();
        assert_eq!(ids(&page), vec![9, 2, 5]);
    }
}
