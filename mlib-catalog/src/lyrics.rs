//! Verse pagination over a song's lyric text
//!
//! Lyrics are stored as plain text where a blank line (`"\n\n"`) separates
//! verses. The split is literal: no trimming and no smarter paragraph
//! detection. Page parameters are lenient here, unlike the catalog listing:
//! anything missing, non-numeric or non-positive falls back to the default.

use serde::Serialize;
use thiserror::Error;

/// Verse separator
pub const VERSE_SEPARATOR: &str = "\n\n";

/// Page used when none (or an unusable one) is supplied
pub const DEFAULT_PAGE: usize = 1;

/// Verses per page used when none (or an unusable count) is supplied
pub const DEFAULT_VERSES_PER_PAGE: usize = 2;

/// Lyric pagination errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LyricsError {
    #[error("Page out of range: page {page} of {total} verses")]
    PageOutOfRange { page: usize, total: usize },
}

/// A window of verses plus the metadata echoed to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersePage {
    pub verses: Vec<String>,
    pub page: usize,
    pub per_page: usize,
    /// Verse count of the whole text, independent of the window
    pub total: usize,
}

/// Split lyric text into verses; empty text has no verses
pub fn split_verses(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(VERSE_SEPARATOR).collect()
}

/// Parse a positive integer, falling back to `default` on any problem
pub fn lenient_positive(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|v| v.parse::<i64>().ok())
        .filter(|v| *v > 0)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Return the verses of `text` on the requested page
///
/// Zero values for `page` or `per_page` are replaced by the defaults. A
/// window starting at or past the verse count is out of range, so an empty
/// text has no valid page.
pub fn paginate_text(text: &str, page: usize, per_page: usize) -> Result<VersePage, LyricsError> {
    let page = if page == 0 { DEFAULT_PAGE } else { page };
    let per_page = if per_page == 0 {
        DEFAULT_VERSES_PER_PAGE
    } else {
        per_page
    };

    let verses = split_verses(text);
    let total = verses.len();

    let start = (page - 1)
        .checked_mul(per_page)
        .filter(|start| *start < total)
        .ok_or(LyricsError::PageOutOfRange { page, total })?;
    let end = start.saturating_add(per_page).min(total);

    Ok(VersePage {
        verses: verses[start..end].iter().map(|v| v.to_string()).collect(),
        page,
        per_page,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIVE_VERSES: &str = "one\nline\n\ntwo\n\nthree\n\nfour\n\nfive";

    #[test]
    fn test_split_on_blank_line() {
        assert_eq!(split_verses("a\nb\n\nc"), vec!["a\nb", "c"]);
        assert_eq!(split_verses("single verse"), vec!["single verse"]);
    }

    #[test]
    fn test_split_is_literal() {
        // three newlines leave the extra one on the following verse
        assert_eq!(split_verses("a\n\n\nb"), vec!["a", "\nb"]);
        // whitespace-only lines are not blank lines
        assert_eq!(split_verses("a\n \nb"), vec!["a\n \nb"]);
        assert_eq!(split_verses("a\n\n"), vec!["a", ""]);
    }

    #[test]
    fn test_empty_text_has_no_verses() {
        assert!(split_verses("").is_empty());
        assert_eq!(
            paginate_text("", 1, 2),
            Err(LyricsError::PageOutOfRange { page: 1, total: 0 })
        );
    }

    #[test]
    fn test_lenient_positive() {
        assert_eq!(lenient_positive(None, 2), 2);
        assert_eq!(lenient_positive(Some(""), 2), 2);
        assert_eq!(lenient_positive(Some("abc"), 2), 2);
        assert_eq!(lenient_positive(Some("0"), 2), 2);
        assert_eq!(lenient_positive(Some("-3"), 1), 1);
        assert_eq!(lenient_positive(Some("4"), 2), 4);
    }

    #[test]
    fn test_default_window_is_first_two_verses() {
        let page = paginate_text(FIVE_VERSES, DEFAULT_PAGE, DEFAULT_VERSES_PER_PAGE).unwrap();
        assert_eq!(page.verses, vec!["one\nline", "two"]);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 2);
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_zero_parameters_use_defaults() {
        let page = paginate_text(FIVE_VERSES, 0, 0).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 2);
        assert_eq!(page.verses.len(), 2);
    }

    #[test]
    fn test_last_partial_page() {
        // ceil(5 / 2) = 3
        let page = paginate_text(FIVE_VERSES, 3, 2).unwrap();
        assert_eq!(page.verses, vec!["five"]);
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_start_at_total_is_out_of_range() {
        assert_eq!(
            paginate_text(FIVE_VERSES, 4, 2),
            Err(LyricsError::PageOutOfRange { page: 4, total: 5 })
        );
        // four verses, page 3 starts exactly at 4
        assert!(paginate_text("a\n\nb\n\nc\n\nd", 3, 2).is_err());
    }

    #[test]
    fn test_huge_page_is_out_of_range() {
        assert!(paginate_text(FIVE_VERSES, usize::MAX, usize::MAX).is_err());
    }

    #[test]
    fn test_serialized_field_names() {
        let page = paginate_text(FIVE_VERSES, 1, 1).unwrap();
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["perPage"], 1);
        assert_eq!(value["total"], 5);
        assert_eq!(value["verses"][0], "one\nline");
    }
}
