#![forbid(unsafe_code)]

//! Grapheme-cluster helpers.
//!
//! Every length, position and edit range in this crate is measured in
//! extended grapheme clusters, so "é" typed as `e` + combining accent counts
//! as one character, exactly as a user would count it.

use unicode_segmentation::UnicodeSegmentation;

/// Count grapheme clusters in a string.
#[must_use]
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Get byte offset of the nth grapheme cluster.
///
/// Indices at or past the end map to `s.len()`.
#[must_use]
pub fn grapheme_byte_offset(s: &str, grapheme_idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(grapheme_idx)
        .map_or(s.len(), |(i, _)| i)
}

/// Grapheme index of the first occurrence of `needle`, if any.
#[must_use]
pub fn grapheme_find(s: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let byte_idx = s.find(needle)?;
    Some(s[..byte_idx].graphemes(true).count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_graphemes_not_bytes() {
        assert_eq!(grapheme_count(""), 0);
        assert_eq!(grapheme_count("abc"), 3);
        assert_eq!(grapheme_count("café"), 4);
        assert_eq!(grapheme_count("e\u{301}"), 1);
        assert_eq!(grapheme_count("🎉🎉"), 2);
    }

    #[test]
    fn byte_offset_clamps_to_len() {
        assert_eq!(grapheme_byte_offset("héllo", 0), 0);
        assert_eq!(grapheme_byte_offset("héllo", 2), 3);
        assert_eq!(grapheme_byte_offset("héllo", 99), "héllo".len());
    }

    #[test]
    fn find_reports_grapheme_index() {
        assert_eq!(grapheme_find("12.50", "."), Some(2));
        assert_eq!(grapheme_find("é1,5", ","), Some(2));
        assert_eq!(grapheme_find("1250", "."), None);
        assert_eq!(grapheme_find("1250", ""), None);
    }
}
