//! Parsing of page-skip lists
//!
//! A skip list names the 1-based pages that should be left out of the output,
//! as a comma-separated sequence of single page numbers and inclusive ranges,
//! e.g. `"1-3,9"` skips pages 1, 2, 3 and 9.

use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Parse a skip list into a set of 1-based page numbers.
///
/// An empty or whitespace-only string yields an empty set (no pages skipped).
/// Whitespace around individual tokens is tolerated, so `"1-3, 9"` parses the
/// same as `"1-3,9"`. A reversed range like `"9-5"` contributes no pages.
/// Anything else that is not an unsigned integer or an `a-b` range is an
/// error, raised before any page is processed.
pub fn parse_offset_list(list: &str) -> Result<BTreeSet<u32>> {
    let mut offsets = BTreeSet::new();

    if list.trim().is_empty() {
        return Ok(offsets);
    }

    for token in list.split(',') {
        let token = token.trim();

        if let Some((start, end)) = token.split_once('-') {
            let start = parse_page_number(start.trim(), token)?;
            let end = parse_page_number(end.trim(), token)?;
            offsets.extend(start..=end);
        } else {
            offsets.insert(parse_page_number(token, token)?);
        }
    }

    Ok(offsets)
}

fn parse_page_number(text: &str, token: &str) -> Result<u32> {
    text.parse::<u32>()
        .map_err(|_| Error::InvalidOffsetList(format!("bad token '{}'", token)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_and_single() {
        let offsets = parse_offset_list("1-3,9").unwrap();
        assert_eq!(offsets, BTreeSet::from([1, 2, 3, 9]));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_offset_list("").unwrap().is_empty());
        assert!(parse_offset_list("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_single_page() {
        let offsets = parse_offset_list("5").unwrap();
        assert_eq!(offsets, BTreeSet::from([5]));
    }

    #[test]
    fn test_parse_tolerates_spaces() {
        let offsets = parse_offset_list("1-3, 9").unwrap();
        assert_eq!(offsets, BTreeSet::from([1, 2, 3, 9]));
    }

    #[test]
    fn test_parse_overlapping_tokens() {
        let offsets = parse_offset_list("2,1-3,3").unwrap();
        assert_eq!(offsets, BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn test_parse_reversed_range_is_empty() {
        let offsets = parse_offset_list("9-5").unwrap();
        assert!(offsets.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(matches!(
            parse_offset_list("abc"),
            Err(Error::InvalidOffsetList(_))
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_range() {
        assert!(parse_offset_list("1-2-3").is_err());
        assert!(parse_offset_list("1-").is_err());
        assert!(parse_offset_list("-3").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_token() {
        assert!(parse_offset_list("1,,3").is_err());
    }
}
