//! Date-delimited segmentation of page text.

use super::patterns::DATE_PATTERN;

/// A candidate record region within a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Byte offset of the segment start within the page.
    pub start: usize,
    /// Byte offset one past the segment end.
    pub end: usize,
    /// Segment text.
    pub text: &'a str,
}

/// Split page text at every date occurrence.
///
/// Segment `i` runs from the start of date `i` to the start of date `i + 1`;
/// the last segment runs to end of text. Text before the first date is not
/// part of any segment, and a page without dates yields no segments.
pub fn segment_page(text: &str) -> Vec<Segment<'_>> {
    let starts: Vec<usize> = DATE_PATTERN.find_iter(text).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            Segment {
                start,
                end,
                text: &text[start..end],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_dates() {
        assert!(segment_page("").is_empty());
        assert!(segment_page("Sr No. Name Denomination 1,000").is_empty());
    }

    #[test]
    fn test_segments_cover_dates_to_end() {
        let text = "header 01/Jan/2022 A 1,000 02/Feb/2022 B 10,000";
        let segments = segment_page(text);

        let texts: Vec<&str> = segments.iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["01/Jan/2022 A 1,000 ", "02/Feb/2022 B 10,000"]);
        assert_eq!(segments[0].start, 7);
        assert_eq!(segments[1].end, text.len());
    }

    #[test]
    fn test_adjacent_dates() {
        let segments = segment_page("01/Jan/202202/Jan/2022");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "01/Jan/2022");
        assert_eq!(segments[1].text, "02/Jan/2022");
    }
}
