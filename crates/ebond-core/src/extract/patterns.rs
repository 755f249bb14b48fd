//! Regex patterns for record extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // DD/Mon/YYYY with a 20xx year, e.g. 12/Apr/2019
    pub static ref DATE_PATTERN: Regex = Regex::new(
        r"\d{2}/[A-Za-z]{3}/20\d{2}"
    ).unwrap();

    // Denominations with Indian digit grouping. Alternation is leftmost-first,
    // so the order of the literals matters for overlapping prefixes.
    pub static ref DENOMINATION_PATTERN: Regex = Regex::new(
        r"(1,000|10,000|1,00,000|10,00,000|1,00,00,000|10,00,00,000)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_date_pattern() {
        assert!(DATE_PATTERN.is_match("12/Apr/2019"));
        assert!(DATE_PATTERN.is_match("xx01/jan/2024yy"));
        assert!(!DATE_PATTERN.is_match("12/Apr/1999"));
        assert!(!DATE_PATTERN.is_match("1/Apr/2019"));
        assert!(!DATE_PATTERN.is_match("12/04/2019"));
    }

    #[test]
    fn test_denomination_pattern_prefers_full_literal() {
        let found: Vec<&str> = DENOMINATION_PATTERN
            .find_iter("1,000 10,00,000 1,00,00,000 10,00,00,000")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["1,000", "10,00,000", "1,00,00,000", "10,00,00,000"]);
    }

    #[test]
    fn test_denomination_pattern_unanchored() {
        // No word boundaries: a longer number still yields an embedded match
        let m = DENOMINATION_PATTERN.find("21,000").unwrap();
        assert_eq!(m.as_str(), "1,000");
        assert_eq!(m.start(), 1);
    }
}
