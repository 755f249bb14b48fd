//! Plain text dumps with form-feed page breaks (as written by `pdftotext`).

use tracing::debug;

use super::{PageSource, Result};
use crate::error::PdfError;

/// Page separator in text dumps.
pub const PAGE_BREAK: char = '\u{000c}';

/// Page source backed by an already extracted text file.
#[derive(Debug, Default)]
pub struct TextDump {
    pages: Vec<String>,
    max_pages: usize,
}

impl TextDump {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dump directly from page strings.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
            max_pages: 0,
        }
    }

    /// Limit the number of pages returned (0 = unlimited).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}

impl PageSource for TextDump {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let mut pages: Vec<String> = text.split(PAGE_BREAK).map(str::to_string).collect();
        // pdftotext terminates the last page with a break as well
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }

        self.pages = pages;
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn pages(&self) -> Result<Vec<String>> {
        let mut pages = self.pages.clone();

        if self.max_pages > 0 && pages.len() > self.max_pages {
            debug!("Truncating {} pages to {}", pages.len(), self.max_pages);
            pages.truncate(self.max_pages);
        }

        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_on_form_feed() {
        let mut dump = TextDump::new();
        dump.load("page one\u{000c}page two\u{000c}".as_bytes()).unwrap();

        assert_eq!(dump.page_count(), 2);
        assert_eq!(dump.pages().unwrap(), vec!["page one", "page two"]);
    }

    #[test]
    fn test_single_page_without_break() {
        let mut dump = TextDump::new();
        dump.load(b"").unwrap();
        assert_eq!(dump.pages().unwrap(), vec![String::new()]);
    }

    #[test]
    fn test_max_pages_truncates() {
        let mut dump = TextDump::new().with_max_pages(2);
        dump.load("one\u{000c}two\u{000c}three".as_bytes()).unwrap();

        assert_eq!(dump.page_count(), 3);
        assert_eq!(dump.pages().unwrap(), vec!["one", "two"]);

        let dump = TextDump::from_pages(["one"]).with_max_pages(5);
        assert_eq!(dump.pages().unwrap(), vec!["one"]);
    }

    #[test]
    fn test_invalid_utf8() {
        let mut dump = TextDump::new();
        assert!(matches!(
            dump.load(&[0xff, 0xfe, 0x00]),
            Err(PdfError::TextExtraction(_))
        ));
    }
}
