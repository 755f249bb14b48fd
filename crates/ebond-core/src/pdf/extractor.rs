//! PDF page text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{PageSource, Result};
use crate::error::PdfError;

/// PDF page text extractor.
pub struct PdfExtractor {
    raw_data: Vec<u8>,
    page_count: usize,
    try_empty_password: bool,
    max_pages: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            raw_data: Vec::new(),
            page_count: 0,
            try_empty_password: true,
            max_pages: 0,
        }
    }

    /// Set whether encrypted documents are retried with an empty password.
    pub fn with_empty_password(mut self, enabled: bool) -> Self {
        self.try_empty_password = enabled;
        self
    }

    /// Limit the number of pages returned (0 = unlimited).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSource for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if !self.try_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.page_count = page_count;
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.page_count
    }

    fn pages(&self) -> Result<Vec<String>> {
        if self.raw_data.is_empty() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        let mut pages = pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

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
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};
    use pretty_assertions::assert_eq;

    /// Build a PDF with one line of Courier text per page.
    fn build_pdf(lines: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for line in lines {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![50.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => Object::Array(vec![0.into(), 0.into(), 595.into(), 842.into()]),
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut data = Vec::new();
        doc.save_to(&mut data).unwrap();
        data
    }

    const LINES: [&str; 3] = [
        "01/Jan/2022 PARTY X 1,000",
        "02/Feb/2022 PARTY Y 10,00,000",
        "03/Mar/2022 PARTY Z 1,00,000",
    ];

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert_eq!(extractor.page_count(), 0);
        assert!(matches!(extractor.pages(), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        let result = extractor.load(b"not a pdf at all");
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_pages_in_document_order() {
        let mut extractor = PdfExtractor::new();
        extractor.load(&build_pdf(&LINES)).unwrap();

        assert_eq!(extractor.page_count(), 3);
        let pages = extractor.pages().unwrap();
        assert_eq!(pages.len(), 3);
        for (page, line) in pages.iter().zip(LINES) {
            assert_eq!(page.trim(), line);
        }
    }

    #[test]
    fn test_max_pages_truncates() {
        let mut extractor = PdfExtractor::new().with_max_pages(2);
        extractor.load(&build_pdf(&LINES)).unwrap();

        // The document size is still reported in full
        assert_eq!(extractor.page_count(), 3);
        let pages = extractor.pages().unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].trim(), LINES[1]);
    }
}
