//! Source document reading: one text block per page.

mod extractor;
mod text;

pub use extractor::PdfExtractor;
pub use text::{TextDump, PAGE_BREAK};

use crate::error::PdfError;

/// Result type for document reading.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A source of page texts, in page order.
///
/// Page strings may be empty or contain extraction artifacts.
pub trait PageSource {
    /// Load a document from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Number of pages in the loaded document.
    fn page_count(&self) -> usize;

    /// Text of every page, in order.
    fn pages(&self) -> Result<Vec<String>>;
}
