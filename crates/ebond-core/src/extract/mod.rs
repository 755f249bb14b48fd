//! Record extraction from page text.
//!
//! Records in disclosure PDFs have no field delimiters once converted to
//! text. Each record starts with its date, so every date occurrence opens a
//! new candidate segment; the first date and the first denomination inside
//! a segment form the record and whatever text remains is the entity name.

mod extractor;
pub mod patterns;
mod segment;

pub use extractor::{check_page, DropReason, ExtractionReport, PageMismatch, RecordExtractor};
pub use segment::{segment_page, Segment};
