//! Core library for electoral bond disclosure processing.
//!
//! This crate provides:
//! - Page text reading from disclosure PDFs (and plain text dumps)
//! - Record extraction: date-delimited segmentation of page text into
//!   `(date, name, denomination)` records with per-page consistency checks
//! - The serial-numbered CSV table written for each pipeline variant
//! - Descriptive statistics and time-series aggregation over loaded tables

pub mod error;
pub mod models;
pub mod pdf;
pub mod extract;
pub mod table;
pub mod analytics;

pub use error::{EbondError, Result};
pub use models::record::{Denomination, ExtractedRecord, Record, Variant};
pub use pdf::{PageSource, PdfExtractor, TextDump};
pub use extract::{ExtractionReport, PageMismatch, RecordExtractor};
pub use table::{Table, TableCache, TableWriter};
pub use analytics::{EntityFilter, Summary};
