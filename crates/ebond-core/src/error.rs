//! Error types for the ebond-core library.

use thiserror::Error;

/// Main error type for the ebond library.
#[derive(Error, Debug)]
pub enum EbondError {
    /// Source document could not be read.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Table construction or loading failed.
    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// CSV encoding/decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading the source document.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while building, writing or loading a record table.
#[derive(Error, Debug)]
pub enum TableError {
    /// A denomination cell could not be coerced to one of the known values.
    #[error("row {row}: cannot coerce denomination {value:?}")]
    AmountCoercion { row: usize, value: String },

    /// A date cell does not follow the DD/Mon/YYYY format.
    #[error("row {row}: invalid date {value:?}")]
    InvalidDate { row: usize, value: String },

    /// A row has fewer columns than the header.
    #[error("row {row}: expected 4 columns, found {found}")]
    ShortRow { row: usize, found: usize },

    /// Header row matches neither pipeline variant.
    #[error("unrecognized table header: {0:?}")]
    UnknownHeader(Vec<String>),

    /// Statistics were requested for a table without rows.
    #[error("table has no rows")]
    Empty,
}

/// Result type for the ebond library.
pub type Result<T> = std::result::Result<T, EbondError>;
