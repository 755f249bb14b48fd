//! Page-by-page record extraction with consistency diagnostics.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::patterns::{DATE_PATTERN, DENOMINATION_PATTERN};
use super::segment::segment_page;
use crate::models::config::{ExtractionConfig, NameCleanup};
use crate::models::record::ExtractedRecord;

/// A page whose date and denomination counts differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMismatch {
    /// Page number (1-indexed).
    pub page: usize,
    /// Date matches on the page.
    pub dates: usize,
    /// Denomination matches on the page.
    pub denominations: usize,
}

/// Why a segment produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// No date inside the segment.
    NoDate,
    /// No denomination inside the segment.
    NoDenomination,
}

/// Output of a full extraction run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionReport {
    /// Records in page order, then position-within-page order.
    pub records: Vec<ExtractedRecord>,
    /// Number of pages scanned.
    pub pages: usize,
    /// Pages failing the date/denomination count check.
    pub mismatches: Vec<PageMismatch>,
    /// Pages without any date match (1-indexed).
    pub empty_pages: Vec<usize>,
    /// Segments discarded for lacking a date or denomination match. Calendar
    /// validity is not checked here, so an impossible date still yields a record.
    pub dropped_segments: usize,
}

/// Extracts bond records from page text.
pub struct RecordExtractor {
    name_cleanup: NameCleanup,
    warn_on_mismatch: bool,
}

impl RecordExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self {
            name_cleanup: NameCleanup::AllOccurrences,
            warn_on_mismatch: true,
        }
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_name_cleanup(config.name_cleanup)
            .with_mismatch_warnings(config.warn_on_mismatch)
    }

    /// Set the entity name cleanup mode.
    pub fn with_name_cleanup(mut self, cleanup: NameCleanup) -> Self {
        self.name_cleanup = cleanup;
        self
    }

    /// Set whether count mismatches are logged as warnings.
    pub fn with_mismatch_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_mismatch = enabled;
        self
    }

    /// Extract records from all pages in order.
    pub fn extract_pages<S: AsRef<str>>(&self, pages: &[S]) -> ExtractionReport {
        let mut report = ExtractionReport::default();

        for (i, page) in pages.iter().enumerate() {
            self.extract_page(i + 1, page.as_ref(), &mut report);
        }

        info!(
            pages = report.pages,
            records = report.records.len(),
            mismatches = report.mismatches.len(),
            "Extraction complete"
        );
        report
    }

    /// Extract records from one page, appending to `report`.
    pub fn extract_page(&self, page: usize, text: &str, report: &mut ExtractionReport) {
        report.pages += 1;

        if let Some(mismatch) = check_page(page, text) {
            if self.warn_on_mismatch {
                warn!(
                    page = mismatch.page,
                    dates = mismatch.dates,
                    denominations = mismatch.denominations,
                    "Date/denomination count mismatch"
                );
            }
            report.mismatches.push(mismatch);
        }

        let segments = segment_page(text);
        if segments.is_empty() {
            debug!(page, "No dates on page");
            report.empty_pages.push(page);
            return;
        }

        let before = report.records.len();
        for segment in segments {
            match self.extract_segment(segment.text) {
                Ok(record) => report.records.push(record),
                Err(reason) => {
                    debug!(page, offset = segment.start, ?reason, "Dropped segment");
                    report.dropped_segments += 1;
                }
            }
        }

        debug!(page, records = report.records.len() - before, "Page completed");
    }

    /// Turn one candidate segment into a record.
    pub fn extract_segment(&self, segment: &str) -> Result<ExtractedRecord, DropReason> {
        let date_match = DATE_PATTERN.find(segment).ok_or(DropReason::NoDate)?;
        let amount_match = DENOMINATION_PATTERN
            .find(segment)
            .ok_or(DropReason::NoDenomination)?;

        let date_text = date_match.as_str();
        let amount_text = amount_match.as_str();

        let name = match self.name_cleanup {
            NameCleanup::AllOccurrences => segment.replace(date_text, "").replace(amount_text, ""),
            NameCleanup::FirstOccurrence => segment
                .replacen(date_text, "", 1)
                .replacen(amount_text, "", 1),
        };

        Ok(ExtractedRecord::new(date_text, name.trim(), amount_text))
    }
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare date and denomination counts over a whole page.
pub fn check_page(page: usize, text: &str) -> Option<PageMismatch> {
    let dates = DATE_PATTERN.find_iter(text).count();
    let denominations = DENOMINATION_PATTERN.find_iter(text).count();

    (dates != denominations).then_some(PageMismatch {
        page,
        dates,
        denominations,
    })
}
