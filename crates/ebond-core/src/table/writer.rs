//! Table sink: writes records as a serial-numbered CSV file.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Result, TableError};
use crate::models::record::{Denomination, ExtractedRecord, Variant};

/// Writes record tables for one pipeline variant.
pub struct TableWriter {
    variant: Variant,
    delimiter: u8,
}

impl TableWriter {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            delimiter: b',',
        }
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write the table to `writer`, returning the number of rows.
    ///
    /// Dates are written as matched. Every amount is coerced before anything
    /// is written, so a coercion failure leaves the writer untouched.
    pub fn write_to<W: Write>(&self, records: &[ExtractedRecord], writer: W) -> Result<usize> {
        let rows = normalize_rows(records)?;

        let mut wtr = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        wtr.write_record(self.variant.header())?;
        for (serial, (date, name, denomination)) in (1u64..).zip(&rows) {
            let serial = serial.to_string();
            let denomination = denomination.to_string();
            wtr.write_record([serial.as_str(), *date, *name, denomination.as_str()])?;
        }
        wtr.flush()?;

        Ok(rows.len())
    }

    /// Write the table to `path`.
    ///
    /// The file is staged next to the destination and only moved into place
    /// once fully written; on error no file is produced.
    pub fn write_path(&self, records: &[ExtractedRecord], path: &Path) -> Result<usize> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(dir)?;
        let count = self.write_to(records, staged.as_file_mut())?;
        debug!("Staged {} rows at {}", count, staged.path().display());

        staged.persist(path).map_err(|e| e.error)?;
        info!(variant = %self.variant, rows = count, path = %path.display(), "Table written");
        Ok(count)
    }
}

/// Render records as `(date, name, denomination)` cells, coercing each
/// matched amount to an integer denomination.
fn normalize_rows(records: &[ExtractedRecord]) -> Result<Vec<(&str, &str, Denomination)>> {
    let mut rows = Vec::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        let denomination = record.denomination().ok_or_else(|| TableError::AmountCoercion {
            row: i + 1,
            value: record.amount.clone(),
        })?;
        rows.push((record.date.as_str(), record.entity_name.as_str(), denomination));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EbondError;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<ExtractedRecord> {
        vec![
            ExtractedRecord::new(
                "12/Apr/2019",
                "ALL INDIA ANNA DRAVIDA MUNNETRA KAZHAGAM",
                "10,00,000",
            ),
            ExtractedRecord::new("12/Apr/2019", "A, B & CO", "1,00,00,000"),
        ]
    }

    #[test]
    fn test_write_encasher_table() {
        let mut out = Vec::new();
        let count = TableWriter::new(Variant::Encasher)
            .write_to(&sample(), &mut out)
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Sr No.,Date of Encashment,Name of the Political Party,Denomination\n\
             1,12/Apr/2019,ALL INDIA ANNA DRAVIDA MUNNETRA KAZHAGAM,1000000\n\
             2,12/Apr/2019,\"A, B & CO\",10000000\n"
        );
    }

    #[test]
    fn test_write_empty_table_has_header() {
        let mut out = Vec::new();
        TableWriter::new(Variant::Purchaser).write_to(&[], &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Sr No.,Date of Purchase,Purchaser Name,Denomination\n"
        );
    }

    #[test]
    fn test_impossible_date_written_verbatim() {
        let records = vec![ExtractedRecord::new("31/Feb/2021", "X", "1,000")];
        let mut out = Vec::new();
        let count = TableWriter::new(Variant::Purchaser)
            .write_to(&records, &mut out)
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Sr No.,Date of Purchase,Purchaser Name,Denomination\n1,31/Feb/2021,X,1000\n"
        );
    }

    #[test]
    fn test_uncoercible_amount_writes_nothing() {
        let mut records = sample();
        records.push(ExtractedRecord::new("13/Apr/2019", "Y", "5,000"));

        let mut out = Vec::new();
        let err = TableWriter::new(Variant::Encasher)
            .write_to(&records, &mut out)
            .unwrap_err();

        assert!(matches!(
            err,
            EbondError::Table(TableError::AmountCoercion { row: 3, ref value }) if value == "5,000"
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let count = TableWriter::new(Variant::Purchaser)
            .write_path(&sample(), &path)
            .unwrap();

        assert_eq!(count, 2);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Sr No.,Date of Purchase"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_path_missing_dir_produces_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        assert!(TableWriter::new(Variant::Purchaser).write_path(&sample(), &path).is_err());
        assert!(!path.exists());
    }
}
