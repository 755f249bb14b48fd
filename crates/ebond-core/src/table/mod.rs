//! Serial-numbered CSV tables of extracted records.

mod cache;
mod reader;
mod writer;

pub use cache::TableCache;
pub use writer::TableWriter;

use crate::models::record::{Record, Variant};

/// A loaded record table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Pipeline variant, detected from the header row.
    pub variant: Variant,
    /// Rows in file order.
    pub rows: Vec<TableRow>,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Value of the `Sr No.` column.
    pub serial: u64,
    pub record: Record,
}

impl Table {
    /// Build a table from records, numbering rows from 1.
    pub fn from_records(variant: Variant, records: Vec<Record>) -> Self {
        let rows = records
            .into_iter()
            .zip(1u64..)
            .map(|(record, serial)| TableRow { serial, record })
            .collect();
        Self { variant, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the records in file order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter().map(|row| &row.record)
    }
}
