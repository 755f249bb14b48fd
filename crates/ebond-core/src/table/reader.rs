//! Table loading with variant detection.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use super::{Table, TableRow};
use crate::error::{Result, TableError};
use crate::models::record::{DATE_FORMAT, Denomination, Record, Variant};

impl Table {
    /// Load a table from a CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        debug!("Loaded {} rows from {}", table.len(), path.display());
        Ok(table)
    }

    /// Load a table from any CSV reader.
    ///
    /// Denomination cells may still carry grouping commas; they are coerced
    /// the same way the table sink does. Dates must be real calendar days.
    /// All rows must parse or the load fails.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let variant = Variant::from_header(&header).ok_or(TableError::UnknownHeader(header))?;

        let mut rows = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let row = i + 1;
            let fields = result?;
            if fields.len() < 4 {
                return Err(TableError::ShortRow {
                    row,
                    found: fields.len(),
                }
                .into());
            }

            let serial = fields[0].trim().parse::<u64>().unwrap_or(row as u64);

            let date = NaiveDate::parse_from_str(fields[1].trim(), DATE_FORMAT).map_err(|_| {
                TableError::InvalidDate {
                    row,
                    value: fields[1].to_string(),
                }
            })?;

            let denomination = Denomination::parse_grouped(&fields[3]).ok_or_else(|| {
                TableError::AmountCoercion {
                    row,
                    value: fields[3].to_string(),
                }
            })?;

            rows.push(TableRow {
                serial,
                record: Record::new(date, &fields[2], denomination),
            });
        }

        Ok(Self { variant, rows })
    }
}
