//! Record, denomination and pipeline variant models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date format used in source documents and output tables (`01/Jan/2022`).
pub const DATE_FORMAT: &str = "%d/%b/%Y";

/// Header of the serial number column written by the table sink.
pub const SERIAL_COLUMN: &str = "Sr No.";

/// Header of the denomination column, shared by both variants.
pub const DENOMINATION_COLUMN: &str = "Denomination";

/// Face value of a bond.
///
/// Source documents print these with Indian digit grouping (`10,00,000`);
/// the numeric value is the literal with separators removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum Denomination {
    /// ₹1,000
    OneThousand,
    /// ₹10,000
    TenThousand,
    /// ₹1,00,000
    OneLakh,
    /// ₹10,00,000
    TenLakh,
    /// ₹1,00,00,000
    OneCrore,
    /// ₹10,00,00,000
    TenCrore,
}

/// A numeric value outside the denomination set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0} is not a bond denomination")]
pub struct UnknownDenomination(pub u64);

impl Denomination {
    /// All denominations, smallest first.
    pub const ALL: [Denomination; 6] = [
        Denomination::OneThousand,
        Denomination::TenThousand,
        Denomination::OneLakh,
        Denomination::TenLakh,
        Denomination::OneCrore,
        Denomination::TenCrore,
    ];

    /// Numeric face value.
    pub fn value(self) -> u64 {
        match self {
            Denomination::OneThousand => 1_000,
            Denomination::TenThousand => 10_000,
            Denomination::OneLakh => 1_00_000,
            Denomination::TenLakh => 10_00_000,
            Denomination::OneCrore => 1_00_00_000,
            Denomination::TenCrore => 10_00_00_000,
        }
    }

    /// The literal as printed in source documents.
    pub fn literal(self) -> &'static str {
        match self {
            Denomination::OneThousand => "1,000",
            Denomination::TenThousand => "10,000",
            Denomination::OneLakh => "1,00,000",
            Denomination::TenLakh => "10,00,000",
            Denomination::OneCrore => "1,00,00,000",
            Denomination::TenCrore => "10,00,00,000",
        }
    }

    /// Look up a denomination by numeric value.
    pub fn from_value(value: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.value() == value)
    }

    /// Strip grouping commas, coerce to an integer and look up the denomination.
    pub fn parse_grouped(s: &str) -> Option<Self> {
        let digits = s.trim().replace(',', "");
        digits.parse::<u64>().ok().and_then(Self::from_value)
    }
}

impl TryFrom<u64> for Denomination {
    type Error = UnknownDenomination;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or(UnknownDenomination(value))
    }
}

impl From<Denomination> for u64 {
    fn from(d: Denomination) -> Self {
        d.value()
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// One bond record with a parsed calendar date, as loaded from a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Date of purchase or encashment.
    pub date: NaiveDate,

    /// Purchaser or political party name. May be empty for noisy pages.
    pub entity_name: String,

    /// Face value.
    pub denomination: Denomination,
}

impl Record {
    pub fn new(date: NaiveDate, entity_name: impl Into<String>, denomination: Denomination) -> Self {
        Self {
            date,
            entity_name: entity_name.into(),
            denomination,
        }
    }

    /// Face value as an integer.
    pub fn amount(&self) -> u64 {
        self.denomination.value()
    }

    /// Date rendered as `DD/Mon/YYYY`.
    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// A record as matched in page text.
///
/// The date and amount keep their source spelling. The table sink coerces
/// the amount; the date is parsed only when a table is loaded for analytics,
/// so a day such as `31/Feb/2021` still reaches the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Matched `DD/Mon/YYYY` text.
    pub date: String,

    /// Segment text left after removing the date and amount.
    pub entity_name: String,

    /// Matched denomination literal, grouping commas included.
    pub amount: String,
}

impl ExtractedRecord {
    pub fn new(
        date: impl Into<String>,
        entity_name: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            entity_name: entity_name.into(),
            amount: amount.into(),
        }
    }

    /// Calendar date, if the matched text names a real day.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// Denomination of the amount text.
    pub fn denomination(&self) -> Option<Denomination> {
        Denomination::parse_grouped(&self.amount)
    }
}

impl From<&Record> for ExtractedRecord {
    fn from(record: &Record) -> Self {
        Self::new(
            record.formatted_date(),
            record.entity_name.as_str(),
            record.denomination.literal(),
        )
    }
}

/// Which side of the bond lifecycle a document describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Bond purchasers (companies and individuals).
    Purchaser,
    /// Encashing political parties.
    Encasher,
}

impl Variant {
    /// Header of the date column.
    pub fn date_column(self) -> &'static str {
        match self {
            Variant::Purchaser => "Date of Purchase",
            Variant::Encasher => "Date of Encashment",
        }
    }

    /// Header of the entity name column.
    pub fn entity_column(self) -> &'static str {
        match self {
            Variant::Purchaser => "Purchaser Name",
            Variant::Encasher => "Name of the Political Party",
        }
    }

    /// Full header row of the output table.
    pub fn header(self) -> [&'static str; 4] {
        [
            SERIAL_COLUMN,
            self.date_column(),
            self.entity_column(),
            DENOMINATION_COLUMN,
        ]
    }

    /// Detect the variant from a table header row.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Option<Self> {
        [Variant::Purchaser, Variant::Encasher].into_iter().find(|v| {
            header.len() == 4
                && header
                    .iter()
                    .zip(v.header())
                    .all(|(got, want)| got.as_ref().trim() == want)
        })
    }

    /// Separator used in free-text entity filters.
    pub fn filter_separator(self) -> char {
        match self {
            Variant::Purchaser => ',',
            Variant::Encasher => '|',
        }
    }

    /// Lowercase name for logs and file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Purchaser => "purchaser",
            Variant::Encasher => "encasher",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "purchaser" | "purchasers" => Ok(Variant::Purchaser),
            "encasher" | "encashers" | "party" | "parties" => Ok(Variant::Encasher),
            other => Err(format!("unknown variant: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_denomination_literals_match_values() {
        for d in Denomination::ALL {
            assert_eq!(d.literal().replace(',', "").parse::<u64>().unwrap(), d.value());
        }
    }

    #[test]
    fn test_parse_grouped() {
        assert_eq!(Denomination::parse_grouped("10,00,000"), Some(Denomination::TenLakh));
        assert_eq!(Denomination::parse_grouped("1000"), Some(Denomination::OneThousand));
        assert_eq!(Denomination::parse_grouped(" 1,00,00,000 "), Some(Denomination::OneCrore));
        assert_eq!(Denomination::parse_grouped("5,000"), None);
        assert_eq!(Denomination::parse_grouped("abc"), None);
    }

    #[test]
    fn test_denomination_serde_as_integer() {
        let json = serde_json::to_string(&Denomination::TenCrore).unwrap();
        assert_eq!(json, "100000000");

        let parsed: Denomination = serde_json::from_str("10000").unwrap();
        assert_eq!(parsed, Denomination::TenThousand);

        assert!(serde_json::from_str::<Denomination>("12345").is_err());
    }

    #[test]
    fn test_variant_from_header() {
        let header = vec![
            "Sr No.".to_string(),
            "Date of Encashment".to_string(),
            "Name of the Political Party".to_string(),
            "Denomination".to_string(),
        ];
        assert_eq!(Variant::from_header(&header), Some(Variant::Encasher));
        assert_eq!(
            Variant::from_header(&Variant::Purchaser.header()),
            Some(Variant::Purchaser)
        );
        assert_eq!(Variant::from_header(&["Sr No.", "Date"]), None);
    }

    #[test]
    fn test_record_formatted_date() {
        let record = Record::new(
            NaiveDate::from_ymd_opt(2019, 4, 12).unwrap(),
            "PARTY",
            Denomination::TenLakh,
        );
        assert_eq!(record.formatted_date(), "12/Apr/2019");
        assert_eq!(record.amount(), 1_000_000);
    }

    #[test]
    fn test_extracted_record_keeps_source_text() {
        let record = ExtractedRecord::new("31/Feb/2021", "X", "10,00,000");
        assert_eq!(record.calendar_date(), None);
        assert_eq!(record.denomination(), Some(Denomination::TenLakh));

        let record = ExtractedRecord::new("01/jan/2022", "X", "5,000");
        assert_eq!(record.calendar_date(), NaiveDate::from_ymd_opt(2022, 1, 1));
        assert_eq!(record.denomination(), None);
    }
}
