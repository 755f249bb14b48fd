//! Summary statistics over denominations.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Result, TableError};
use crate::models::record::Record;

/// Quantile fractions reported in the summary table.
const QUANTILES: [f64; 3] = [0.25, 0.50, 0.75];

/// One row of the quantile table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantilePoint {
    pub fraction: f64,
    pub denomination: u64,
}

/// Descriptive statistics for a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of records.
    pub records: usize,
    /// Number of distinct entity names.
    pub unique_entities: usize,
    /// Sum of all denominations.
    pub total: u64,
    pub mean: Decimal,
    pub median: Decimal,
    /// 25th percentile (nearest-rank).
    pub q1: u64,
    /// 75th percentile (nearest-rank).
    pub q3: u64,
    /// `q3 - q1`.
    pub iqr: u64,
    /// Nearest-rank quantiles at 0.25, 0.50 and 0.75.
    pub quantiles: Vec<QuantilePoint>,
}

/// Compute summary statistics. Fails on an empty record set.
pub fn summarize<'a, I>(records: I) -> Result<Summary>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut entities = HashSet::new();
    let mut values = Vec::new();
    for record in records {
        entities.insert(record.entity_name.as_str());
        values.push(record.amount());
    }
    values.sort_unstable();

    let (Some(q1), Some(q3), Some(median)) = (
        nearest_rank(&values, 0.25),
        nearest_rank(&values, 0.75),
        median(&values),
    ) else {
        return Err(TableError::Empty.into());
    };

    let total: u64 = values.iter().sum();
    let mean = (Decimal::from(total) / Decimal::from(values.len())).normalize();

    let quantiles = QUANTILES
        .iter()
        .filter_map(|&fraction| {
            nearest_rank(&values, fraction).map(|denomination| QuantilePoint {
                fraction,
                denomination,
            })
        })
        .collect();

    Ok(Summary {
        records: values.len(),
        unique_entities: entities.len(),
        total,
        mean,
        median,
        q1,
        q3,
        iqr: q3 - q1,
        quantiles,
    })
}

/// Nearest-rank percentile of sorted values.
///
/// For `p` in `(0, 1]` the result is the value at rank `ceil(p * n)`
/// (1-based); `p <= 0` yields the minimum.
pub fn nearest_rank(sorted: &[u64], p: f64) -> Option<u64> {
    if sorted.is_empty() {
        return None;
    }

    let n = sorted.len();
    // Tolerate float noise such as 0.7 * 10 = 7.000000000000001
    let rank = (p.clamp(0.0, 1.0) * n as f64 - 1e-9).ceil() as usize;
    Some(sorted[rank.clamp(1, n) - 1])
}

/// Median of sorted values, averaging the middle pair for even counts.
pub fn median(sorted: &[u64]) -> Option<Decimal> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(Decimal::from(sorted[n / 2])),
        _ => {
            let pair = Decimal::from(sorted[n / 2 - 1]) + Decimal::from(sorted[n / 2]);
            Some((pair / Decimal::TWO).normalize())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Denomination;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn record(name: &str, denomination: Denomination) -> Record {
        Record::new(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), name, denomination)
    }

    #[test]
    fn test_nearest_rank_quartiles() {
        let values = [1_000, 10_000, 100_000, 1_000_000];

        assert_eq!(nearest_rank(&values, 0.25), Some(1_000));
        assert_eq!(nearest_rank(&values, 0.50), Some(10_000));
        assert_eq!(nearest_rank(&values, 0.75), Some(100_000));
        assert_eq!(nearest_rank(&values, 1.0), Some(1_000_000));
        assert_eq!(nearest_rank(&values, 0.0), Some(1_000));
    }

    #[test]
    fn test_nearest_rank_classic_example() {
        // Textbook nearest-rank example
        let values = [15, 20, 35, 40, 50];
        assert_eq!(nearest_rank(&values, 0.05), Some(15));
        assert_eq!(nearest_rank(&values, 0.30), Some(20));
        assert_eq!(nearest_rank(&values, 0.40), Some(20));
        assert_eq!(nearest_rank(&values, 0.50), Some(35));
        assert_eq!(nearest_rank(&values, 1.00), Some(50));
        assert_eq!(nearest_rank(&[], 0.5), None);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[1_000, 10_000, 100_000]), Some(Decimal::from(10_000)));
        assert_eq!(median(&[1_000, 10_000]), Some(Decimal::from(5_500)));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_summarize() {
        let records = vec![
            record("A", Denomination::OneThousand),
            record("B", Denomination::TenThousand),
            record("A", Denomination::OneLakh),
            record("C", Denomination::TenLakh),
        ];

        let summary = summarize(&records).unwrap();

        assert_eq!(summary.records, 4);
        assert_eq!(summary.unique_entities, 3);
        assert_eq!(summary.total, 1_111_000);
        assert_eq!(summary.mean, Decimal::from_str("277750").unwrap());
        assert_eq!(summary.median, Decimal::from(55_000));
        assert_eq!(summary.q1, 1_000);
        assert_eq!(summary.q3, 100_000);
        assert_eq!(summary.iqr, 99_000);
        assert_eq!(
            summary.quantiles.iter().map(|q| q.denomination).collect::<Vec<_>>(),
            vec![1_000, 10_000, 100_000]
        );
    }

    #[test]
    fn test_summarize_empty() {
        let records: Vec<Record> = Vec::new();
        assert!(summarize(&records).is_err());
    }
}
