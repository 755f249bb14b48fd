//! Per-year, per-month and per-entity sums.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::filter::EntityFilter;
use crate::models::record::Record;

/// Date format used in per-entity date lists (`12/04/2019`).
pub const LIST_DATE_FORMAT: &str = "%d/%m/%Y";

/// Denomination sum for one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearTotal {
    pub year: i32,
    pub total: u64,
}

/// Denomination sum for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthTotal {
    pub year: i32,
    pub month: u32,
    /// `Apr 2019`
    pub label: String,
    pub total: u64,
}

/// Denomination sum for one entity with its transaction dates, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityTotal {
    pub entity: String,
    pub total: u64,
    pub dates: Vec<NaiveDate>,
}

impl EntityTotal {
    /// Transaction dates rendered as `DD/MM/YYYY`.
    pub fn formatted_dates(&self) -> Vec<String> {
        self.dates
            .iter()
            .map(|d| d.format(LIST_DATE_FORMAT).to_string())
            .collect()
    }
}

/// Monthly sum for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub entity: String,
    pub total: u64,
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{month:02}/{year}"))
}

/// Sums per calendar year, ascending.
pub fn yearly_totals<'a, I>(records: I) -> Vec<YearTotal>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut totals: BTreeMap<i32, u64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.date.year()).or_default() += record.amount();
    }

    totals
        .into_iter()
        .map(|(year, total)| YearTotal { year, total })
        .collect()
}

/// Sums per (year, month), in chronological order.
pub fn monthly_totals<'a, I>(records: I) -> Vec<MonthTotal>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut totals: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for record in records {
        *totals
            .entry((record.date.year(), record.date.month()))
            .or_default() += record.amount();
    }

    totals
        .into_iter()
        .map(|((year, month), total)| MonthTotal {
            year,
            month,
            label: month_label(year, month),
            total,
        })
        .collect()
}

/// Sums per entity (ordered by name) with dates sorted newest first.
pub fn entity_totals<'a, I>(records: I) -> Vec<EntityTotal>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: BTreeMap<&str, (u64, Vec<NaiveDate>)> = BTreeMap::new();
    for record in records {
        let (total, dates) = groups.entry(record.entity_name.as_str()).or_default();
        *total += record.amount();
        dates.push(record.date);
    }

    groups
        .into_iter()
        .map(|(entity, (total, mut dates))| {
            dates.sort_unstable_by(|a, b| b.cmp(a));
            EntityTotal {
                entity: entity.to_string(),
                total,
                dates,
            }
        })
        .collect()
}

/// Monthly sums for the entities selected by `filter`, in chronological
/// order and by entity name within a month.
pub fn entity_series<'a, I>(records: I, filter: &EntityFilter) -> Vec<SeriesPoint>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut totals: BTreeMap<(i32, u32, &str), u64> = BTreeMap::new();
    for record in records.into_iter().filter(|r| filter.matches(&r.entity_name)) {
        let key = (
            record.date.year(),
            record.date.month(),
            record.entity_name.as_str(),
        );
        *totals.entry(key).or_default() += record.amount();
    }

    totals
        .into_iter()
        .map(|((year, month, entity), total)| SeriesPoint {
            year,
            month,
            label: month_label(year, month),
            entity: entity.to_string(),
            total,
        })
        .collect()
}
