//! Descriptive statistics and time-series aggregation over record tables.

mod aggregate;
mod filter;
mod stats;

pub use aggregate::{
    entity_series, entity_totals, monthly_totals, yearly_totals, EntityTotal, MonthTotal,
    SeriesPoint, YearTotal, LIST_DATE_FORMAT,
};
pub use filter::EntityFilter;
pub use stats::{median, nearest_rank, summarize, QuantilePoint, Summary};
