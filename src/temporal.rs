use crate::columns::RoleAssignment;
use crate::dates;
use crate::table::Table;
use chrono::{Datelike, NaiveDateTime};
use std::collections::BTreeMap;

/// Temporal coverage of the export: date range, whole-day span, and volume
/// per calendar month. Months from different years are merged; the buckets
/// answer "is the quarter covered", not "which exact weeks".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalProfile {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub span_days: i64,
    pub by_month: BTreeMap<u32, usize>,
    pub parsed: usize,
    pub unparsed: usize,
}

/// Profile the resolved timestamp column. `None` when no timestamp column was
/// resolved or when not a single value parses; rows that fail to parse are
/// counted as unparsed and never abort the run.
pub fn profile(
    table: &Table,
    roles: &RoleAssignment,
    formats: &[String],
) -> Option<TemporalProfile> {
    let col = roles.timestamp.as_deref()?;

    let mut times: Vec<NaiveDateTime> = Vec::new();
    let mut unparsed = 0usize;
    for value in table.column_values(col) {
        match dates::parse_date(value, formats) {
            Some(t) => times.push(t),
            None => unparsed += 1,
        }
    }
    if times.is_empty() {
        return None;
    }

    times.sort_unstable();
    let start = times[0];
    let end = times[times.len() - 1];

    let mut by_month: BTreeMap<u32, usize> = BTreeMap::new();
    for t in &times {
        *by_month.entry(t.month()).or_insert(0) += 1;
    }

    Some(TemporalProfile {
        start,
        end,
        span_days: (end - start).num_days(),
        by_month,
        parsed: times.len(),
        unparsed,
    })
}
