//! Summaries over logged footprints.

use crate::comparison::compare_totals;
use chrono::{DateTime, NaiveDate, Utc};
use footprint_schemas::result::{CarbonLogEntry, ComparisonResult};
use serde::Serialize;
use std::{collections::BTreeMap, fmt};

/// Inclusive calendar-date range; an open end is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        let date = timestamp.date_naive();
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start {
            Some(start) => write!(f, "{}", start)?,
            None => f.write_str("beginning")?,
        }
        f.write_str(" to ")?;
        match self.end {
            Some(end) => write!(f, "{}", end),
            None => f.write_str("now"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub tonnes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub range: DateRange,
    pub entry_count: usize,
    pub total_tonnes: f64,
    pub average_tonnes: Option<f64>,
    pub lowest: Option<CarbonLogEntry>,
    pub highest: Option<CarbonLogEntry>,
    pub latest: Option<CarbonLogEntry>,
    /// Sorted by date.
    pub daily_totals: Vec<DailyTotal>,
    /// Latest entry compared with the one logged before it.
    pub trend: ComparisonResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodComparison {
    pub from: DateRange,
    pub to: DateRange,
    pub from_total: f64,
    pub to_total: f64,
    pub from_count: usize,
    pub to_count: usize,
    pub change: ComparisonResult,
}

/// The most recent entry by timestamp.
pub fn latest_entry(entries: &[CarbonLogEntry]) -> Option<&CarbonLogEntry> {
    entries.iter().max_by_key(|entry| entry.timestamp)
}

/// Entries inside `range`, oldest first.
pub fn entries_in_range<'a>(
    entries: &'a [CarbonLogEntry],
    range: &DateRange,
) -> Vec<&'a CarbonLogEntry> {
    let mut selected: Vec<_> = entries
        .iter()
        .filter(|entry| range.contains(&entry.timestamp))
        .collect();
    selected.sort_by_key(|entry| entry.timestamp);
    selected
}

pub fn summarize(
    entries: &[CarbonLogEntry],
    range: &DateRange,
    deadband_tonnes: f64,
) -> HistorySummary {
    let selected = entries_in_range(entries, range);
    let total_tonnes: f64 = selected.iter().map(|entry| entry.co2e).sum();
    let average_tonnes = if selected.is_empty() {
        None
    } else {
        Some(total_tonnes / selected.len() as f64)
    };

    let by_co2e = |a: &&&CarbonLogEntry, b: &&&CarbonLogEntry| {
        a.co2e.partial_cmp(&b.co2e).unwrap_or(std::cmp::Ordering::Equal)
    };
    let lowest = selected.iter().min_by(by_co2e).map(|entry| (*entry).clone());
    let highest = selected.iter().max_by(by_co2e).map(|entry| (*entry).clone());

    let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for entry in &selected {
        *per_day.entry(entry.timestamp.date_naive()).or_insert(0.0) += entry.co2e;
    }
    let daily_totals = per_day
        .into_iter()
        .map(|(date, tonnes)| DailyTotal { date, tonnes })
        .collect();

    let trend = match selected.as_slice() {
        [.., previous, latest] => compare_totals(latest.co2e, Some(previous.co2e), deadband_tonnes),
        _ => ComparisonResult::no_history(),
    };

    HistorySummary {
        range: *range,
        entry_count: selected.len(),
        total_tonnes,
        average_tonnes,
        lowest,
        highest,
        latest: selected.last().map(|entry| (*entry).clone()),
        daily_totals,
        trend,
    }
}

/// Compares the summed footprint of `to` against that of `from`.
///
/// An empty (or zero-total) `from` period leaves nothing to compare against.
pub fn compare_periods(
    entries: &[CarbonLogEntry],
    from: &DateRange,
    to: &DateRange,
    deadband_tonnes: f64,
) -> PeriodComparison {
    let from_entries = entries_in_range(entries, from);
    let to_entries = entries_in_range(entries, to);
    let from_total: f64 = from_entries.iter().map(|entry| entry.co2e).sum();
    let to_total: f64 = to_entries.iter().map(|entry| entry.co2e).sum();

    PeriodComparison {
        from: *from,
        to: *to,
        from_total,
        to_total,
        from_count: from_entries.len(),
        to_count: to_entries.len(),
        change: compare_totals(to_total, Some(from_total), deadband_tonnes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1),
            NaiveDate::from_ymd_opt(2024, 3, 31),
        );
        let at = |s: &str| s.parse::<DateTime<Utc>>().unwrap();
        assert!(range.contains(&at("2024-03-01T00:00:00Z")));
        assert!(range.contains(&at("2024-03-31T23:59:59Z")));
        assert!(!range.contains(&at("2024-04-01T00:00:00Z")));
        assert!(!range.contains(&at("2024-02-29T23:59:59Z")));
    }

    #[test]
    fn open_range_displays_like_a_sentence() {
        let range = DateRange::new(NaiveDate::from_ymd_opt(2024, 1, 5), None);
        assert_eq!(range.to_string(), "2024-01-05 to now");
        assert_eq!(DateRange::all().to_string(), "beginning to now");
    }
}
