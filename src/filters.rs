//! Date-range and hour-of-day filtering over the dataset.
//!
//! A filter is either applied in full or rejected with a [`FilterError`];
//! nothing here substitutes defaults for bad input.

use crate::config::DashboardConfig;
use crate::dataset::DatasetStore;
use crate::errors::FilterError;
use crate::models::{AccidentRecord, DashboardQuery, DateBounds, HOURS, PickerBounds};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeSet;

/// Records that survived a filter, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet<'a> {
    records: Vec<&'a AccidentRecord>,
}

impl<'a> RecordSet<'a> {
    pub fn records(&self) -> &[&'a AccidentRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a AccidentRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Inclusive calendar range. Both bounds are taken at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, FilterError> {
        if start > end {
            return Err(FilterError::InvertedRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, FilterError> {
        Self::from_dates(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// The end bound is midnight of the end date, so later hours of that
    /// day fall outside the range.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        let lower = self.start.and_time(NaiveTime::MIN);
        let upper = self.end.and_time(NaiveTime::MIN);
        lower <= timestamp && timestamp <= upper
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a `THH:MM:SS` time part.
/// The time must be valid but is otherwise ignored.
pub fn parse_date(value: &str) -> Result<NaiveDate, FilterError> {
    let invalid = || FilterError::InvalidDate(value.to_string());
    let trimmed = value.trim();
    let date_part = match trimmed.split_once('T') {
        Some((date, time)) => {
            NaiveTime::parse_from_str(time, "%H:%M:%S").map_err(|_| invalid())?;
            date
        }
        None => trimmed,
    };
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| invalid())
}

/// Selected hours of the day. Empty means every hour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HourSelection(BTreeSet<u8>);

impl HourSelection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_hours<I: IntoIterator<Item = u8>>(hours: I) -> Result<Self, FilterError> {
        let mut set = BTreeSet::new();
        for hour in hours {
            if usize::from(hour) >= HOURS {
                return Err(FilterError::InvalidHour(hour.to_string()));
            }
            set.insert(hour);
        }
        Ok(Self(set))
    }

    /// Parses a comma separated list such as `"5,9,20"`. Blank input selects
    /// every hour.
    pub fn parse(value: &str) -> Result<Self, FilterError> {
        let hours = value
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<u8>()
                    .map_err(|_| FilterError::InvalidHour(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_hours(hours)
    }

    /// Merges a clicked histogram bar with a box selection of bars.
    pub fn from_chart(click: Option<u8>, selected: &[u8]) -> Result<Self, FilterError> {
        Self::from_hours(click.into_iter().chain(selected.iter().copied()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, hour: u8) -> bool {
        self.0.contains(&hour)
    }

    /// Every hour picked explicitly; treated like no selection when coloring.
    pub fn covers_all_hours(&self) -> bool {
        self.0.len() >= HOURS
    }

    pub fn matches(&self, hour: u8) -> bool {
        self.is_empty() || self.contains(hour)
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.iter().copied().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub range: DateRange,
    pub hours: HourSelection,
}

impl FilterState {
    pub fn new(range: DateRange, hours: HourSelection) -> Self {
        Self { range, hours }
    }

    /// Missing dates fall back to the configured window. Present but
    /// malformed values are rejected.
    pub fn from_query(
        query: &DashboardQuery,
        config: &DashboardConfig,
    ) -> Result<Self, FilterError> {
        let start = match query.start_date.as_deref() {
            Some(value) => parse_date(value)?,
            None => config.min_date,
        };
        let end = match query.end_date.as_deref() {
            Some(value) => parse_date(value)?,
            None => config.max_date,
        };
        let hours = match query.hours.as_deref() {
            Some(value) => HourSelection::parse(value)?,
            None => HourSelection::all(),
        };
        Ok(Self::new(DateRange::from_dates(start, end)?, hours))
    }
}

pub fn filter_by_date<'a>(store: &'a DatasetStore, range: &DateRange) -> RecordSet<'a> {
    RecordSet {
        records: store
            .records()
            .iter()
            .filter(|record| range.contains(record.timestamp))
            .collect(),
    }
}

pub fn filter_by_hours<'a>(set: RecordSet<'a>, hours: &HourSelection) -> RecordSet<'a> {
    if hours.is_empty() {
        return set;
    }
    RecordSet {
        records: set
            .records
            .into_iter()
            .filter(|record| hours.contains(record.hour()))
            .collect(),
    }
}

/// The pair of start/end date pickers. Each picker is bounded by the other
/// so the picked range can never be inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePickers {
    window: DateBounds,
    start: NaiveDate,
    end: NaiveDate,
}

impl DatePickers {
    pub fn new(min_allowed: NaiveDate, max_allowed: NaiveDate) -> Self {
        let (min, max) = if min_allowed <= max_allowed {
            (min_allowed, max_allowed)
        } else {
            (max_allowed, min_allowed)
        };
        Self {
            window: DateBounds { min, max },
            start: min,
            end: max,
        }
    }

    pub fn set_start(&mut self, date: NaiveDate) {
        self.start = date.clamp(self.window.min, self.end);
    }

    pub fn set_end(&mut self, date: NaiveDate) {
        self.end = date.clamp(self.start, self.window.max);
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }

    pub fn bounds(&self) -> PickerBounds {
        PickerBounds {
            start_date: self.start,
            end_date: self.end,
            start: DateBounds {
                min: self.window.min,
                max: self.end,
            },
            end: DateBounds {
                min: self.start,
                max: self.window.max,
            },
        }
    }
}
