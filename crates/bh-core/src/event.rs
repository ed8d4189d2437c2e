//! Weekly open/close events and their raw input form.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::event_kind::EventKind;
use crate::reference::{ReferenceWeek, parse_weekday};
use crate::types::{ClockTime, ScheduleError};

/// One raw schedule entry, e.g. `["mon_1_open", "09:00"]`.
///
/// Deserializes only from a two-element array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry(pub String, pub String);

impl RawEntry {
    pub fn new(label: impl Into<String>, clock_time: impl Into<String>) -> Self {
        Self(label.into(), clock_time.into())
    }

    /// The `<weekday>_<index>_<kind>` label.
    pub fn label(&self) -> &str {
        &self.0
    }

    /// The `HH:MM` clock time.
    pub fn clock_time(&self) -> &str {
        &self.1
    }
}

/// A business opening or closing at an instant of the reference week.
///
/// Ordered by timestamp, then kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: NaiveDateTime,
    pub kind: EventKind,
}

impl Event {
    pub const fn new(timestamp: NaiveDateTime, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }

    pub const fn is_close(&self) -> bool {
        matches!(self.kind, EventKind::Close)
    }
}

/// Pins a raw entry to the reference week.
///
/// The weekday is the first `_`-separated token of the label and the kind is
/// the last one; anything in between is ignored.
pub fn transform(entry: &RawEntry, week: &ReferenceWeek) -> Result<Event, ScheduleError> {
    let label = entry.label();

    let (weekday_token, rest) = label
        .split_once('_')
        .ok_or_else(|| ScheduleError::MalformedLabel {
            label: label.to_string(),
        })?;
    let kind_token = rest.rsplit('_').next().unwrap_or(rest);

    let weekday = parse_weekday(weekday_token).ok_or_else(|| ScheduleError::UnknownWeekday {
        label: label.to_string(),
        weekday: weekday_token.to_string(),
    })?;
    let kind = kind_token
        .parse::<EventKind>()
        .map_err(|err| ScheduleError::UnknownEventKind {
            label: label.to_string(),
            kind: err.token().to_string(),
        })?;
    let time: ClockTime = entry.clock_time().parse()?;

    Ok(Event::new(week.instant(weekday, time), kind))
}

/// Transforms every entry, failing on the first malformed one.
pub fn transform_all(
    entries: &[RawEntry],
    week: &ReferenceWeek,
) -> Result<Vec<Event>, ScheduleError> {
    entries.iter().map(|entry| transform(entry, week)).collect()
}
