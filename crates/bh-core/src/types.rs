//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning a raw schedule into a timeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The weekday token of a label is not one of `mon`..`sun`.
    #[error("unknown weekday '{weekday}' in label '{label}'")]
    UnknownWeekday { label: String, weekday: String },

    /// The kind token of a label is neither `open` nor `close`.
    #[error("unknown event kind '{kind}' in label '{label}'")]
    UnknownEventKind { label: String, kind: String },

    /// The label does not have the `<weekday>_<index>_<kind>` shape.
    #[error("malformed event label '{label}', expected <weekday>_<index>_<kind>")]
    MalformedLabel { label: String },

    /// The clock time is not two integers separated by `:`.
    #[error("malformed clock time '{value}', expected HH:MM")]
    MalformedClockTime { value: String },

    /// The clock time parsed but is not a time of day.
    #[error("clock time '{value}' is out of range")]
    InvalidClockTime { value: String },

    /// The reference week does not fit in the given year and month.
    #[error("invalid reference week starting {year}-{month:02}-{day:02}")]
    InvalidReferenceWeek { year: i32, month: u32, day: u32 },

    /// The replication period must be between one day and one year.
    #[error("period must be between 1 and 366 days, got {days}")]
    InvalidPeriod { days: u32 },

    /// Shifting an event by the period left the representable date range.
    #[error("event at {timestamp} cannot be shifted by {days} days")]
    TimestampOverflow { timestamp: NaiveDateTime, days: i64 },

    /// A clock range must end after it starts.
    #[error("clock range {start}-{end} is empty")]
    EmptyClockRange { start: ClockTime, end: ClockTime },
}

/// A wall-clock time written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Creates a clock time, returning `None` outside `00:00`..=`23:59`.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    #[must_use]
    pub const fn time(self) -> NaiveTime {
        self.0
    }
}

impl FromStr for ClockTime {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ScheduleError::MalformedClockTime {
            value: s.to_string(),
        };

        let (hour, minute) = s.split_once(':').ok_or_else(malformed)?;
        let hour: u32 = hour.parse().map_err(|_| malformed())?;
        let minute: u32 = minute.parse().map_err(|_| malformed())?;

        Self::from_hm(hour, minute).ok_or_else(|| ScheduleError::InvalidClockTime {
            value: s.to_string(),
        })
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl From<ClockTime> for NaiveTime {
    fn from(time: ClockTime) -> Self {
        time.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

/// A `[start, end)` span of wall-clock time within one day.
///
/// Deserializes from a two-element array such as `["08:30", "09:00"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(ClockTime, ClockTime)", into = "(ClockTime, ClockTime)")]
pub struct ClockRange {
    start: ClockTime,
    end: ClockTime,
}

impl ClockRange {
    /// Creates a range after checking that it is not empty.
    pub fn new(start: ClockTime, end: ClockTime) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::EmptyClockRange { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> ClockTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> ClockTime {
        self.end
    }
}

impl TryFrom<(ClockTime, ClockTime)> for ClockRange {
    type Error = ScheduleError;

    fn try_from((start, end): (ClockTime, ClockTime)) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

impl From<ClockRange> for (ClockTime, ClockTime) {
    fn from(range: ClockRange) -> Self {
        (range.start, range.end)
    }
}

impl fmt::Display for ClockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A half-open `[start, end)` interval of timestamps.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// Inclusive.
    pub start: NaiveDateTime,

    /// Exclusive.
    pub end: NaiveDateTime,
}

impl fmt::Debug for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl TimeRange {
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }
}
