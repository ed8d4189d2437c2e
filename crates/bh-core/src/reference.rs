//! The canonical reference week that weekly events are pinned to.
//!
//! Every weekday label maps to a fixed day of one calendar month, Monday
//! first. With the defaults that is January 2000, Monday=15 through Sunday=21.
//! The calendar weekday of those dates is irrelevant: only the ordering and
//! spacing of the seven days matter.

use chrono::{Days, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::types::{ClockTime, ScheduleError};

/// Weekdays in reference-week order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const DEFAULT_YEAR: i32 = 2000;
const DEFAULT_MONTH: u32 = 1;
const DEFAULT_MONDAY_DAY: u32 = 15;

/// A validated week of seven consecutive days inside one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReferenceWeekFields", into = "ReferenceWeekFields")]
pub struct ReferenceWeek {
    monday: NaiveDate,
}

/// Serialized form of [`ReferenceWeek`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReferenceWeekFields {
    pub year: i32,
    pub month: u32,
    pub monday_day: u32,
}

impl ReferenceWeek {
    /// Creates a reference week whose Monday is `year-month-monday_day`.
    ///
    /// The Sunday six days later must fall in the same month.
    pub fn new(year: i32, month: u32, monday_day: u32) -> Result<Self, ScheduleError> {
        let invalid = || ScheduleError::InvalidReferenceWeek {
            year,
            month,
            day: monday_day,
        };

        let monday = NaiveDate::from_ymd_opt(year, month, monday_day).ok_or_else(invalid)?;
        let sunday_day = monday_day.checked_add(6).ok_or_else(invalid)?;
        NaiveDate::from_ymd_opt(year, month, sunday_day).ok_or_else(invalid)?;

        Ok(Self { monday })
    }

    /// Returns the calendar date standing in for `weekday`.
    pub fn date(&self, weekday: Weekday) -> NaiveDate {
        self.monday + Days::new(u64::from(weekday.num_days_from_monday()))
    }

    /// Returns the absolute timestamp of `time` on `weekday`.
    pub fn instant(&self, weekday: Weekday, time: ClockTime) -> NaiveDateTime {
        self.date(weekday).and_time(time.into())
    }
}

impl Default for ReferenceWeek {
    fn default() -> Self {
        Self::new(DEFAULT_YEAR, DEFAULT_MONTH, DEFAULT_MONDAY_DAY)
            .expect("default reference week is a valid date range")
    }
}

impl TryFrom<ReferenceWeekFields> for ReferenceWeek {
    type Error = ScheduleError;

    fn try_from(fields: ReferenceWeekFields) -> Result<Self, Self::Error> {
        Self::new(fields.year, fields.month, fields.monday_day)
    }
}

impl From<ReferenceWeek> for ReferenceWeekFields {
    fn from(week: ReferenceWeek) -> Self {
        use chrono::Datelike;

        Self {
            year: week.monday.year(),
            month: week.monday.month(),
            monday_day: week.monday.day(),
        }
    }
}

/// Parses a three-letter lowercase weekday token.
pub fn parse_weekday(token: &str) -> Option<Weekday> {
    match token {
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Inverse of [`parse_weekday`].
pub const fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}
