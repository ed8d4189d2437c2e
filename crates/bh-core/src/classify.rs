//! Meal period classification.
//!
//! # Algorithm Summary
//!
//! 1. Transform every raw entry into an [`Event`] on the reference week
//! 2. Bail out with all meals closed for empty or close-less schedules
//! 3. Periodize the events into a [`Timeline`]
//! 4. For each meal, check every clock range on all seven weekdays; one
//!    continuously open instance is enough

use std::fmt;

use chrono::{Duration, Weekday};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::event::{Event, RawEntry, transform_all};
use crate::meal::{Meal, MealWindows};
use crate::reference::{ReferenceWeek, WEEKDAYS, weekday_label};
use crate::timeline::Timeline;
use crate::types::{ClockRange, ScheduleError, TimeRange};

/// Configuration for classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Week that weekday labels are pinned to.
    pub reference: ReferenceWeek,

    /// Replication period for the timeline, in days.
    /// Default: 7.
    pub period_days: u32,

    /// Clock ranges per meal.
    pub meals: MealWindows,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            reference: ReferenceWeek::default(),
            period_days: 7,
            meals: MealWindows::default(),
        }
    }
}

/// Accepted values for [`ClassifierConfig::period_days`].
const PERIOD_DAYS: std::ops::RangeInclusive<u32> = 1..=366;

impl ClassifierConfig {
    /// Returns the replication period, rejecting anything outside one day to
    /// one year.
    pub fn period(&self) -> Result<Duration, ScheduleError> {
        if !PERIOD_DAYS.contains(&self.period_days) {
            return Err(ScheduleError::InvalidPeriod {
                days: self.period_days,
            });
        }
        Ok(Duration::days(i64::from(self.period_days)))
    }

    /// Checks the settings that deserialization cannot enforce.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.period().map(|_| ())
    }
}

/// Breakfast, dinner and supper flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Classification {
    pub breakfast: bool,
    pub dinner: bool,
    pub supper: bool,
}

impl Classification {
    pub const fn get(&self, meal: Meal) -> bool {
        match meal {
            Meal::Breakfast => self.breakfast,
            Meal::Dinner => self.dinner,
            Meal::Supper => self.supper,
        }
    }

    const fn set(&mut self, meal: Meal, value: bool) {
        match meal {
            Meal::Breakfast => self.breakfast = value,
            Meal::Dinner => self.dinner = value,
            Meal::Supper => self.supper = value,
        }
    }

    pub const fn to_array(self) -> [bool; 3] {
        [self.breakfast, self.dinner, self.supper]
    }
}

impl From<[bool; 3]> for Classification {
    fn from([breakfast, dinner, supper]: [bool; 3]) -> Self {
        Self {
            breakfast,
            dinner,
            supper,
        }
    }
}

impl Serialize for Classification {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_array().serialize(serializer)
    }
}

/// Renders as `[false, true, true]`.
impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.breakfast, self.dinner, self.supper)
    }
}

/// A weekday instance of a meal range that was continuously open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowHit {
    #[serde(serialize_with = "serialize_weekday")]
    pub weekday: Weekday,
    pub range: ClockRange,
}

fn serialize_weekday<S>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(weekday_label(*weekday))
}

/// Every hit for one meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealReport {
    pub meal: Meal,
    pub hits: Vec<WindowHit>,
}

impl MealReport {
    pub fn is_open(&self) -> bool {
        !self.hits.is_empty()
    }
}

/// Detailed classification, listing what satisfied each meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationReport {
    pub meals: Vec<MealReport>,
}

impl ClassificationReport {
    fn closed() -> Self {
        Self {
            meals: Meal::ALL
                .iter()
                .map(|&meal| MealReport {
                    meal,
                    hits: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn classification(&self) -> Classification {
        let mut result = Classification::default();
        for report in &self.meals {
            result.set(report.meal, report.is_open());
        }
        result
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.meals {
            if report.is_open() {
                let hits: Vec<String> = report
                    .hits
                    .iter()
                    .map(|hit| format!("{} {}", weekday_label(hit.weekday), hit.range))
                    .collect();
                writeln!(f, "{}: open ({})", report.meal, hits.join(", "))?;
            } else {
                writeln!(f, "{}: closed", report.meal)?;
            }
        }
        Ok(())
    }
}

/// Why a schedule is not worth classifying.
fn degenerate_reason(events: &[Event]) -> Option<&'static str> {
    if events.is_empty() {
        return Some("empty schedule");
    }
    if !events.iter().any(Event::is_close) {
        return Some("schedule has no close events");
    }
    None
}

/// A periodized schedule ready for meal queries.
struct Schedule<'a> {
    timeline: Timeline,
    config: &'a ClassifierConfig,
}

impl<'a> Schedule<'a> {
    /// Returns `None` when the schedule is degenerate.
    fn build(
        entries: &[RawEntry],
        config: &'a ClassifierConfig,
    ) -> Result<Option<Self>, ScheduleError> {
        let period = config.period()?;
        let events = transform_all(entries, &config.reference)?;

        if let Some(reason) = degenerate_reason(&events) {
            tracing::debug!(reason, events = events.len(), "classifying as closed");
            return Ok(None);
        }

        let timeline = Timeline::periodize(&events, period)?;
        tracing::debug!(events = events.len(), timeline = timeline.len(), "built timeline");
        Ok(Some(Self { timeline, config }))
    }

    fn range_on(&self, weekday: Weekday, range: ClockRange) -> TimeRange {
        TimeRange::new(
            self.config.reference.instant(weekday, range.start()),
            self.config.reference.instant(weekday, range.end()),
        )
    }

    fn instances(&self, meal: Meal) -> impl Iterator<Item = WindowHit> + '_ {
        self.config.meals.ranges(meal).iter().flat_map(|&range| {
            WEEKDAYS
                .iter()
                .map(move |&weekday| WindowHit { weekday, range })
        })
    }

    fn is_hit(&self, hit: &WindowHit) -> bool {
        self.timeline
            .opened_throughout(self.range_on(hit.weekday, hit.range))
    }

    fn serves(&self, meal: Meal) -> bool {
        self.instances(meal).any(|hit| self.is_hit(&hit))
    }

    fn hits(&self, meal: Meal) -> Vec<WindowHit> {
        self.instances(meal).filter(|hit| self.is_hit(hit)).collect()
    }
}

/// Classifies a weekly schedule into breakfast, dinner and supper flags.
pub fn classify(
    entries: &[RawEntry],
    config: &ClassifierConfig,
) -> Result<Classification, ScheduleError> {
    let Some(schedule) = Schedule::build(entries, config)? else {
        return Ok(Classification::default());
    };

    let served: Vec<(Meal, bool)> = Meal::ALL
        .par_iter()
        .map(|&meal| (meal, schedule.serves(meal)))
        .collect();

    let mut result = Classification::default();
    for (meal, open) in served {
        result.set(meal, open);
    }
    Ok(result)
}

/// [`classify`] with the built-in reference week and meal windows.
pub fn classify_default(entries: &[RawEntry]) -> Result<Classification, ScheduleError> {
    classify(entries, &ClassifierConfig::default())
}

/// Like [`classify`], but records every weekday range that was open.
pub fn explain(
    entries: &[RawEntry],
    config: &ClassifierConfig,
) -> Result<ClassificationReport, ScheduleError> {
    let Some(schedule) = Schedule::build(entries, config)? else {
        return Ok(ClassificationReport::closed());
    };

    let meals = Meal::ALL
        .par_iter()
        .map(|&meal| MealReport {
            meal,
            hits: schedule.hits(meal),
        })
        .collect();
    Ok(ClassificationReport { meals })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(raw: &[(&str, &str)]) -> Vec<RawEntry> {
        raw.iter()
            .map(|(label, time)| RawEntry::new(*label, *time))
            .collect()
    }

    fn all_week(open: &str, close: &str) -> Vec<RawEntry> {
        WEEKDAYS
            .iter()
            .flat_map(|&day| {
                let day = weekday_label(day);
                [
                    RawEntry::new(format!("{day}_1_open"), open),
                    RawEntry::new(format!("{day}_1_close"), close),
                ]
            })
            .collect()
    }

    #[test]
    fn empty_schedule_is_closed() {
        let result = classify_default(&[]).unwrap();
        assert_eq!(result.to_array(), [false, false, false]);
    }

    #[test]
    fn open_only_schedule_is_closed() {
        let schedule = entries(&[
            ("mon_1_open", "09:00"),
            ("wed_1_open", "00:00"),
            ("sun_2_open", "18:30"),
        ]);
        assert_eq!(
            classify_default(&schedule).unwrap().to_array(),
            [false, false, false]
        );
    }

    #[test]
    fn close_only_schedule_is_closed() {
        let schedule = entries(&[("mon_1_close", "09:00"), ("tue_1_close", "22:00")]);
        assert_eq!(
            classify_default(&schedule).unwrap().to_array(),
            [false, false, false]
        );
    }

    #[test]
    fn two_days_nine_to_ten_pm() {
        let schedule = entries(&[
            ("mon_1_open", "09:00"),
            ("mon_1_close", "22:00"),
            ("tue_1_open", "09:00"),
            ("tue_1_close", "22:00"),
        ]);
        assert_eq!(
            classify_default(&schedule).unwrap().to_array(),
            [false, true, true]
        );
    }

    #[test]
    fn open_past_midnight_every_day() {
        let schedule = all_week("11:00", "01:00");
        assert_eq!(
            classify_default(&schedule).unwrap().to_array(),
            [false, true, true]
        );
    }

    #[test]
    fn early_opening_serves_breakfast_only() {
        let schedule = entries(&[("fri_1_open", "07:00"), ("fri_1_close", "11:00")]);
        assert_eq!(
            classify_default(&schedule).unwrap().to_array(),
            [true, false, false]
        );
    }

    #[test]
    fn one_covered_breakfast_range_is_enough() {
        // 08:00-08:30 is cut by the close, 08:30-09:00 is fully open.
        let schedule = entries(&[
            ("thu_1_open", "06:00"),
            ("thu_1_close", "08:15"),
            ("thu_2_open", "08:30"),
            ("thu_2_close", "09:00"),
        ]);
        assert!(classify_default(&schedule).unwrap().breakfast);
    }

    #[test]
    fn split_lunch_service_misses_dinner() {
        // Every dinner range straddles the 12:15 break.
        let schedule = entries(&[
            ("sat_1_open", "11:00"),
            ("sat_1_close", "12:15"),
            ("sat_2_open", "12:45"),
            ("sat_2_close", "23:00"),
        ]);
        let result = classify_default(&schedule).unwrap();
        assert!(!result.dinner);
        assert!(result.supper);
    }

    #[test]
    fn sunday_overnight_serves_monday_breakfast() {
        let schedule = entries(&[("sun_1_open", "22:00"), ("mon_1_close", "10:00")]);
        assert_eq!(
            classify_default(&schedule).unwrap().to_array(),
            [true, false, false]
        );
    }

    #[test]
    fn close_wins_at_simultaneous_events() {
        let schedule = entries(&[
            ("mon_1_open", "08:00"),
            ("mon_1_close", "08:00"),
            ("mon_2_close", "23:00"),
        ]);
        assert_eq!(
            classify_default(&schedule).unwrap().to_array(),
            [false, false, false]
        );
    }

    #[test]
    fn classification_is_idempotent() {
        let schedule = all_week("07:30", "14:00");
        let first = classify_default(&schedule).unwrap();
        let second = classify_default(&schedule).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_array(), [true, true, false]);
    }

    #[test]
    fn malformed_entry_fails_whole_classification() {
        let schedule = entries(&[("mon_1_open", "09:00"), ("mon_1_close", "22h00")]);
        let err = classify_default(&schedule).unwrap_err();
        assert!(matches!(err, ScheduleError::MalformedClockTime { .. }));

        let schedule = entries(&[("lun_1_open", "09:00")]);
        let err = classify_default(&schedule).unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownWeekday { .. }));
    }

    #[test]
    fn malformed_open_only_schedule_still_fails() {
        let schedule = entries(&[("mon_1_open", "9:xx")]);
        assert!(classify_default(&schedule).is_err());
    }

    #[test]
    fn custom_windows_change_the_outcome() {
        let schedule = entries(&[("mon_1_open", "09:00"), ("mon_1_close", "22:00")]);
        let config = ClassifierConfig {
            meals: MealWindows {
                breakfast: vec![
                    "[\"08:30\",\"09:00\"]",
                    "[\"09:00\",\"10:00\"]",
                ]
                .into_iter()
                .map(|json| serde_json::from_str(json).unwrap())
                .collect(),
                ..MealWindows::default()
            },
            ..ClassifierConfig::default()
        };
        assert!(classify(&schedule, &config).unwrap().breakfast);
    }

    #[test]
    fn zero_period_is_rejected() {
        let config = ClassifierConfig {
            period_days: 0,
            ..ClassifierConfig::default()
        };
        assert!(config.validate().is_err());
        let schedule = entries(&[("mon_1_open", "09:00"), ("mon_1_close", "22:00")]);
        assert_eq!(
            classify(&schedule, &config).unwrap_err(),
            ScheduleError::InvalidPeriod { days: 0 }
        );
    }

    #[test]
    fn oversized_period_is_rejected_not_a_panic() {
        let schedule = entries(&[("mon_1_open", "09:00"), ("mon_1_close", "22:00")]);
        for days in [367, 200_000_000, u32::MAX] {
            let config = ClassifierConfig {
                period_days: days,
                ..ClassifierConfig::default()
            };
            assert_eq!(config.validate(), Err(ScheduleError::InvalidPeriod { days }));
            assert_eq!(
                classify(&schedule, &config).unwrap_err(),
                ScheduleError::InvalidPeriod { days }
            );
        }

        let year = ClassifierConfig {
            period_days: 366,
            ..ClassifierConfig::default()
        };
        assert!(year.validate().is_ok());
        assert!(classify(&schedule, &year).is_ok());
    }

    #[test]
    fn explain_agrees_with_classify() {
        let schedule = entries(&[
            ("mon_1_open", "09:00"),
            ("mon_1_close", "22:00"),
            ("tue_1_open", "09:00"),
            ("tue_1_close", "22:00"),
        ]);
        let config = ClassifierConfig::default();
        let report = explain(&schedule, &config).unwrap();
        assert_eq!(report.classification(), classify(&schedule, &config).unwrap());

        insta::assert_snapshot!(report.to_string(), @r"
        breakfast: closed
        dinner: open (mon 11:30-12:30, tue 11:30-12:30, mon 12:00-13:00, tue 12:00-13:00, mon 12:30-13:30, tue 12:30-13:30)
        supper: open (mon 18:30-19:30, tue 18:30-19:30, mon 19:00-20:00, tue 19:00-20:00, mon 19:30-20:30, tue 19:30-20:30)
        ");
    }

    #[test]
    fn explain_degenerate_schedule_lists_all_meals_closed() {
        let report = explain(&[], &ClassifierConfig::default()).unwrap();
        assert_eq!(report.meals.len(), 3);
        assert!(report.meals.iter().all(|m| !m.is_open()));
    }

    #[test]
    fn classification_renders_lowercase() {
        let result = Classification::from([false, true, true]);
        assert_eq!(result.to_string(), "[false, true, true]");
        assert_eq!(serde_json::to_string(&result).unwrap(), "[false,true,true]");
        assert!(result.get(Meal::Dinner));
        assert!(!result.get(Meal::Breakfast));
    }
}
