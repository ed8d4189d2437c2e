//! Core domain logic for business hours classification.
//!
//! This crate contains the fundamental types and logic for:
//! - Events: pinning `["mon_1_open", "09:00"]` entries to a reference week
//! - Timeline: periodizing weekly events and querying open ranges
//! - Classification: reducing meal window queries to breakfast/dinner/supper flags

mod classify;
pub mod event;
pub mod event_kind;
pub mod meal;
pub mod reference;
pub mod timeline;
mod types;

pub use classify::{
    Classification, ClassificationReport, ClassifierConfig, MealReport, WindowHit, classify,
    classify_default, explain,
};
pub use event::{Event, RawEntry, transform};
pub use event_kind::{EventKind, UnknownEventKind};
pub use meal::{Meal, MealWindows};
pub use reference::ReferenceWeek;
pub use timeline::Timeline;
pub use types::{ClockRange, ClockTime, ScheduleError, TimeRange};
