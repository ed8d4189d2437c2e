//! Periodized event timeline and range queries over it.
//!
//! A weekly schedule only lists the events of one reference week. To answer
//! queries near the edges of that week (a Monday breakfast served since the
//! Sunday evening opening, say), every event is replicated one period before
//! and one period after. Queries inside the reference week then always find
//! their neighbouring events.

use chrono::{Duration, NaiveDateTime};

use crate::event::Event;
use crate::event_kind::EventKind;
use crate::types::{ScheduleError, TimeRange};

/// Default replication period: one week.
pub fn default_period() -> Duration {
    Duration::weeks(1)
}

fn shift(timestamp: NaiveDateTime, by: Duration) -> Result<NaiveDateTime, ScheduleError> {
    timestamp
        .checked_add_signed(by)
        .ok_or(ScheduleError::TimestampOverflow {
            timestamp,
            days: by.num_days(),
        })
}

/// Events sorted ascending by `(timestamp, kind)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    events: Vec<Event>,
}

impl Timeline {
    /// Replicates each event at `-period` and `+period` and sorts the result.
    pub fn periodize(events: &[Event], period: Duration) -> Result<Self, ScheduleError> {
        let mut replicated = Vec::with_capacity(events.len() * 3);
        for event in events {
            replicated.extend([
                Event::new(shift(event.timestamp, -period)?, event.kind),
                *event,
                Event::new(shift(event.timestamp, period)?, event.kind),
            ]);
        }

        // The full (timestamp, kind) key decides order, never input position.
        replicated.sort_unstable();
        Ok(Self { events: replicated })
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the latest event at or before `at`.
    ///
    /// When an open and a close share that timestamp the close is returned.
    /// `None` means `at` lies before the timeline's coverage.
    pub fn immediately_prior(&self, at: NaiveDateTime) -> Option<&Event> {
        let idx = self.events.partition_point(|e| e.timestamp <= at);
        idx.checked_sub(1).map(|i| &self.events[i])
    }

    /// Returns the events with a timestamp in `[range.start, range.end)`.
    pub fn events_between(&self, range: TimeRange) -> &[Event] {
        let start = self.events.partition_point(|e| e.timestamp < range.start);
        let end = self.events.partition_point(|e| e.timestamp < range.end);
        if end <= start {
            return &[];
        }
        &self.events[start..end]
    }

    /// True if the business is open entering `range` and does not close
    /// before it ends.
    pub fn opened_throughout(&self, range: TimeRange) -> bool {
        let Some(prior) = self.immediately_prior(range.start) else {
            tracing::warn!(?range, "range starts before timeline coverage");
            return false;
        };
        if prior.kind != EventKind::Open {
            return false;
        }
        !self.events_between(range).iter().any(Event::is_close)
    }
}
