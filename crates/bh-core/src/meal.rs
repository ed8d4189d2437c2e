//! Meal periods and the clock ranges that define them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{ClockRange, ClockTime};

/// A meal period, in classification order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Dinner,
    Supper,
}

impl Meal {
    pub const ALL: [Self; 3] = [Self::Breakfast, Self::Dinner, Self::Supper];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Dinner => "dinner",
            Self::Supper => "supper",
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Clock ranges for each meal.
///
/// A meal is served if any one of its ranges is continuously open on any
/// weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MealWindows {
    pub breakfast: Vec<ClockRange>,
    pub dinner: Vec<ClockRange>,
    pub supper: Vec<ClockRange>,
}

impl MealWindows {
    pub fn ranges(&self, meal: Meal) -> &[ClockRange] {
        match meal {
            Meal::Breakfast => &self.breakfast,
            Meal::Dinner => &self.dinner,
            Meal::Supper => &self.supper,
        }
    }
}

impl Default for MealWindows {
    /// Breakfast ends at 09:00, so a business opening at 09:00 does not serve it.
    fn default() -> Self {
        Self {
            breakfast: vec![span((8, 0), (8, 30)), span((8, 30), (9, 0))],
            dinner: vec![
                span((11, 30), (12, 30)),
                span((12, 0), (13, 0)),
                span((12, 30), (13, 30)),
            ],
            supper: vec![
                span((18, 30), (19, 30)),
                span((19, 0), (20, 0)),
                span((19, 30), (20, 30)),
            ],
        }
    }
}

fn span(start: (u32, u32), end: (u32, u32)) -> ClockRange {
    let start = ClockTime::from_hm(start.0, start.1).expect("valid built-in clock time");
    let end = ClockTime::from_hm(end.0, end.1).expect("valid built-in clock time");
    ClockRange::new(start, end).expect("built-in meal range is not empty")
}
