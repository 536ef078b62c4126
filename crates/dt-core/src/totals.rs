//! Per-day, per-label duration totals.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Serialize, Serializer};

/// The category an interval of time is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    /// Foreground time in an application, keyed by its identifier.
    App(String),
    /// The lock screen was in the foreground.
    Locked,
    Idle,
    Sleeping,
    /// Time after the log began but before any application was seen.
    Unknown,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::App(app) => write!(f, "{app}"),
            Self::Locked => write!(f, "**LOCKED**"),
            Self::Idle => write!(f, "**IDLE**"),
            Self::Sleeping => write!(f, "**SLEEPING**"),
            Self::Unknown => write!(f, "**UNKNOWN**"),
        }
    }
}

impl Serialize for Label {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Accumulated durations keyed by calendar day, then by label.
///
/// Days iterate in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyTotals {
    days: BTreeMap<NaiveDate, BTreeMap<Label, Duration>>,
}

impl DailyTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `duration` to `label` on `day`.
    pub fn add(&mut self, day: NaiveDate, label: &Label, duration: Duration) {
        let labels = self.days.entry(day).or_default();
        match labels.get_mut(label) {
            Some(total) => *total += duration,
            None => {
                labels.insert(label.clone(), duration);
            }
        }
    }

    /// Iterates over days in ascending order with their label totals.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &BTreeMap<Label, Duration>)> {
        self.days.iter().map(|(day, labels)| (*day, labels))
    }

    pub fn get(&self, day: NaiveDate) -> Option<&BTreeMap<Label, Duration>> {
        self.days.get(&day)
    }

    /// Returns the total for one label on one day, zero if never credited.
    pub fn label_total(&self, day: NaiveDate, label: &Label) -> Duration {
        self.days
            .get(&day)
            .and_then(|labels| labels.get(label))
            .copied()
            .unwrap_or_else(Duration::zero)
    }

    /// Sum over every label recorded on `day`.
    pub fn day_total(&self, day: NaiveDate) -> Duration {
        self.days
            .get(&day)
            .map_or_else(Duration::zero, |labels| labels.values().copied().sum())
    }

    /// Sum over every day and label.
    pub fn grand_total(&self) -> Duration {
        self.days
            .values()
            .flat_map(BTreeMap::values)
            .copied()
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }
}
