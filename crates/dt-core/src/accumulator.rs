//! Interval accounting.
//!
//! Every time the activity state changes, the span since the previous change
//! is credited to the label of the state that just ended. Spans crossing
//! midnight are split so each calendar day receives exactly its overlap.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::event::Event;
use crate::state::{ActivityState, Mode};
use crate::totals::{DailyTotals, Label};

/// Application identifier shown while the screen is locked.
pub const DEFAULT_LOCK_SCREEN_APP: &str = "com.apple.loginwindow";

/// Configuration for interval attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccumulatorConfig {
    /// Foreground time in this application counts as `**LOCKED**`.
    pub lock_screen_app: String,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            lock_screen_app: DEFAULT_LOCK_SCREEN_APP.to_string(),
        }
    }
}

/// Collects per-day totals from a sequence of state changes.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    config: AccumulatorConfig,
    last_transition: Option<NaiveDateTime>,
    totals: DailyTotals,
}

impl Accumulator {
    pub fn new(config: AccumulatorConfig) -> Self {
        Self {
            config,
            last_transition: None,
            totals: DailyTotals::new(),
        }
    }

    /// Label for time spent in `state`.
    pub fn label_for(&self, state: &ActivityState) -> Label {
        match state.mode {
            Mode::Active if state.app == self.config.lock_screen_app => Label::Locked,
            Mode::Active => Label::App(state.app.clone()),
            Mode::Idle => Label::Idle,
            Mode::Sleeping => Label::Sleeping,
            Mode::Unknown => Label::Unknown,
        }
    }

    /// Records the outcome of one event.
    ///
    /// Nothing happens unless `next` differs from `prev`. The first change
    /// has no earlier instant to measure from, so it only starts the clock.
    pub fn record(&mut self, prev: &ActivityState, event: &Event, next: &ActivityState) {
        if prev == next {
            return;
        }

        if let Some(start) = self.last_transition {
            let label = self.label_for(prev);
            self.credit(&label, start, event.timestamp);
        }

        self.last_transition = Some(event.timestamp);
    }

    fn credit(&mut self, label: &Label, start: NaiveDateTime, end: NaiveDateTime) {
        if end < start {
            tracing::warn!(
                %label,
                %start,
                %end,
                "interval ends before it starts; crediting negative duration"
            );
            self.totals.add(start.date(), label, end - start);
            return;
        }

        let mut cursor = start;
        while cursor.date() < end.date() {
            let Some(next_day) = cursor.date().succ_opt() else {
                break;
            };
            let midnight = next_day.and_time(NaiveTime::MIN);
            self.add_nonzero(cursor, label, midnight - cursor);
            cursor = midnight;
        }
        self.add_nonzero(cursor, label, end - cursor);
    }

    fn add_nonzero(&mut self, at: NaiveDateTime, label: &Label, duration: Duration) {
        if !duration.is_zero() {
            self.totals.add(at.date(), label, duration);
        }
    }

    /// Time of the most recent state change, if any.
    pub const fn last_transition(&self) -> Option<NaiveDateTime> {
        self.last_transition
    }

    pub const fn totals(&self) -> &DailyTotals {
        &self.totals
    }

    /// Consumes the accumulator, returning the final totals.
    pub fn finalize(self) -> DailyTotals {
        self.totals
    }
}
