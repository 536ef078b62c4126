//! Single-pass driver combining the state machine and the accumulator.

use crate::accumulator::{Accumulator, AccumulatorConfig};
use crate::event::Event;
use crate::state::{ActivityState, transition};
use crate::totals::DailyTotals;

/// Feeds events through the state machine and accounts for every change.
#[derive(Debug, Clone, Default)]
pub struct ActivityTracker {
    state: ActivityState,
    accumulator: Accumulator,
    events_seen: usize,
}

impl ActivityTracker {
    pub fn new(config: AccumulatorConfig) -> Self {
        Self {
            state: ActivityState::default(),
            accumulator: Accumulator::new(config),
            events_seen: 0,
        }
    }

    /// Processes one event. Events must arrive in log order.
    pub fn feed(&mut self, event: &Event) {
        let next = transition(&self.state, event);
        if next != self.state {
            tracing::debug!(
                from = %self.state,
                to = %next,
                at = %event.timestamp,
                "state changed"
            );
        }
        self.accumulator.record(&self.state, event, &next);
        self.state = next;
        self.events_seen += 1;
    }

    pub const fn state(&self) -> &ActivityState {
        &self.state
    }

    pub const fn totals(&self) -> &DailyTotals {
        self.accumulator.totals()
    }

    pub const fn events_seen(&self) -> usize {
        self.events_seen
    }

    pub fn finish(self) -> DailyTotals {
        tracing::debug!(
            events = self.events_seen,
            days = self.accumulator.totals().len(),
            "tracking finished"
        );
        self.accumulator.finalize()
    }
}

/// Runs a complete pass over `events`.
pub fn track<'a, I>(events: I, config: AccumulatorConfig) -> DailyTotals
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut tracker = ActivityTracker::new(config);
    for event in events {
        tracker.feed(event);
    }
    tracker.finish()
}
