//! Core domain logic for daily activity accounting.
//!
//! This crate contains:
//! - Log decoding: turning activity log lines into typed events
//! - The activity state machine: mode and foreground app after each event
//! - Interval accounting: crediting time between state changes to per-day totals

mod accumulator;
pub mod event;
pub mod log;
pub mod state;
mod totals;
mod tracker;

pub use accumulator::{Accumulator, AccumulatorConfig, DEFAULT_LOCK_SCREEN_APP};
pub use event::{Event, EventKind};
pub use log::{DecodeError, decode_line, decode_log};
pub use state::{ActivityState, Mode, transition};
pub use totals::{DailyTotals, Label};
pub use tracker::{ActivityTracker, track};
