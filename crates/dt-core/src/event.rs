//! Typed activity events decoded from the log.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single power, idle, or focus signal from the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// When the event occurred, as written in the log (no timezone).
    pub timestamp: NaiveDateTime,
    /// What happened.
    pub kind: EventKind,
}

impl Event {
    pub const fn new(timestamp: NaiveDateTime, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }
}

/// The kind of activity signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// The logger started.
    Started,
    /// An application came to the foreground.
    AppActivated {
        /// Bundle identifier of the application, e.g. `com.apple.Terminal`.
        app: String,
    },
    /// The user stopped interacting.
    Idle,
    /// The user resumed interacting.
    NotIdle,
    ScreenSleep,
    ScreenWakeUp,
    Sleep,
    WakeUp,
}
