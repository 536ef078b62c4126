//! Activity state machine.
//!
//! Nothing but `Active` can be entered from `Unknown`: until an application
//! has been seen there is nothing meaningful to attribute time to. Waking the
//! screen or the machine only ever reaches `Idle`; returning to `Active`
//! requires an explicit `NotIdle` or an application switch.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::{Event, EventKind};

/// Coarse activity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Unknown,
    Active,
    Idle,
    Sleeping,
}

impl Mode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Active => "active",
            Self::Idle => "idle",
            Self::Sleeping => "sleeping",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The machine's state: a mode plus the last application seen in the
/// foreground.
///
/// `app` is empty until the first `AppActivated` event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ActivityState {
    pub mode: Mode,
    pub app: String,
}

impl ActivityState {
    pub fn new(mode: Mode, app: impl Into<String>) -> Self {
        Self {
            mode,
            app: app.into(),
        }
    }

    fn with_mode(&self, mode: Mode) -> Self {
        Self {
            mode,
            app: self.app.clone(),
        }
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.app.is_empty() {
            write!(f, "{}", self.mode)
        } else {
            write!(f, "{}({})", self.mode, self.app)
        }
    }
}

/// Computes the state that follows `state` once `event` has been observed.
pub fn transition(state: &ActivityState, event: &Event) -> ActivityState {
    use EventKind as E;
    use Mode as M;

    match (state.mode, &event.kind) {
        // The log processor ignores `Started`.
        (_, E::Started) => state.clone(),

        (M::Unknown, E::AppActivated { app }) => ActivityState::new(M::Active, app.as_str()),
        (
            M::Unknown,
            E::Idle | E::NotIdle | E::ScreenSleep | E::ScreenWakeUp | E::Sleep | E::WakeUp,
        ) => state.clone(),

        (M::Active | M::Idle, E::AppActivated { app }) => {
            ActivityState::new(M::Active, app.as_str())
        }
        (M::Active, E::Idle | E::ScreenWakeUp | E::WakeUp) => state.with_mode(M::Idle),
        (M::Active, E::NotIdle) => state.clone(),
        (M::Active | M::Idle, E::ScreenSleep | E::Sleep) => state.with_mode(M::Sleeping),

        (M::Idle, E::Idle | E::ScreenWakeUp | E::WakeUp) => state.clone(),
        (M::Idle, E::NotIdle) => state.with_mode(M::Active),

        // The app switch is remembered so it is known once the machine wakes.
        (M::Sleeping, E::AppActivated { app }) => ActivityState::new(M::Sleeping, app.as_str()),
        (M::Sleeping, E::Idle | E::NotIdle | E::ScreenSleep | E::Sleep) => state.clone(),
        (M::Sleeping, E::ScreenWakeUp | E::WakeUp) => state.with_mode(M::Idle),
    }
}
