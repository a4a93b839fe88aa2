use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{Mode, Phase};

/// Every state change in the widget produces an Event.
/// Front-ends render from state; events are for logging and side channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ModeChanged {
        from: Mode,
        to: Mode,
        /// A countdown or stopwatch was running and got stopped silently.
        was_running: bool,
        at: DateTime<Utc>,
    },
    Started {
        mode: Mode,
        at: DateTime<Utc>,
    },
    Paused {
        mode: Mode,
        at: DateTime<Utc>,
    },
    Reset {
        mode: Mode,
        at: DateTime<Utc>,
    },
    /// A countdown reached zero while running.
    TimerCompleted {
        mode: Mode,
        at: DateTime<Utc>,
    },
    PhaseChanged {
        phase: Phase,
        cycle: u32,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    SettingsUpdated {
        /// Idle counters were re-initialised from the new durations.
        resynced: bool,
        at: DateTime<Utc>,
    },
    VisibilityChanged {
        visible: bool,
        at: DateTime<Utc>,
    },
    LockToggled {
        locked: bool,
        at: DateTime<Utc>,
    },
    /// Pass-through request for the front-end; the core keeps no state for it.
    FullscreenToggled {
        at: DateTime<Utc>,
    },
}
