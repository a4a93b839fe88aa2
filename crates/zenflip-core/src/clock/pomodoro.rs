use serde::{Deserialize, Serialize};

use crate::settings::AppSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Focus => "focus",
            Phase::Break => "break",
        }
    }
}

/// Focus/break sub-machine for Pomodoro mode.
///
/// ```text
/// focus --(expiry)--> break --(expiry, cycle += 1 or wrap to 1)--> focus
/// ```
///
/// There is no terminal state; the loop runs until the mode changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroEngine {
    phase: Phase,
    /// 1-based, always within `[1, pomo_cycles]`.
    cycle: u32,
}

impl Default for PomodoroEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PomodoroEngine {
    pub fn new() -> Self {
        Self {
            phase: Phase::Focus,
            cycle: 1,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Back to focus, cycle 1. Returns the focus length in seconds.
    pub fn reset(&mut self, settings: &AppSettings) -> u32 {
        *self = Self::new();
        settings.focus_seconds()
    }

    /// Back to focus keeping the cycle. Returns the focus length in seconds.
    pub(crate) fn restart_focus(&mut self, settings: &AppSettings) -> u32 {
        self.phase = Phase::Focus;
        settings.focus_seconds()
    }

    /// Move to the next phase after the countdown expired.
    /// Returns the new phase's length in seconds.
    pub fn advance(&mut self, settings: &AppSettings) -> u32 {
        match self.phase {
            Phase::Focus => {
                self.phase = Phase::Break;
                settings.break_seconds()
            }
            Phase::Break => {
                self.phase = Phase::Focus;
                self.cycle = if self.cycle >= settings.pomo_cycles {
                    1
                } else {
                    self.cycle + 1
                };
                settings.focus_seconds()
            }
        }
    }

    /// Keep the cycle inside `[1, cycles]` after the bound changed.
    pub(crate) fn clamp_cycle(&mut self, cycles: u32) {
        self.cycle = self.cycle.clamp(1, cycles.max(1));
    }

    /// Human label, e.g. `focus — cycle 2/4`.
    pub fn label(&self, cycles: u32) -> String {
        format!("{} — cycle {}/{}", self.phase.as_str(), self.cycle, cycles)
    }
}
