mod controller;
mod display;
mod pomodoro;
mod sound;

pub use controller::{Action, ModeController, TimerRuntime};
pub use display::{
    project, project_duration, project_wall, status_label, DisplayTime, Meridiem,
    MAX_DISPLAY_HOURS,
};
pub use pomodoro::{Phase, PomodoroEngine};
pub use sound::tick_due;

use serde::{Deserialize, Serialize};

/// The four mutually exclusive widget modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Clock,
    Timer,
    Stopwatch,
    Pomodoro,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Clock, Mode::Timer, Mode::Stopwatch, Mode::Pomodoro];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Clock => "clock",
            Mode::Timer => "timer",
            Mode::Stopwatch => "stopwatch",
            Mode::Pomodoro => "pomodoro",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "clock" => Some(Mode::Clock),
            "timer" => Some(Mode::Timer),
            "stopwatch" => Some(Mode::Stopwatch),
            "pomodoro" => Some(Mode::Pomodoro),
            _ => None,
        }
    }

    /// Clock always advances; every other mode can be started and paused.
    pub fn has_run_state(&self) -> bool {
        !matches!(self, Mode::Clock)
    }
}
