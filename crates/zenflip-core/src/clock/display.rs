//! Projection of widget state into renderable clock fields.
//!
//! Everything here is pure and can be called at any rate.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::controller::TimerRuntime;
use super::pomodoro::PomodoroEngine;
use super::Mode;

/// Hours shown for countdowns and the stopwatch never exceed two digits.
pub const MAX_DISPLAY_HOURS: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Meridiem {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Meridiem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

/// Renderable clock face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    /// Only set for the 12-hour wall clock.
    pub meridiem: Option<Meridiem>,
}

impl fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)?;
        if let Some(m) = self.meridiem {
            write!(f, " {}", m.as_str())?;
        }
        Ok(())
    }
}

/// Wall clock in 24h or 12h form.
pub fn project_wall(wall: NaiveTime, is_24h: bool) -> DisplayTime {
    let h = wall.hour();
    let (hours, meridiem) = if is_24h {
        (h, None)
    } else {
        let meridiem = if h >= 12 { Meridiem::Pm } else { Meridiem::Am };
        let h12 = match h % 12 {
            0 => 12,
            other => other,
        };
        (h12, Some(meridiem))
    };
    DisplayTime {
        hours,
        minutes: wall.minute(),
        seconds: wall.second(),
        meridiem,
    }
}

/// Split a second count into h/m/s with hours clamped for display.
pub fn project_duration(total_secs: u64) -> DisplayTime {
    let hours = (total_secs / 3600).min(u64::from(MAX_DISPLAY_HOURS)) as u32;
    DisplayTime {
        hours,
        minutes: ((total_secs % 3600) / 60) as u32,
        seconds: (total_secs % 60) as u32,
        meridiem: None,
    }
}

/// Clock face for the active mode.
pub fn project(mode: Mode, runtime: &TimerRuntime, is_24h: bool, wall: NaiveTime) -> DisplayTime {
    match mode {
        Mode::Clock => project_wall(wall, is_24h),
        Mode::Stopwatch => project_duration(runtime.stopwatch_secs),
        Mode::Timer | Mode::Pomodoro => project_duration(u64::from(runtime.timer_left_secs)),
    }
}

/// Secondary label shown above the digits.
pub fn status_label(
    mode: Mode,
    runtime: &TimerRuntime,
    pomodoro: &PomodoroEngine,
    cycles: u32,
) -> Option<String> {
    match mode {
        Mode::Clock => None,
        Mode::Pomodoro => Some(pomodoro.label(cycles)),
        Mode::Timer | Mode::Stopwatch => Some(if runtime.running {
            "Running".to_string()
        } else {
            "Paused".to_string()
        }),
    }
}
