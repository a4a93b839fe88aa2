//! Mode state machine.
//!
//! [`ModeController`] owns the per-mode counters and the run flag. All
//! mutation goes through [`ModeController::dispatch`], which takes an
//! [`Action`], applies it, and returns the resulting events. It does not
//! spawn timers; the caller feeds it [`Action::Tick`] once per second.
//!
//! ## Transitions
//!
//! ```text
//! SetMode(m)   : running = false, counters for m re-initialised
//! ToggleRun    : running = !running   (ignored in Clock)
//! Reset        : running = false, counters for current mode re-initialised
//! Tick(now)    : advance the active counter; countdown hitting 0 completes
//! Settings(s)  : idle counters re-synced to new durations
//! ```

use chrono::{NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::display::{self, DisplayTime};
use super::pomodoro::PomodoroEngine;
use super::sound;
use super::Mode;
use crate::audio::AudioSink;
use crate::events::Event;
use crate::settings::AppSettings;

/// Per-mode counters.
///
/// `timer_left_secs` serves both Timer and Pomodoro; `stopwatch_secs` is
/// independent. Both survive pause and are re-initialised on reset or
/// mode entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerRuntime {
    pub timer_left_secs: u32,
    pub stopwatch_secs: u64,
    pub running: bool,
}

/// Input to [`ModeController::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetMode(Mode),
    ToggleRun,
    Reset,
    /// One scheduler pulse, carrying the local wall time.
    Tick(NaiveDateTime),
    /// New settings snapshot.
    UpdateSettings(AppSettings),
}

#[derive(Debug, Clone)]
pub struct ModeController {
    settings: AppSettings,
    mode: Mode,
    runtime: TimerRuntime,
    pomodoro: PomodoroEngine,
    wall: NaiveDateTime,
}

impl ModeController {
    /// Start in Clock mode showing `now`.
    pub fn new(settings: AppSettings, now: NaiveDateTime) -> Self {
        Self {
            settings,
            mode: Mode::Clock,
            runtime: TimerRuntime::default(),
            pomodoro: PomodoroEngine::new(),
            wall: now,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn runtime(&self) -> &TimerRuntime {
        &self.runtime
    }

    pub fn pomodoro(&self) -> &PomodoroEngine {
        &self.pomodoro
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn is_running(&self) -> bool {
        self.runtime.running
    }

    /// Wall time as of the last tick.
    pub fn wall_time(&self) -> NaiveTime {
        self.wall.time()
    }

    pub fn display(&self) -> DisplayTime {
        display::project(self.mode, &self.runtime, self.settings.is_24h, self.wall.time())
    }

    pub fn status_label(&self) -> Option<String> {
        display::status_label(self.mode, &self.runtime, &self.pomodoro, self.settings.pomo_cycles)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply one action. Sounds go to `audio`; the returned events describe
    /// what changed.
    pub fn dispatch(&mut self, action: Action, audio: &dyn AudioSink) -> Vec<Event> {
        let mut events = Vec::new();
        match action {
            Action::SetMode(mode) => self.set_mode(mode, &mut events),
            Action::ToggleRun => self.toggle_run(&mut events),
            Action::Reset => self.reset(&mut events),
            Action::Tick(now) => self.tick(now, audio, &mut events),
            Action::UpdateSettings(settings) => self.update_settings(settings, &mut events),
        }
        events
    }

    fn set_mode(&mut self, mode: Mode, events: &mut Vec<Event>) {
        let from = self.mode;
        let was_running = self.runtime.running;
        self.mode = mode;
        self.runtime.running = false;
        self.init_counters();
        tracing::debug!(from = from.as_str(), to = mode.as_str(), was_running, "mode changed");
        events.push(Event::ModeChanged {
            from,
            to: mode,
            was_running,
            at: Utc::now(),
        });
    }

    fn toggle_run(&mut self, events: &mut Vec<Event>) {
        if !self.mode.has_run_state() {
            return;
        }
        self.runtime.running = !self.runtime.running;
        let at = Utc::now();
        events.push(if self.runtime.running {
            Event::Started { mode: self.mode, at }
        } else {
            Event::Paused { mode: self.mode, at }
        });
    }

    fn reset(&mut self, events: &mut Vec<Event>) {
        self.runtime.running = false;
        if !self.mode.has_run_state() {
            return;
        }
        self.init_counters();
        events.push(Event::Reset {
            mode: self.mode,
            at: Utc::now(),
        });
    }

    /// Fresh counters for the current mode.
    fn init_counters(&mut self) {
        match self.mode {
            Mode::Clock => {}
            Mode::Timer => self.runtime.timer_left_secs = self.settings.timer_duration_seconds,
            Mode::Stopwatch => self.runtime.stopwatch_secs = 0,
            Mode::Pomodoro => self.runtime.timer_left_secs = self.pomodoro.reset(&self.settings),
        }
    }

    fn tick(&mut self, now: NaiveDateTime, audio: &dyn AudioSink, events: &mut Vec<Event>) {
        self.wall = now;
        let wall = now.time();
        match self.mode {
            Mode::Clock => {
                sound::emit_tick(&self.settings.sound, wall, audio);
            }
            Mode::Stopwatch => {
                if self.runtime.running {
                    self.runtime.stopwatch_secs = self.runtime.stopwatch_secs.saturating_add(1);
                    sound::emit_tick(&self.settings.sound, wall, audio);
                }
            }
            Mode::Timer | Mode::Pomodoro => {
                if !self.runtime.running {
                    return;
                }
                if self.runtime.timer_left_secs > 0 {
                    self.runtime.timer_left_secs -= 1;
                    sound::emit_tick(&self.settings.sound, wall, audio);
                }
                if self.runtime.timer_left_secs == 0 {
                    self.complete(audio, events);
                }
            }
        }
    }

    /// Countdown reached zero while running.
    fn complete(&mut self, audio: &dyn AudioSink, events: &mut Vec<Event>) {
        self.runtime.running = false;
        audio.play_alarm();
        tracing::info!(mode = self.mode.as_str(), "countdown completed");
        events.push(Event::TimerCompleted {
            mode: self.mode,
            at: Utc::now(),
        });

        if self.mode == Mode::Pomodoro {
            let duration_secs = self.pomodoro.advance(&self.settings);
            self.runtime.timer_left_secs = duration_secs;
            self.runtime.running = true;
            tracing::debug!(
                phase = self.pomodoro.phase().as_str(),
                cycle = self.pomodoro.cycle(),
                duration_secs,
                "pomodoro phase changed"
            );
            events.push(Event::PhaseChanged {
                phase: self.pomodoro.phase(),
                cycle: self.pomodoro.cycle(),
                duration_secs,
                at: Utc::now(),
            });
        }
    }

    fn update_settings(&mut self, settings: AppSettings, events: &mut Vec<Event>) {
        let prev = std::mem::replace(&mut self.settings, settings);
        self.pomodoro.clamp_cycle(self.settings.pomo_cycles);

        // Never touch counters of a running countdown; the new durations
        // apply at the next reset or mode entry.
        let resynced = !self.runtime.running && self.resync_idle(&prev);
        events.push(Event::SettingsUpdated {
            resynced,
            at: Utc::now(),
        });
    }

    fn resync_idle(&mut self, prev: &AppSettings) -> bool {
        let next = &self.settings;
        match self.mode {
            Mode::Timer if prev.timer_duration_seconds != next.timer_duration_seconds => {
                self.runtime.timer_left_secs = next.timer_duration_seconds;
                true
            }
            Mode::Pomodoro
                if prev.pomo_focus_minutes != next.pomo_focus_minutes
                    || prev.pomo_break_minutes != next.pomo_break_minutes =>
            {
                self.runtime.timer_left_secs = self.pomodoro.restart_focus(next);
                true
            }
            _ => false,
        }
    }
}
