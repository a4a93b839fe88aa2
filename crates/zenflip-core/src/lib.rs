//! # ZenFlip Core Library
//!
//! Time-keeping core for the ZenFlip flip-clock widget: a clock, a countdown
//! timer, a stopwatch and a focus/break Pomodoro cycle, plus the idle logic
//! that fades the controls away. Rendering, themes and sound synthesis live
//! in front-ends; this crate produces the values they draw and the events
//! they react to.
//!
//! ## Architecture
//!
//! - **Settings**: TOML-persisted [`AppSettings`] behind a [`SettingsStore`]
//! - **Mode controller**: a reducer-style state machine ([`ModeController`])
//!   that the caller pulses once per second
//! - **Pomodoro engine**: focus/break sub-machine nested in Pomodoro mode
//! - **Scheduler**: tokio-backed periodic drivers ([`TickScheduler`])
//! - **Idle visibility**: interaction recency and manual lock
//! - **Display**: pure projection into hours/minutes/seconds/meridiem
//!
//! ## Key Components
//!
//! - [`Widget`]: composition root used by front-ends
//! - [`AudioSink`]: injected sound capability

pub mod audio;
pub mod clock;
pub mod error;
pub mod events;
pub mod idle;
pub mod input;
pub mod scheduler;
pub mod settings;
pub mod widget;

pub use audio::{AudioSink, NullAudio, RecordingAudio, Sound};
pub use clock::{Action, DisplayTime, Meridiem, Mode, ModeController, Phase, PomodoroEngine, TimerRuntime};
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use events::Event;
pub use idle::{IdleVisibilityController, IDLE_THRESHOLD};
pub use input::{InputEvent, KeyOrigin, PointerKind, Shortcut};
pub use scheduler::{TickScheduler, IDLE_POLL_PERIOD, TICK_PERIOD};
pub use settings::{
    AppSettings, MemoryBackend, SettingsBackend, SettingsPatch, SettingsStore, SoundSettings,
    TickInterval, TickKind, TomlFileBackend,
};
pub use widget::Widget;
