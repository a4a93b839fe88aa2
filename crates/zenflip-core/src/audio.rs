//! Audio output capability.
//!
//! The state machine never synthesizes sound itself; it calls into an
//! injected [`AudioSink`]. Sinks are fire-and-forget: they must not block and
//! must swallow their own failures, so a broken backend can never stop the
//! tick loop.

use std::sync::{Arc, Mutex, PoisonError};

use crate::settings::TickKind;

pub trait AudioSink {
    /// Emit one tick sound. `volume` is in `[0, 1]`.
    fn play_tick(&self, kind: TickKind, volume: f64);
    /// Emit the completion alarm.
    fn play_alarm(&self);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_tick(&self, _kind: TickKind, _volume: f64) {}
    fn play_alarm(&self) {}
}

/// One recorded call on a [`RecordingAudio`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sound {
    Tick { kind: TickKind, volume: f64 },
    Alarm,
}

/// Records every call. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    log: Arc<Mutex<Vec<Sound>>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sounds(&self) -> Vec<Sound> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn tick_count(&self) -> usize {
        self.sounds()
            .iter()
            .filter(|s| matches!(s, Sound::Tick { .. }))
            .count()
    }

    pub fn alarm_count(&self) -> usize {
        self.sounds().iter().filter(|s| **s == Sound::Alarm).count()
    }

    pub fn clear(&self) {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn push(&self, sound: Sound) {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).push(sound);
    }
}

impl AudioSink for RecordingAudio {
    fn play_tick(&self, kind: TickKind, volume: f64) {
        self.push(Sound::Tick { kind, volume });
    }

    fn play_alarm(&self) {
        self.push(Sound::Alarm);
    }
}
