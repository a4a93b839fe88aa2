//! Composition root.
//!
//! [`Widget`] ties the settings store, the mode state machine, the idle
//! controller and the audio sink together. Front-ends own one `Widget` and
//! forward scheduler pulses and raw input to it; everything they need to
//! render is available through the query methods.

use std::time::Instant;

use chrono::{NaiveDateTime, Utc};

use crate::audio::AudioSink;
use crate::clock::{Action, DisplayTime, Mode, ModeController};
use crate::error::Result;
use crate::events::Event;
use crate::idle::IdleVisibilityController;
use crate::input::{shortcut_for, InputEvent, PointerKind, Shortcut};
use crate::settings::{AppSettings, SettingsBackend, SettingsPatch, SettingsStore};

pub struct Widget<B: SettingsBackend, A: AudioSink> {
    settings: SettingsStore<B>,
    clock: ModeController,
    idle: IdleVisibilityController,
    audio: A,
}

impl<B: SettingsBackend, A: AudioSink> Widget<B, A> {
    /// Load settings from `backend` and start in Clock mode.
    pub fn new(backend: B, audio: A, wall: NaiveDateTime, now: Instant) -> Self {
        let settings = SettingsStore::open(backend);
        let clock = ModeController::new(settings.get().clone(), wall);
        Self {
            settings,
            clock,
            idle: IdleVisibilityController::new(now),
            audio,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn clock(&self) -> &ModeController {
        &self.clock
    }

    pub fn idle(&self) -> &IdleVisibilityController {
        &self.idle
    }

    pub fn settings(&self) -> &AppSettings {
        self.settings.get()
    }

    pub fn settings_store(&self) -> &SettingsStore<B> {
        &self.settings
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn display(&self) -> DisplayTime {
        self.clock.display()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Forward an action to the mode state machine.
    pub fn dispatch(&mut self, action: Action) -> Vec<Event> {
        self.clock.dispatch(action, &self.audio)
    }

    pub fn set_mode(&mut self, mode: Mode) -> Vec<Event> {
        self.dispatch(Action::SetMode(mode))
    }

    /// One-second pulse.
    pub fn tick(&mut self, wall: NaiveDateTime) -> Vec<Event> {
        self.dispatch(Action::Tick(wall))
    }

    /// Half-second idle check.
    pub fn poll_idle(&mut self, now: Instant) -> Vec<Event> {
        if self.idle.poll(now) {
            vec![self.visibility_event()]
        } else {
            Vec::new()
        }
    }

    /// Raw interaction. Refreshes idle recency and, for eligible key
    /// presses, runs the matching shortcut.
    pub fn handle_input(&mut self, input: InputEvent, now: Instant) -> Vec<Event> {
        let mut events = Vec::new();
        let changed = match &input {
            InputEvent::Pointer(PointerKind::Leave) => self.idle.pointer_left(),
            _ => self.idle.interact(now),
        };
        if changed {
            events.push(self.visibility_event());
        }

        if let InputEvent::Key { key, origin } = &input {
            if let Some(shortcut) = shortcut_for(key, *origin, self.idle.is_locked()) {
                events.extend(self.run_shortcut(shortcut));
            }
        }
        events
    }

    pub fn toggle_lock(&mut self, now: Instant) -> Vec<Event> {
        let locked = self.idle.toggle_lock(now);
        tracing::debug!(locked, "lock toggled");
        vec![
            Event::LockToggled {
                locked,
                at: Utc::now(),
            },
            self.visibility_event(),
        ]
    }

    /// Merge a settings patch, persist it and re-sync idle counters.
    pub fn update_settings(&mut self, patch: SettingsPatch) -> Vec<Event> {
        let next = self.settings.merge(patch).clone();
        self.dispatch(Action::UpdateSettings(next))
    }

    /// Set one settings field by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed;
    /// nothing changes in that case.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<Vec<Event>> {
        let next = self.settings.set_field(key, value)?.clone();
        Ok(self.dispatch(Action::UpdateSettings(next)))
    }

    fn run_shortcut(&mut self, shortcut: Shortcut) -> Vec<Event> {
        match shortcut {
            Shortcut::ToggleRun => self.dispatch(Action::ToggleRun),
            Shortcut::Reset => self.dispatch(Action::Reset),
            Shortcut::Fullscreen => vec![Event::FullscreenToggled { at: Utc::now() }],
        }
    }

    fn visibility_event(&self) -> Event {
        Event::VisibilityChanged {
            visible: self.idle.is_visible(),
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::settings::MemoryBackend;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn wall() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn widget() -> (Widget<MemoryBackend, RecordingAudio>, MemoryBackend, Instant) {
        let backend = MemoryBackend::new();
        let now = Instant::now();
        let w = Widget::new(backend.clone(), RecordingAudio::new(), wall(), now);
        (w, backend, now)
    }

    #[test]
    fn space_toggles_run_outside_clock() {
        let (mut w, _, now) = widget();
        w.handle_input(InputEvent::key(" "), now);
        assert!(!w.clock().is_running());

        w.set_mode(Mode::Stopwatch);
        w.handle_input(InputEvent::key(" "), now);
        assert!(w.clock().is_running());
    }

    #[test]
    fn text_entry_refreshes_idle_but_skips_shortcuts() {
        let (mut w, _, now) = widget();
        w.set_mode(Mode::Timer);
        let later = now + Duration::from_secs(10);
        w.poll_idle(later);
        assert!(!w.idle().is_visible());

        let events = w.handle_input(InputEvent::text_entry(" "), later);
        assert!(w.idle().is_visible());
        assert_eq!(w.idle().last_interaction(), later);
        assert!(!w.clock().is_running());
        assert!(matches!(
            events.as_slice(),
            [Event::VisibilityChanged { visible: true, .. }]
        ));
    }

    #[test]
    fn shortcuts_disabled_while_locked() {
        let (mut w, _, now) = widget();
        w.set_mode(Mode::Timer);
        w.toggle_lock(now);
        w.handle_input(InputEvent::key(" "), now);
        assert!(!w.clock().is_running());
        assert!(!w.idle().is_visible());
    }

    #[test]
    fn fullscreen_is_pass_through() {
        let (mut w, _, now) = widget();
        let events = w.handle_input(InputEvent::key("f"), now);
        assert!(matches!(events.as_slice(), [Event::FullscreenToggled { .. }]));
    }

    #[test]
    fn settings_edit_persists_and_resyncs() {
        let (mut w, backend, _) = widget();
        w.set_mode(Mode::Timer);
        w.update_settings(SettingsPatch {
            timer_duration_seconds: Some(600),
            ..Default::default()
        });
        assert_eq!(w.clock().runtime().timer_left_secs, 600);
        assert_eq!(backend.stored().unwrap().timer_duration_seconds, 600);
    }

    #[test]
    fn set_setting_by_key() {
        let (mut w, backend, _) = widget();
        w.set_setting("is_24h", "false").unwrap();
        assert!(!w.settings().is_24h);
        assert!(!w.clock().settings().is_24h);
        assert_eq!(w.display().to_string(), "12:00:00 PM");
        assert!(!backend.stored().unwrap().is_24h);
    }

    #[test]
    fn set_setting_rejects_bad_key() {
        let (mut w, backend, _) = widget();
        assert!(w.set_setting("volume", "1").is_err());
        assert!(backend.stored().is_none());
    }

    #[test]
    fn out_of_range_persisted_settings_are_clamped() {
        let backend = MemoryBackend::with(AppSettings {
            pomo_cycles: 0,
            timer_duration_seconds: 9_999_999,
            ..Default::default()
        });
        let mut w = Widget::new(backend, RecordingAudio::new(), wall(), Instant::now());
        w.set_mode(Mode::Pomodoro);
        assert_eq!(w.settings().pomo_cycles, 1);
        assert_eq!(w.clock().status_label().as_deref(), Some("focus — cycle 1/1"));

        w.set_mode(Mode::Timer);
        assert_eq!(w.display().to_string(), "99:59:00");
    }

    #[test]
    fn loads_persisted_settings() {
        let backend = MemoryBackend::with(AppSettings {
            pomo_cycles: 7,
            ..Default::default()
        });
        let w = Widget::new(backend, RecordingAudio::new(), wall(), Instant::now());
        assert_eq!(w.settings().pomo_cycles, 7);
        assert_eq!(w.clock().settings().pomo_cycles, 7);
    }
}
