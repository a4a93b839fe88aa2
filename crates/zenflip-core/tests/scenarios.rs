//! End-to-end scenarios through the `Widget` entry point.
//!
//! Ticks are fed by hand so every run is deterministic; the recording audio
//! sink stands in for the speaker.

use std::time::{Duration, Instant};

use chrono::{NaiveDate, NaiveDateTime};
use zenflip_core::{
    Event, InputEvent, Meridiem, MemoryBackend, Mode, Phase, RecordingAudio, SettingsPatch,
    Widget,
};

fn wall(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

fn widget_with(patch: SettingsPatch) -> (Widget<MemoryBackend, RecordingAudio>, RecordingAudio) {
    let audio = RecordingAudio::new();
    let mut w = Widget::new(MemoryBackend::new(), audio.clone(), wall(8, 0, 0), Instant::now());
    w.update_settings(patch);
    (w, audio)
}

fn run_ticks(w: &mut Widget<MemoryBackend, RecordingAudio>, n: i64) -> Vec<Event> {
    let start = wall(8, 0, 0);
    (1..=n)
        .flat_map(|i| w.tick(start + chrono::Duration::seconds(i)))
        .collect()
}

#[test]
fn timer_runs_down_and_fires_alarm_once() {
    let (mut w, audio) = widget_with(SettingsPatch {
        timer_duration_seconds: Some(5),
        ..Default::default()
    });
    w.set_mode(Mode::Timer);
    w.handle_input(InputEvent::key(" "), Instant::now());
    assert!(w.clock().is_running());

    run_ticks(&mut w, 5);

    assert!(!w.clock().is_running());
    assert_eq!(w.clock().runtime().timer_left_secs, 0);
    assert_eq!(audio.alarm_count(), 1);
    assert_eq!(w.display().to_string(), "00:00:00");
}

#[test]
fn pomodoro_two_full_cycles() {
    let (mut w, audio) = widget_with(SettingsPatch {
        pomo_focus_minutes: Some(1),
        pomo_break_minutes: Some(1),
        pomo_cycles: Some(2),
        ..Default::default()
    });
    w.set_mode(Mode::Pomodoro);
    w.handle_input(InputEvent::key("space"), Instant::now());

    let events = run_ticks(&mut w, 240);
    let phases: Vec<(Phase, u32)> = events
        .iter()
        .filter_map(|e| match e {
            Event::PhaseChanged { phase, cycle, .. } => Some((*phase, *cycle)),
            _ => None,
        })
        .collect();

    assert_eq!(
        phases,
        vec![
            (Phase::Break, 1),
            (Phase::Focus, 2),
            (Phase::Break, 2),
            (Phase::Focus, 1),
        ]
    );
    assert_eq!(audio.alarm_count(), 4);
    assert!(w.clock().is_running());
    assert_eq!(w.clock().status_label().as_deref(), Some("focus — cycle 1/2"));
}

#[test]
fn twelve_hour_clock_projection() {
    let (mut w, _) = widget_with(SettingsPatch {
        is_24h: Some(false),
        ..Default::default()
    });
    w.tick(wall(13, 5, 9));
    let d = w.display();
    assert_eq!((d.hours, d.minutes, d.seconds), (1, 5, 9));
    assert_eq!(d.meridiem, Some(Meridiem::Pm));
}

#[test]
fn duration_edit_applies_only_while_idle() {
    let (mut w, _) = widget_with(SettingsPatch {
        timer_duration_seconds: Some(60),
        ..Default::default()
    });
    w.set_mode(Mode::Timer);

    w.update_settings(SettingsPatch {
        timer_duration_seconds: Some(120),
        ..Default::default()
    });
    assert_eq!(w.clock().runtime().timer_left_secs, 120);

    w.handle_input(InputEvent::key(" "), Instant::now());
    run_ticks(&mut w, 3);
    w.update_settings(SettingsPatch {
        timer_duration_seconds: Some(30),
        ..Default::default()
    });
    assert_eq!(w.clock().runtime().timer_left_secs, 117);

    w.handle_input(InputEvent::key("r"), Instant::now());
    assert_eq!(w.clock().runtime().timer_left_secs, 30);
}

#[test]
fn idle_fades_and_lock_holds() {
    let (mut w, _) = widget_with(SettingsPatch::default());
    let t0 = Instant::now();
    w.handle_input(InputEvent::Pointer(zenflip_core::PointerKind::Move), t0);
    assert!(w.idle().is_visible());

    // polled every 500ms
    let mut hidden_at = None;
    for step in 1..=10u64 {
        let at = t0 + Duration::from_millis(step * 500);
        if !w.poll_idle(at).is_empty() {
            hidden_at = Some(step * 500);
            break;
        }
    }
    assert_eq!(hidden_at, Some(3500));

    let t1 = t0 + Duration::from_secs(5);
    w.handle_input(InputEvent::Pointer(zenflip_core::PointerKind::Down), t1);
    assert!(w.idle().is_visible());

    w.toggle_lock(t1);
    assert!(!w.idle().is_visible());
    w.handle_input(InputEvent::Pointer(zenflip_core::PointerKind::Move), t1);
    assert!(!w.idle().is_visible());

    w.toggle_lock(t1);
    w.handle_input(InputEvent::Pointer(zenflip_core::PointerKind::Move), t1);
    assert!(w.idle().is_visible());
}

#[test]
fn mode_switch_while_running_stops_silently() {
    let (mut w, audio) = widget_with(SettingsPatch::default());
    w.set_mode(Mode::Timer);
    w.handle_input(InputEvent::key(" "), Instant::now());
    run_ticks(&mut w, 2);

    w.set_mode(Mode::Stopwatch);
    assert!(!w.clock().is_running());
    assert_eq!(w.clock().runtime().stopwatch_secs, 0);
    assert_eq!(audio.alarm_count(), 0);
}
