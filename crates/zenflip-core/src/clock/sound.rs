//! Tick-sound policy.
//!
//! Chimes are aligned to the wall clock: `1m` fires when the wall second is
//! zero, `10m` when additionally the wall minute is a multiple of ten.

use chrono::{NaiveTime, Timelike};

use crate::audio::AudioSink;
use crate::settings::{SoundSettings, TickInterval, TickKind};

/// Whether the interval calls for a tick at `wall`.
pub fn tick_due(interval: TickInterval, wall: NaiveTime) -> bool {
    match interval {
        TickInterval::Off => false,
        TickInterval::EverySecond => true,
        TickInterval::EveryMinute => wall.second() == 0,
        TickInterval::EveryTenMinutes => wall.second() == 0 && wall.minute() % 10 == 0,
    }
}

/// Emit a tick through `audio` if the settings call for one. Returns whether
/// a sound was emitted.
pub(crate) fn emit_tick(sound: &SoundSettings, wall: NaiveTime, audio: &dyn AudioSink) -> bool {
    if sound.tick_kind == TickKind::None || !tick_due(sound.tick_interval, wall) {
        return false;
    }
    tracing::trace!(kind = sound.tick_kind.as_str(), "tick");
    audio.play_tick(sound.tick_kind, sound.tick_volume);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn every_second_always_due() {
        assert!(tick_due(TickInterval::EverySecond, at(9, 3, 17)));
    }

    #[test]
    fn off_never_due() {
        assert!(!tick_due(TickInterval::Off, at(0, 0, 0)));
    }

    #[test]
    fn minute_aligned_to_second_zero() {
        assert!(tick_due(TickInterval::EveryMinute, at(9, 3, 0)));
        assert!(!tick_due(TickInterval::EveryMinute, at(9, 3, 1)));
    }

    #[test]
    fn ten_minutes_aligned_to_boundary() {
        assert!(tick_due(TickInterval::EveryTenMinutes, at(14, 20, 0)));
        assert!(!tick_due(TickInterval::EveryTenMinutes, at(14, 21, 0)));
        assert!(!tick_due(TickInterval::EveryTenMinutes, at(14, 20, 5)));
    }

    #[test]
    fn kind_none_is_silent() {
        let audio = RecordingAudio::new();
        let sound = SoundSettings {
            tick_kind: TickKind::None,
            ..Default::default()
        };
        assert!(!emit_tick(&sound, at(1, 0, 0), &audio));
        assert_eq!(audio.tick_count(), 0);
    }

    #[test]
    fn emits_configured_kind_and_volume() {
        let audio = RecordingAudio::new();
        let sound = SoundSettings {
            tick_kind: TickKind::Mech,
            tick_interval: TickInterval::EverySecond,
            tick_volume: 0.5,
        };
        assert!(emit_tick(&sound, at(1, 2, 3), &audio));
        assert_eq!(
            audio.sounds(),
            vec![crate::audio::Sound::Tick {
                kind: TickKind::Mech,
                volume: 0.5
            }]
        );
    }
}
