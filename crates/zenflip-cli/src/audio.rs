use std::io::Write;

use zenflip_core::{AudioSink, TickKind};

/// Terminal sound: the alarm rings the bell, ticks are only traced.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl AudioSink for TerminalBell {
    fn play_tick(&self, kind: TickKind, volume: f64) {
        tracing::trace!(kind = kind.as_str(), volume, "tick sound");
    }

    fn play_alarm(&self) {
        let mut out = std::io::stdout();
        if let Err(e) = out.write_all(b"\x07").and_then(|()| out.flush()) {
            tracing::debug!(error = %e, "terminal bell failed");
        }
    }
}
