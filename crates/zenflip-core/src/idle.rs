//! Idle-driven UI visibility.
//!
//! The controls fade out after a period without interaction and come back
//! on the next one. A manual lock keeps them hidden regardless of activity.
//! Invariant: `locked` implies `!ui_visible`.

use std::time::{Duration, Instant};

/// No interaction for longer than this hides the UI.
pub const IDLE_THRESHOLD: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
pub struct IdleVisibilityController {
    ui_visible: bool,
    locked: bool,
    last_interaction: Instant,
    threshold: Duration,
}

impl IdleVisibilityController {
    /// Visible and unlocked, with `now` as the last interaction.
    pub fn new(now: Instant) -> Self {
        Self::with_threshold(now, IDLE_THRESHOLD)
    }

    pub fn with_threshold(now: Instant, threshold: Duration) -> Self {
        Self {
            ui_visible: true,
            locked: false,
            last_interaction: now,
            threshold,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.ui_visible
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn last_interaction(&self) -> Instant {
        self.last_interaction
    }

    /// Record an interaction. Reveals the UI unless locked.
    /// Returns whether visibility changed.
    pub fn interact(&mut self, now: Instant) -> bool {
        self.last_interaction = now;
        if self.locked {
            return false;
        }
        self.set_visible(true)
    }

    /// Pointer left the window: hide immediately, recency untouched.
    pub fn pointer_left(&mut self) -> bool {
        self.set_visible(false)
    }

    /// Periodic check. Hides the UI once the threshold has elapsed.
    /// Returns whether visibility changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_interaction) > self.threshold {
            return self.set_visible(false);
        }
        false
    }

    /// Flip the lock. The UI is hidden either way; after unlocking the next
    /// interaction brings it back. Returns the new lock state.
    pub fn toggle_lock(&mut self, now: Instant) -> bool {
        self.locked = !self.locked;
        self.last_interaction = now;
        self.ui_visible = false;
        self.locked
    }

    fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.ui_visible != visible;
        self.ui_visible = visible;
        changed
    }
}
