//! Countdown timers driving state transitions

/// A countdown that never goes below zero.
///
/// Reset on state entry, ticked once per frame; a transition fires when it
/// reports expiry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    /// Start a countdown of `duration` seconds
    #[must_use]
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration.max(0.0),
        }
    }

    /// An already expired countdown
    #[must_use]
    pub const fn expired() -> Self {
        Self { remaining: 0.0 }
    }

    /// Restart with a new duration
    pub fn reset(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    /// Advance by `dt` seconds. Returns `true` once the countdown has run out.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        self.is_expired()
    }

    /// Whether the countdown has run out
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Seconds left
    #[must_use]
    pub const fn remaining(&self) -> f32 {
        self.remaining
    }
}
