//! Fixed-step frame clock

/// Frame clock advanced once per simulated frame.
///
/// The simulation is headless, so time never comes from the wall clock:
/// the engine feeds its fixed timestep into [`Time::advance`].
#[derive(Debug, Clone, Default)]
pub struct Time {
    /// Seconds elapsed during the last frame
    delta: f32,
    /// Total simulated seconds
    elapsed: f64,
    /// Frames advanced so far
    frame: u64,
}

impl Time {
    /// Create a clock at time zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame of `delta_seconds`.
    ///
    /// Negative or non-finite deltas count as a zero-length frame.
    pub fn advance(&mut self, delta_seconds: f32) {
        self.delta = if delta_seconds.is_finite() {
            delta_seconds.max(0.0)
        } else {
            0.0
        };
        self.elapsed += f64::from(self.delta);
        self.frame += 1;
    }

    /// Seconds elapsed during the last frame
    #[must_use]
    pub const fn delta_seconds(&self) -> f32 {
        self.delta
    }

    /// Total simulated seconds
    #[must_use]
    pub const fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    /// Number of frames advanced
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame
    }
}
