//! Multi-phase timed animations
//!
//! A [`Sequence`] is a resumable animation record: a list of phase durations,
//! the index of the active phase and the time spent in it. Agents store one
//! inside their state and advance it once per frame.

use smallvec::SmallVec;

/// Playback position of a phased animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    /// Duration of each phase in seconds
    phases: SmallVec<[f32; 4]>,
    /// Active phase; equals `phases.len()` once finished
    phase: usize,
    /// Seconds spent in the active phase
    elapsed: f32,
}

impl Sequence {
    /// Create a sequence from phase durations. Negative durations count as zero.
    #[must_use]
    pub fn new(phases: impl IntoIterator<Item = f32>) -> Self {
        let mut sequence = Self {
            phases: phases.into_iter().map(|d| d.max(0.0)).collect(),
            phase: 0,
            elapsed: 0.0,
        };
        sequence.skip_empty_phases();
        sequence
    }

    /// Advance playback by `dt` seconds.
    ///
    /// Time left over at the end of a phase carries into the next one.
    pub fn advance(&mut self, dt: f32) {
        let mut remaining = dt.max(0.0);
        while !self.is_finished() {
            let duration = self.phases[self.phase];
            let left = duration - self.elapsed;
            if remaining < left {
                self.elapsed += remaining;
                return;
            }
            remaining -= left;
            self.phase += 1;
            self.elapsed = 0.0;
            self.skip_empty_phases();
        }
    }

    fn skip_empty_phases(&mut self) {
        while self.phase < self.phases.len() && self.phases[self.phase] <= 0.0 {
            self.phase += 1;
        }
    }

    /// Index of the active phase (equal to the phase count when finished)
    #[must_use]
    pub fn phase(&self) -> usize {
        self.phase
    }

    /// Progress through the active phase in `[0, 1]`; 1 when finished
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self.phases.get(self.phase) {
            Some(&duration) if duration > 0.0 => (self.elapsed / duration).clamp(0.0, 1.0),
            _ => 1.0,
        }
    }

    /// Whether every phase has played
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase >= self.phases.len()
    }

    /// Total length of the animation in seconds
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.phases.iter().sum()
    }
}
