//! Debug and statistics module

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::core::events::{DestroyCause, SimEvent};
use crate::ecs::Species;

/// Wall-clock cost of simulation steps
#[derive(Debug)]
pub struct StepStats {
    /// Step time history for averaging
    step_times: VecDeque<Duration>,
    /// Maximum samples to keep
    max_samples: usize,
    /// Average step time in milliseconds
    avg_step_time_ms: f32,
    /// Maximum step time in milliseconds
    max_step_time_ms: f32,
    /// Total steps recorded
    total_steps: u64,
}

impl StepStats {
    /// Create a new step stats tracker
    pub fn new() -> Self {
        Self {
            step_times: VecDeque::with_capacity(120),
            max_samples: 120,
            avg_step_time_ms: 0.0,
            max_step_time_ms: 0.0,
            total_steps: 0,
        }
    }

    /// Record how long one step took
    pub fn record_step(&mut self, cost: Duration) {
        self.total_steps += 1;

        if self.step_times.len() >= self.max_samples {
            self.step_times.pop_front();
        }
        self.step_times.push_back(cost);

        let total: Duration = self.step_times.iter().sum();
        let max = self.step_times.iter().max().copied().unwrap_or_default();
        self.avg_step_time_ms = total.as_secs_f32() * 1000.0 / self.step_times.len() as f32;
        self.max_step_time_ms = max.as_secs_f32() * 1000.0;
    }

    /// Average step time in milliseconds
    pub fn avg_step_time_ms(&self) -> f32 {
        self.avg_step_time_ms
    }

    /// Maximum step time in milliseconds over the window
    pub fn max_step_time_ms(&self) -> f32 {
        self.max_step_time_ms
    }

    /// Total steps recorded
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Get a formatted stats string
    pub fn format_stats(&self) -> String {
        format!(
            "Steps: {} | Step: {:.3}ms (max: {:.3})",
            self.total_steps, self.avg_step_time_ms, self.max_step_time_ms
        )
    }
}

impl Default for StepStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Running totals built from lifecycle events
#[derive(Debug, Default, Clone)]
pub struct PopulationStats {
    live: [u64; 3],
    spawned: [u64; 3],
    deaths: FxHashMap<DestroyCause, u64>,
    kills: u64,
    flashes: u64,
    state_changes: u64,
}

impl PopulationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the totals
    pub fn record(&mut self, event: &SimEvent) {
        match event {
            SimEvent::Spawned { species, .. } => {
                self.live[species.index()] += 1;
                self.spawned[species.index()] += 1;
            }
            SimEvent::Destroyed { species, cause, .. } => {
                let live = &mut self.live[species.index()];
                *live = live.saturating_sub(1);
                *self.deaths.entry(*cause).or_default() += 1;
            }
            SimEvent::Killed { .. } => self.kills += 1,
            SimEvent::StateChanged { species, to, .. } => {
                self.state_changes += 1;
                if *species == Species::Firefly && *to == "Flash" {
                    self.flashes += 1;
                }
            }
        }
    }

    /// Agents of `species` alive as of the last recorded event
    pub fn live(&self, species: Species) -> u64 {
        self.live[species.index()]
    }

    /// Agents of `species` ever spawned
    pub fn spawned(&self, species: Species) -> u64 {
        self.spawned[species.index()]
    }

    pub fn deaths(&self, cause: DestroyCause) -> u64 {
        self.deaths.get(&cause).copied().unwrap_or(0)
    }

    pub fn kills(&self) -> u64 {
        self.kills
    }

    pub fn flashes(&self) -> u64 {
        self.flashes
    }

    pub fn state_changes(&self) -> u64 {
        self.state_changes
    }

    /// One-line population report
    pub fn format_stats(&self) -> String {
        let mut line = String::new();
        for species in Species::ALL {
            let _ = write!(
                line,
                "{species}: {} (+{}) | ",
                self.live(species),
                self.spawned(species)
            );
        }
        let _ = write!(
            line,
            "kills: {} | flashes: {} | faded: {} | sated: {} | burned out: {}",
            self.kills,
            self.flashes,
            self.deaths(DestroyCause::Faded),
            self.deaths(DestroyCause::Sated),
            self.deaths(DestroyCause::BurnedOut),
        );
        line
    }
}

/// Debug information gathered by the engine
#[derive(Debug, Default)]
pub struct DebugInfo {
    /// Step timing
    pub step_stats: StepStats,
    /// Lifecycle totals
    pub population: PopulationStats,
}

impl DebugInfo {
    /// Create new debug info
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all debug lines
    pub fn get_all_lines(&self) -> Vec<String> {
        vec![
            self.step_stats.format_stats(),
            self.population.format_stats(),
        ]
    }

    /// Record a step
    pub fn record_step(&mut self, cost: Duration) {
        self.step_stats.record_step(cost);
    }

    /// Fold a frame's events into the population totals
    pub fn record_events<'a>(&mut self, events: impl IntoIterator<Item = &'a SimEvent>) {
        for event in events {
            self.population.record(event);
        }
    }
}
