//! Population spawner
//!
//! Seeds each species with an initial population, then adds one agent of a
//! species every time its interval elapses.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::ai::Countdown;
use crate::core::random::{SimRng, point_in};
use crate::ecs::Species;

/// How one species is spawned
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    /// Agents created on start
    pub initial: u32,
    /// Seconds between periodic spawns
    pub interval: f32,
    /// A disabled species never spawns
    #[serde(default = "enabled")]
    pub enabled: bool,
}

fn enabled() -> bool {
    true
}

impl SpawnRule {
    pub fn new(initial: u32, interval: f32) -> Self {
        Self {
            initial,
            interval,
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            initial: 0,
            interval: 1.0,
            enabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub prey: SpawnRule,
    pub predator: SpawnRule,
    pub firefly: SpawnRule,
    /// Corners of the rectangle spawn positions are drawn from
    pub area_min: Vec2,
    pub area_max: Vec2,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            prey: SpawnRule::new(10, 5.0),
            predator: SpawnRule::new(2, 12.0),
            firefly: SpawnRule::new(15, 5.0),
            area_min: Vec2::new(-5.0, -3.0),
            area_max: Vec2::new(5.0, 3.0),
        }
    }
}

impl SpawnerConfig {
    pub fn rule(&self, species: Species) -> &SpawnRule {
        match species {
            Species::Prey => &self.prey,
            Species::Predator => &self.predator,
            Species::Firefly => &self.firefly,
        }
    }
}

/// A request to place one agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub species: Species,
    pub position: Vec2,
}

pub type SpawnBatch = SmallVec<[SpawnRequest; 4]>;

/// Tracks one countdown per species
#[derive(Debug, Clone)]
pub struct Spawner {
    config: SpawnerConfig,
    timers: [Countdown; 3],
}

impl Spawner {
    pub fn new(config: SpawnerConfig) -> Self {
        let timers = Species::ALL.map(|species| Countdown::new(config.rule(species).interval));
        Self { config, timers }
    }

    fn position(&self, rng: &mut SimRng) -> Vec2 {
        point_in(rng, self.config.area_min, self.config.area_max)
    }

    /// The starting population, species by species
    pub fn initial(&self, rng: &mut SimRng) -> Vec<SpawnRequest> {
        let mut requests = Vec::new();
        for species in Species::ALL {
            let rule = self.config.rule(species);
            if !rule.enabled {
                continue;
            }
            for _ in 0..rule.initial {
                requests.push(SpawnRequest {
                    species,
                    position: self.position(rng),
                });
            }
        }
        requests
    }

    /// Advance the timers; returns the agents due this frame
    pub fn tick(&mut self, dt: f32, rng: &mut SimRng) -> SpawnBatch {
        let mut batch = SpawnBatch::new();
        for species in Species::ALL {
            let rule = *self.config.rule(species);
            if !rule.enabled {
                continue;
            }
            let timer = &mut self.timers[species.index()];
            if timer.tick(dt) {
                timer.reset(rule.interval);
                batch.push(SpawnRequest {
                    species,
                    position: self.position(rng),
                });
            }
        }
        batch
    }

    /// Seconds until the next spawn of `species`
    pub fn time_until(&self, species: Species) -> f32 {
        self.timers[species.index()].remaining()
    }
}
