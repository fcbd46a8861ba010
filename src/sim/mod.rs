//! Simulation assembly
//!
//! The spawner and the [`Ecosystem`] game that ties species, sensors and
//! spawning together.

mod ecosystem;
mod spawner;

pub use ecosystem::Ecosystem;
pub use spawner::{SpawnBatch, SpawnRequest, SpawnRule, Spawner, SpawnerConfig};
