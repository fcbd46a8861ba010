//! A headless 2D ecosystem simulation
//!
//! This crate provides:
//! - Prey, predator and firefly agents, each driven by its own state machine
//! - Entity Component System (ECS) storage with hecs
//! - Circle-overlap contact sensors inside a walled arena
//! - A fixed-step engine loop with lifecycle events and population stats
//! - Render-ready sprite snapshots for an external renderer

pub mod ai;
pub mod animation;
pub mod core;
pub mod ecs;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod sim;
pub mod species;

// Re-exports for convenience
pub use glam;
pub use hecs;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::core::{
        ConfigError, DebugInfo, DestroyCause, Engine, EngineConfig, EngineContext, EngineError,
        EventQueue, Game, PopulationStats, SimConfig, SimEvent, Time,
    };
    pub use crate::ecs::{Collider, Species, Tint, Transform, World};
    pub use crate::input::Input;
    pub use crate::physics::{Arena, Contact, ContactTag, Sensors};
    pub use crate::renderer::{RenderFrame, SpriteInstance};
    pub use crate::sim::{Ecosystem, SpawnRule, SpawnerConfig};
    pub use crate::species::{
        Agent, Firefly, FireflyConfig, Predator, PredatorConfig, Prey, PreyConfig,
    };
    pub use glam::{Vec2, Vec4};
}
