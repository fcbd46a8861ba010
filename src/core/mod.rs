//! Core engine module
//!
//! Contains the main Engine struct, the frame clock, configuration and
//! lifecycle events

pub mod config;
pub mod debug;
mod engine;
pub mod events;
pub mod random;
mod time;

pub use config::{ConfigError, SimConfig};
pub use debug::{DebugInfo, PopulationStats, StepStats};
pub use engine::{Engine, EngineConfig, EngineContext, EngineError, Game};
pub use events::{DestroyCause, EventQueue, SimEvent};
pub use random::SimRng;
pub use time::Time;
