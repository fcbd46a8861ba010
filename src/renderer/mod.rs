//! Rendering hand-off
//!
//! The simulation draws nothing itself; it exposes a per-frame sprite
//! snapshot for whichever host renderer is attached.

pub mod color;
mod sprite;

pub use sprite::{RenderFrame, SpriteInstance};
