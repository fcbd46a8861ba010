//! Animation module
//!
//! Frame-driven timed animations (pulse, blink, death) and interpolation.

mod sequence;
mod tween;

pub use sequence::Sequence;
pub use tween::{inverse_lerp, lerp, lerp_color};
