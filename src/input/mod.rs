//! Input handling module
//!
//! Headless input state forwarded by the host each frame.

mod state;

pub use state::Input;
