//! AI module
//!
//! State machines, countdown timers and steering used by every species.

mod fsm;
mod steering;
mod timer;

pub use fsm::{AgentState, StateChange, StateMachine, Transition};
pub use steering::{Wander, seek};
pub use timer::Countdown;
