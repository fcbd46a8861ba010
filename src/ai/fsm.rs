//! Finite State Machine for agent behavior
//!
//! Each species describes its behavior as a closed enum of states; variants
//! carry whatever the state needs (an animation in progress, a target
//! handle). The species' tick function inspects the current state and
//! returns a [`Transition`], which the [`StateMachine`] applies.
//!
//! # Design Principles
//!
//! - **Closed states**: one enum per species, exactly one variant active
//! - **Terminal states**: once entered they are never left
//! - **Debuggability**: states have names for logging and events
//!
//! # Example
//!
//! ```ignore
//! enum Mood { Calm, Angry }
//!
//! impl AgentState for Mood {
//!     fn name(&self) -> &'static str {
//!         match self { Mood::Calm => "Calm", Mood::Angry => "Angry" }
//!     }
//! }
//!
//! let mut fsm = StateMachine::new(Mood::Calm);
//! fsm.apply(Transition::To(Mood::Angry));
//! assert!(fsm.is_in("Angry"));
//! ```

use std::fmt;

// ============================================================================
// State Trait
// ============================================================================

/// A state in a species' state machine.
pub trait AgentState: fmt::Debug {
    /// State name for debugging and logging.
    fn name(&self) -> &'static str;

    /// Terminal states are never left once entered.
    fn is_terminal(&self) -> bool {
        false
    }
}

// ============================================================================
// Transition
// ============================================================================

/// Decision returned by a species tick.
#[derive(Debug)]
pub enum Transition<S> {
    /// Stay in the current state.
    None,
    /// Switch to a new state.
    To(S),
}

/// A state change that actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub from: &'static str,
    pub to: &'static str,
}

// ============================================================================
// State Machine
// ============================================================================

/// Holds the active state of one agent.
#[derive(Debug, Clone)]
pub struct StateMachine<S> {
    current: S,
    /// Seconds since the current state was entered
    time_in_state: f32,
}

impl<S: AgentState> StateMachine<S> {
    /// Create a state machine in its initial state.
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            time_in_state: 0.0,
        }
    }

    /// Advance the time spent in the current state.
    pub fn tick(&mut self, dt: f32) {
        self.time_in_state += dt.max(0.0);
    }

    /// Apply a transition decision.
    ///
    /// Leaving a terminal state is refused and logged; the machine stays put.
    pub fn apply(&mut self, transition: Transition<S>) -> Option<StateChange> {
        match transition {
            Transition::None => None,
            Transition::To(next) => self.transition(next),
        }
    }

    /// Switch to `next` unless the current state is terminal.
    pub fn transition(&mut self, next: S) -> Option<StateChange> {
        if self.current.is_terminal() {
            log::warn!(
                "refused transition {} -> {}: {} is terminal",
                self.current.name(),
                next.name(),
                self.current.name()
            );
            return None;
        }

        let change = StateChange {
            from: self.current.name(),
            to: next.name(),
        };
        log::trace!("{} -> {}", change.from, change.to);

        self.current = next;
        self.time_in_state = 0.0;
        Some(change)
    }

    /// The active state
    pub fn current(&self) -> &S {
        &self.current
    }

    /// The active state, mutably (for advancing its animation)
    pub fn current_mut(&mut self) -> &mut S {
        &mut self.current
    }

    /// Name of the active state
    #[must_use]
    pub fn current_state_name(&self) -> &'static str {
        self.current.name()
    }

    /// Check if the machine is in the state with the given name
    #[must_use]
    pub fn is_in(&self, name: &str) -> bool {
        self.current.name() == name
    }

    /// Seconds since the current state was entered
    #[must_use]
    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }
}

// ============================================================================
// Tests
// ============================================================================
