//! Lifecycle event queue
//!
//! Agents never talk to each other through events; they read the registry
//! directly. Events exist so observers (statistics, logging, a host UI) can
//! learn what happened without being wired into the agent systems.
//!
//! The queue is double-buffered: events pushed during frame N become visible
//! to readers in frame N+1, after [`EventQueue::swap`].

use std::collections::VecDeque;

use glam::Vec2;
use hecs::Entity;

use crate::ecs::Species;

// ============================================================================
// Event Types
// ============================================================================

/// Why an agent left the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestroyCause {
    /// Prey finished its death pop/fade
    Faded,
    /// Prey was killed by a predator
    Eaten,
    /// Predator shrank away after reaching its kill quota
    Sated,
    /// Firefly used up its flashes
    BurnedOut,
}

impl DestroyCause {
    /// Short label for logs and reports
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Faded => "faded",
            Self::Eaten => "eaten",
            Self::Sated => "sated",
            Self::BurnedOut => "burned out",
        }
    }
}

/// Something that happened in the ecosystem.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum SimEvent {
    /// An agent was created.
    Spawned {
        /// The new agent
        entity: Entity,
        /// Its species
        species: Species,
        /// Spawn position
        position: Vec2,
    },

    /// An agent was removed from the registry.
    Destroyed {
        /// The removed agent (already invalid)
        entity: Entity,
        /// Its species
        species: Species,
        /// Why it was removed
        cause: DestroyCause,
    },

    /// A predator killed a prey.
    Killed {
        /// The hunter
        predator: Entity,
        /// The victim (already invalid)
        prey: Entity,
    },

    /// An agent changed state.
    StateChanged {
        /// The agent
        entity: Entity,
        /// Its species
        species: Species,
        /// Previous state name
        from: &'static str,
        /// New state name
        to: &'static str,
    },
}

// ============================================================================
// Event Queue
// ============================================================================

/// Double-buffered event queue for frame-consistent event processing.
#[derive(Debug)]
pub struct EventQueue {
    /// Events being written this frame
    pending: VecDeque<SimEvent>,
    /// Events from previous frame, ready for processing
    processing: VecDeque<SimEvent>,
}

impl EventQueue {
    const DEFAULT_CAPACITY: usize = 64;

    /// Create a new event queue with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a new event queue with specified initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            processing: VecDeque::with_capacity(capacity),
        }
    }

    /// Push an event to be processed next frame.
    #[inline]
    pub fn push(&mut self, event: SimEvent) {
        self.pending.push_back(event);
    }

    /// Make this frame's events readable and start a fresh pending buffer.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.processing);
        self.pending.clear();
    }

    /// Iterate over events from the previous frame.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &SimEvent> {
        self.processing.iter()
    }

    /// Drain all events from the previous frame.
    #[inline]
    pub fn drain(&mut self) -> impl Iterator<Item = SimEvent> + '_ {
        self.processing.drain(..)
    }

    /// Check if there are any events to process.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processing.is_empty()
    }

    /// Number of events ready for processing.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.processing.len()
    }

    /// Number of events pending for next frame.
    #[must_use]
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Clear both buffers.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.processing.clear();
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
