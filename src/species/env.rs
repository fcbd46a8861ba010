//! What an agent sees and reports during its tick

use glam::Vec2;
use hecs::Entity;
use smallvec::SmallVec;

use super::{Predator, Prey};
use crate::ai::StateChange;
use crate::core::DestroyCause;
use crate::core::random::SimRng;
use crate::ecs::{Collider, Species, Tint, Transform, World};
use crate::input::Input;
use crate::physics::Contact;

/// Read-only view of the world plus the frame's inputs, handed to one agent.
///
/// The ticking agent works on copies of its own components, so its registry
/// entry is stale until the tick is written back. Everything else is read
/// live: positions and deaths from earlier in the frame are visible.
pub struct Env<'a> {
    /// Seconds since last frame
    pub dt: f32,
    pub world: &'a World,
    pub rng: &'a mut SimRng,
    /// This agent's contacts for the frame
    pub contacts: &'a [Contact],
    pub input: &'a Input,
}

impl Env<'_> {
    /// Nearest live prey to `from`. Ties go to the first one scanned.
    pub fn nearest_prey(&self, from: Vec2) -> Option<(Entity, Vec2)> {
        let mut nearest = None;
        let mut nearest_distance = f32::INFINITY;
        for (entity, (transform, _)) in self.world.query::<(&Transform, &Prey)>().iter() {
            let distance = transform.distance_to(from);
            if distance < nearest_distance {
                nearest_distance = distance;
                nearest = Some((entity, transform.position));
            }
        }
        nearest
    }

    /// Position of `target` if it is still a live prey
    pub fn prey_position(&self, target: Entity) -> Option<Vec2> {
        self.world.get::<Prey>(target).ok()?;
        self.world.position(target)
    }

    /// Nearest hunting predator within `radius` of `from`
    pub fn nearest_hunting_predator(&self, from: Vec2, radius: f32) -> Option<(Entity, Vec2)> {
        let mut nearest = None;
        let mut nearest_distance = f32::INFINITY;
        for (entity, (transform, predator)) in self.world.query::<(&Transform, &Predator)>().iter()
        {
            if !predator.is_hunting() {
                continue;
            }
            let distance = transform.distance_to(from);
            if distance <= radius && distance < nearest_distance {
                nearest_distance = distance;
                nearest = Some((entity, transform.position));
            }
        }
        nearest
    }

    /// Position of `target` if it is still a live predator that is hunting
    pub fn hunting_predator_position(&self, target: Entity) -> Option<Vec2> {
        let hunting = self.world.get::<Predator>(target).ok()?.is_hunting();
        if hunting {
            self.world.position(target)
        } else {
            None
        }
    }
}

/// Whether the agent survives its tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Live,
    Destroy(DestroyCause),
}

/// Result of one agent tick
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub fate: Fate,
    /// Prey this agent killed
    pub kill: Option<Entity>,
    /// State changes in the order they happened
    pub changes: SmallVec<[StateChange; 2]>,
}

impl Outcome {
    pub fn live() -> Self {
        Self {
            fate: Fate::Live,
            kill: None,
            changes: SmallVec::new(),
        }
    }

    pub(crate) fn record(&mut self, change: Option<StateChange>) {
        if let Some(change) = change {
            self.changes.push(change);
        }
    }

    pub fn is_destroyed(&self) -> bool {
        matches!(self.fate, Fate::Destroy(_))
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::live()
    }
}

/// Behavior component of one species.
///
/// `tick` is the species' transition function: given the elapsed frame time
/// and what the agent perceives, it advances the state machine and mutates
/// the agent's transform and tint.
pub trait Agent: hecs::Component + Clone {
    /// Tunables shared by every agent of the species
    type Config;

    const SPECIES: Species;

    /// Build a new agent at `position`
    fn spawn(
        config: &Self::Config,
        position: Vec2,
        rng: &mut SimRng,
    ) -> (Self, Transform, Tint, Collider);

    /// Advance one frame
    fn tick(
        &mut self,
        config: &Self::Config,
        transform: &mut Transform,
        tint: &mut Tint,
        env: &mut Env<'_>,
    ) -> Outcome;

    /// Name of the active state
    fn state_name(&self) -> &'static str;
}
