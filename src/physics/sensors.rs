//! Proximity sensors
//!
//! Every agent carries a circular [`Collider`]. Once per frame the sensor
//! pass finds which circles overlap each other and which cross the arena
//! walls, and hands each agent its contact list. A contact is `Enter` on the
//! first frame of an overlap and `Stay` while it lasts.

use glam::Vec2;
use hecs::Entity;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::ecs::{Collider, Species, Transform, World};

// ============================================================================
// Arena
// ============================================================================

/// Rectangle enclosed by the four boundary walls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub min: Vec2,
    pub max: Vec2,
}

impl Arena {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Whether the arena has positive area
    pub fn is_valid(&self) -> bool {
        self.max.x > self.min.x && self.max.y > self.min.y
    }

    /// Outward normal of the walls a circle touches, if any.
    ///
    /// At a corner the normals of both walls are summed.
    pub fn wall_normal(&self, center: Vec2, radius: f32) -> Option<Vec2> {
        let mut normal = Vec2::ZERO;
        if center.x - radius <= self.min.x {
            normal.x -= 1.0;
        }
        if center.x + radius >= self.max.x {
            normal.x += 1.0;
        }
        if center.y - radius <= self.min.y {
            normal.y -= 1.0;
        }
        if center.y + radius >= self.max.y {
            normal.y += 1.0;
        }
        (normal != Vec2::ZERO).then_some(normal)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(Vec2::new(-6.0, -4.0), Vec2::new(6.0, 4.0))
    }
}

// ============================================================================
// Contacts
// ============================================================================

/// What an agent is touching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactTag {
    BoundaryWall,
    Agent(Species),
}

/// First frame of an overlap, or a continuing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Enter,
    Stay,
}

/// One proximity event delivered to an agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// The other agent, `None` for walls
    pub other: Option<Entity>,
    pub tag: ContactTag,
    pub phase: ContactPhase,
    /// Outward wall normal; for agents, the direction from self to other
    pub normal: Vec2,
}

/// Per-entity contact list; most agents touch only a few things at once
pub type ContactList = SmallVec<[Contact; 4]>;

type PairKey = (Entity, Option<Entity>);

/// Contact detection between agents and against the arena walls
#[derive(Debug, Default)]
pub struct Sensors {
    contacts: FxHashMap<Entity, ContactList>,
    /// Overlaps seen last frame, for Enter/Stay
    previous: FxHashSet<PairKey>,
    current: FxHashSet<PairKey>,
}

impl Sensors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute every contact for this frame.
    pub fn detect(&mut self, world: &World, arena: &Arena) {
        std::mem::swap(&mut self.previous, &mut self.current);
        self.current.clear();
        self.contacts.clear();

        let bodies: Vec<(Entity, Vec2, f32, Species)> = world
            .query::<(&Transform, &Collider, &Species)>()
            .iter()
            .map(|(entity, (transform, collider, species))| {
                (
                    entity,
                    transform.position,
                    collider.scaled(transform.scale),
                    *species,
                )
            })
            .collect();

        for (i, &(entity, position, radius, species)) in bodies.iter().enumerate() {
            if let Some(normal) = arena.wall_normal(position, radius) {
                self.record(entity, None, ContactTag::BoundaryWall, normal);
            }

            for &(other, other_position, other_radius, other_species) in &bodies[i + 1..] {
                let offset = other_position - position;
                let reach = radius + other_radius;
                if offset.length_squared() > reach * reach {
                    continue;
                }
                let normal = offset.normalize_or_zero();
                self.record(entity, Some(other), ContactTag::Agent(other_species), normal);
                self.record(other, Some(entity), ContactTag::Agent(species), -normal);
            }
        }
    }

    fn record(&mut self, entity: Entity, other: Option<Entity>, tag: ContactTag, normal: Vec2) {
        let key = (entity, other);
        let phase = if self.previous.contains(&key) {
            ContactPhase::Stay
        } else {
            ContactPhase::Enter
        };
        self.current.insert(key);
        self.contacts.entry(entity).or_default().push(Contact {
            other,
            tag,
            phase,
            normal,
        });
    }

    /// Contacts of one entity this frame
    pub fn contacts_for(&self, entity: Entity) -> &[Contact] {
        self.contacts
            .get(&entity)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    /// Forget all overlap history
    pub fn clear(&mut self) {
        self.contacts.clear();
        self.previous.clear();
        self.current.clear();
    }
}
