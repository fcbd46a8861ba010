//! Agent registry: a thin wrapper around hecs

use glam::Vec2;
use hecs::Entity;

use super::components::{Species, Transform};

/// Registry of every live agent and its components
pub struct World {
    /// The underlying hecs world
    pub inner: hecs::World,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            inner: hecs::World::new(),
        }
    }

    /// Spawn an entity with the given components
    pub fn spawn(&mut self, components: impl hecs::DynamicBundle) -> Entity {
        self.inner.spawn(components)
    }

    /// Despawn an entity; its handle is invalid from now on
    pub fn despawn(&mut self, entity: Entity) -> Result<(), hecs::NoSuchEntity> {
        self.inner.despawn(entity)
    }

    /// Get a reference to a component
    pub fn get<T: hecs::Component>(
        &self,
        entity: Entity,
    ) -> Result<hecs::Ref<'_, T>, hecs::ComponentError> {
        self.inner.get::<&T>(entity)
    }

    /// Get a mutable reference to a component
    pub fn get_mut<T: hecs::Component>(
        &mut self,
        entity: Entity,
    ) -> Result<hecs::RefMut<'_, T>, hecs::ComponentError> {
        self.inner.get::<&mut T>(entity)
    }

    /// Check if an entity is still alive
    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.contains(entity)
    }

    /// Number of live entities
    pub fn len(&self) -> u32 {
        self.inner.len()
    }

    /// Check if the world is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Query for entities with specific components
    pub fn query<Q: hecs::Query>(&self) -> hecs::QueryBorrow<'_, Q> {
        self.inner.query::<Q>()
    }

    /// Snapshot of every entity carrying component `T`, in registry order.
    ///
    /// Systems iterate the snapshot so they can despawn while walking it.
    pub fn entities_with<T: hecs::Component>(&self) -> Vec<Entity> {
        self.inner
            .query::<&T>()
            .iter()
            .map(|(entity, _)| entity)
            .collect()
    }

    /// Live agents of one species
    pub fn count(&self, species: Species) -> usize {
        self.inner
            .query::<&Species>()
            .iter()
            .filter(|(_, s)| **s == species)
            .count()
    }

    /// Current position of an agent, if it is still alive
    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.get::<Transform>(entity).ok().map(|t| t.position)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_by_species() {
        let mut world = World::new();
        world.spawn((Species::Prey, Transform::default()));
        world.spawn((Species::Prey, Transform::default()));
        world.spawn((Species::Firefly, Transform::default()));

        assert_eq!(world.count(Species::Prey), 2);
        assert_eq!(world.count(Species::Firefly), 1);
        assert_eq!(world.count(Species::Predator), 0);
        assert_eq!(world.len(), 3);
    }

    #[test]
    fn test_despawned_handle_is_stale() {
        let mut world = World::new();
        let entity = world.spawn((Species::Prey, Transform::from_position(Vec2::ONE)));

        assert_eq!(world.position(entity), Some(Vec2::ONE));
        world.despawn(entity).unwrap();

        assert!(!world.contains(entity));
        assert_eq!(world.position(entity), None);
        assert!(world.despawn(entity).is_err());
    }

    #[test]
    fn test_entities_with_snapshot() {
        let mut world = World::new();
        let a = world.spawn((Species::Predator,));
        let b = world.spawn((Species::Predator,));

        let snapshot = world.entities_with::<Species>();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains(&a) && snapshot.contains(&b));

        // Despawning while walking the snapshot is fine
        for entity in snapshot {
            world.despawn(entity).unwrap();
        }
        assert!(world.is_empty());
    }
}
