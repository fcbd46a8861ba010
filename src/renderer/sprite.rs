//! Render-ready snapshot of the agents

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::ecs::{Species, Tint, Transform, World};

/// One agent as the host renderer sees it.
///
/// Laid out for direct upload into an instance buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct SpriteInstance {
    /// World position
    pub position: [f32; 2],
    /// Uniform scale
    pub scale: f32,
    /// Draw layer (prey below predators below fireflies)
    pub layer: u32,
    /// RGBA color
    pub color: [f32; 4],
}

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Simulated time of the snapshot
    pub time: f64,
    /// Sprites sorted by layer
    pub sprites: Vec<SpriteInstance>,
}

impl RenderFrame {
    /// Snapshot every agent in the world
    pub fn capture(world: &World, time: f64) -> Self {
        let mut sprites: Vec<SpriteInstance> = world
            .query::<(&Transform, &Tint, &Species)>()
            .iter()
            .map(|(_, (transform, tint, species))| SpriteInstance {
                position: transform.position.to_array(),
                scale: transform.scale,
                layer: layer_of(*species),
                color: tint.0.to_array(),
            })
            .collect();
        sprites.sort_by_key(|s| s.layer);

        Self { time, sprites }
    }

    /// Raw bytes of the instance data
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sprites)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

fn layer_of(species: Species) -> u32 {
    match species {
        Species::Prey => 0,
        Species::Predator => 1,
        Species::Firefly => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec4};

    #[test]
    fn test_capture_sorts_by_layer() {
        let mut world = World::new();
        world.spawn((
            Species::Firefly,
            Transform::from_position(Vec2::new(1.0, 2.0)),
            Tint(Vec4::ONE),
        ));
        world.spawn((Species::Prey, Transform::default(), Tint(Vec4::ZERO)));

        let frame = RenderFrame::capture(&world, 1.5);
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.sprites[0].layer, 0);
        assert_eq!(frame.sprites[1].position, [1.0, 2.0]);
        assert_eq!(frame.time, 1.5);
    }

    #[test]
    fn test_instance_bytes() {
        let mut world = World::new();
        world.spawn((Species::Prey, Transform::default(), Tint::WHITE));

        let frame = RenderFrame::capture(&world, 0.0);
        assert_eq!(frame.as_bytes().len(), std::mem::size_of::<SpriteInstance>());
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 32);
    }

    #[test]
    fn test_frame_serializes_to_json() {
        let frame = RenderFrame {
            time: 2.0,
            sprites: vec![SpriteInstance {
                position: [0.0, 1.0],
                scale: 0.5,
                layer: 1,
                color: [1.0, 0.0, 0.0, 1.0],
            }],
        };
        let json = serde_json::to_string(&frame).unwrap();
        let back: RenderFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sprites, frame.sprites);
    }
}
