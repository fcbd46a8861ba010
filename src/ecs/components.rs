//! Components shared by every agent

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// Position and uniform scale in the 2D plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in world space
    pub position: Vec2,
    /// Uniform scale factor
    pub scale: f32,
}

impl Transform {
    /// Create a transform at `position` with unit scale
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set the uniform scale
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Translate by a delta
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Straight-line distance to a point
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.position.distance(point)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

/// RGBA color the host renderer draws the agent with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tint(pub Vec4);

impl Tint {
    /// Opaque white
    pub const WHITE: Self = Self(Vec4::ONE);

    /// Alpha channel
    pub fn alpha(&self) -> f32 {
        self.0.w
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Circular proximity sensor; the radius is multiplied by the transform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub radius: f32,
}

impl Collider {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Effective radius at the given scale
    pub fn scaled(&self, scale: f32) -> f32 {
        self.radius * scale
    }
}

/// Species tag carried by every agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    Prey,
    Predator,
    Firefly,
}

impl Species {
    /// All species, in tick order
    pub const ALL: [Species; 3] = [Species::Prey, Species::Predator, Species::Firefly];

    /// Display name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Prey => "prey",
            Self::Predator => "predator",
            Self::Firefly => "firefly",
        }
    }

    /// Position in [`Species::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_translate_and_distance() {
        let mut transform = Transform::from_position(Vec2::new(1.0, 1.0)).with_scale(0.5);
        transform.translate(Vec2::new(2.0, 3.0));

        assert_eq!(transform.position, Vec2::new(3.0, 4.0));
        assert!((transform.distance_to(Vec2::ZERO) - 5.0).abs() < 1e-5);
        assert_eq!(transform.scale, 0.5);
    }

    #[test]
    fn test_collider_scaled() {
        let collider = Collider::new(0.5);
        assert!((collider.scaled(3.0) - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_species_order_and_names() {
        assert_eq!(Species::ALL[0], Species::Prey);
        assert_eq!(Species::Firefly.to_string(), "firefly");
        for (index, species) in Species::ALL.into_iter().enumerate() {
            assert_eq!(species.index(), index);
        }
    }
}
