//! Steering for 2D agents
//!
//! Agents move at constant speed, so steering here produces a direction and
//! a displacement rather than an acceleration.

use glam::Vec2;
use rand::Rng;

use super::timer::Countdown;
use crate::core::random::{uniform, unit_direction};

/// Displacement toward `target` at `speed`, never overshooting it.
#[must_use]
pub fn seek(position: Vec2, target: Vec2, speed: f32, dt: f32) -> Vec2 {
    let to_target = target - position;
    let step = speed * dt;
    let distance = to_target.length();
    if distance <= step {
        to_target
    } else {
        to_target.normalize_or_zero() * step
    }
}

/// Wander behavior: a heading re-rolled on a randomized interval.
#[derive(Debug, Clone)]
pub struct Wander {
    /// Current unit heading
    direction: Vec2,
    /// Time until the heading is re-rolled
    timer: Countdown,
    /// Re-roll interval range in seconds
    interval: (f32, f32),
}

impl Wander {
    /// Create a wander behavior with a freshly rolled heading
    pub fn new<R: Rng + ?Sized>(interval: (f32, f32), rng: &mut R) -> Self {
        let mut wander = Self {
            direction: Vec2::X,
            timer: Countdown::expired(),
            interval,
        };
        wander.pick(rng);
        wander
    }

    /// Roll a new heading and restart the interval
    pub fn pick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let direction = unit_direction(rng);
        self.direction = if direction.length_squared() < 0.001 {
            Vec2::X
        } else {
            direction
        };
        self.timer.reset(uniform(rng, self.interval));
    }

    /// Turn around and restart the interval
    pub fn reverse<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.direction = -self.direction;
        self.timer.reset(uniform(rng, self.interval));
    }

    /// React to touching a wall with outward `normal`.
    ///
    /// Reverses only while heading into the wall. Returns whether it turned.
    pub fn bounce<R: Rng + ?Sized>(&mut self, normal: Vec2, rng: &mut R) -> bool {
        if self.direction.dot(normal) > 0.0 {
            self.reverse(rng);
            true
        } else {
            false
        }
    }

    /// Displacement for this frame; re-rolls the heading when its interval ends.
    pub fn step<R: Rng + ?Sized>(&mut self, speed: f32, dt: f32, rng: &mut R) -> Vec2 {
        let delta = self.direction * speed * dt;
        if self.timer.tick(dt) {
            self.pick(rng);
        }
        delta
    }

    /// Current unit heading
    #[must_use]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Force a heading (used by tests and scripted scenarios)
    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction.normalize_or(Vec2::X);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::sim_rng;

    #[test]
    fn test_seek_moves_toward_target() {
        let delta = seek(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0, 0.5);
        assert!((delta - Vec2::new(1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_seek_does_not_overshoot() {
        let delta = seek(Vec2::ZERO, Vec2::new(0.1, 0.0), 5.0, 1.0);
        assert!((delta - Vec2::new(0.1, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_wander_heading_is_unit_length() {
        let mut rng = sim_rng(Some(11));
        let wander = Wander::new((0.5, 1.0), &mut rng);
        assert!((wander.direction().length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_wander_step_moves_along_heading() {
        let mut rng = sim_rng(Some(5));
        let mut wander = Wander::new((10.0, 20.0), &mut rng);
        wander.set_direction(Vec2::Y);

        let delta = wander.step(2.0, 0.25, &mut rng);
        assert!((delta - Vec2::new(0.0, 0.5)).length() < 1e-6);
        // Interval is long, heading unchanged
        assert_eq!(wander.direction(), Vec2::Y);
    }

    #[test]
    fn test_wander_rerolls_when_interval_ends() {
        let mut rng = sim_rng(Some(5));
        let mut wander = Wander::new((0.1, 0.2), &mut rng);
        wander.set_direction(Vec2::Y);

        wander.step(1.0, 1.0, &mut rng);
        assert!((wander.direction().length() - 1.0).abs() < 1e-4);
        assert_ne!(wander.direction(), Vec2::Y);
    }

    #[test]
    fn test_bounce_only_when_heading_into_wall() {
        let mut rng = sim_rng(Some(2));
        let mut wander = Wander::new((1.0, 2.0), &mut rng);
        wander.set_direction(Vec2::X);

        // Right wall: outward normal +X
        assert!(wander.bounce(Vec2::X, &mut rng));
        assert_eq!(wander.direction(), -Vec2::X);

        // Already heading away, no second flip
        assert!(!wander.bounce(Vec2::X, &mut rng));
        assert_eq!(wander.direction(), -Vec2::X);
    }
}
