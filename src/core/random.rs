//! Randomness helpers shared by the agents and the spawner

use std::f32::consts::TAU;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random source used by the whole simulation
pub type SimRng = StdRng;

/// Build the simulation RNG, seeded for reproducible runs or from entropy.
#[must_use]
pub fn sim_rng(seed: Option<u64>) -> SimRng {
    match seed {
        Some(seed) => SimRng::seed_from_u64(seed),
        None => SimRng::from_entropy(),
    }
}

/// Uniform float in `[lo, hi)`; a degenerate range yields `lo`.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

/// Uniform point inside the rectangle spanned by `min` and `max`.
pub fn point_in<R: Rng + ?Sized>(rng: &mut R, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(uniform(rng, (min.x, max.x)), uniform(rng, (min.y, max.y)))
}

/// Uniform direction on the unit circle.
pub fn unit_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.gen_range(0.0..TAU))
}

/// One-in-`sides` chance. A zero-sided die never succeeds.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, sides: u32) -> bool {
    sides > 0 && rng.gen_range(0..sides) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_degenerate_range() {
        let mut rng = sim_rng(Some(1));
        assert_eq!(uniform(&mut rng, (2.0, 2.0)), 2.0);
        assert_eq!(uniform(&mut rng, (3.0, 1.0)), 3.0);
    }

    #[test]
    fn test_uniform_within_range() {
        let mut rng = sim_rng(Some(7));
        for _ in 0..100 {
            let v = uniform(&mut rng, (0.5, 1.0));
            assert!((0.5..1.0).contains(&v));
        }
    }

    #[test]
    fn test_unit_direction_is_normalized() {
        let mut rng = sim_rng(Some(3));
        for _ in 0..50 {
            assert!((unit_direction(&mut rng).length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_roll_edge_cases() {
        let mut rng = sim_rng(Some(9));
        assert!(roll(&mut rng, 1));
        assert!(!roll(&mut rng, 0));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = sim_rng(Some(42));
        let mut b = sim_rng(Some(42));
        assert_eq!(
            point_in(&mut a, Vec2::splat(-5.0), Vec2::splat(5.0)),
            point_in(&mut b, Vec2::splat(-5.0), Vec2::splat(5.0))
        );
    }
}
