//! Interpolation helpers

use glam::Vec4;

/// Linear interpolation with `t` clamped to `[0, 1]`.
#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Where `value` sits between `a` and `b`, clamped to `[0, 1]`.
///
/// Returns 0 when `a == b`.
#[inline]
#[must_use]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        0.0
    } else {
        ((value - a) / (b - a)).clamp(0.0, 1.0)
    }
}

/// Component-wise color interpolation with `t` clamped to `[0, 1]`.
#[inline]
#[must_use]
pub fn lerp_color(a: Vec4, b: Vec4, t: f32) -> Vec4 {
    a.lerp(b, t.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_clamps() {
        assert_eq!(lerp(1.0, 3.0, 0.5), 2.0);
        assert_eq!(lerp(1.0, 3.0, -1.0), 1.0);
        assert_eq!(lerp(1.0, 3.0, 2.0), 3.0);
    }

    #[test]
    fn test_inverse_lerp() {
        assert!((inverse_lerp(0.3, 1.0, 0.65) - 0.5).abs() < 1e-6);
        assert_eq!(inverse_lerp(0.3, 1.0, 0.1), 0.0);
        assert_eq!(inverse_lerp(0.3, 1.0, 3.0), 1.0);
        assert_eq!(inverse_lerp(1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_lerp_color_midpoint() {
        let c = lerp_color(Vec4::ZERO, Vec4::ONE, 0.5);
        assert_eq!(c, Vec4::splat(0.5));
    }
}
