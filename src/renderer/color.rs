//! Color constants and conversions

use glam::Vec4;

pub const BLACK: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
pub const WHITE: Vec4 = Vec4::ONE;
pub const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
/// Warm yellow used for idle fireflies
pub const YELLOW: Vec4 = Vec4::new(1.0, 0.92, 0.016, 1.0);

/// Convert hue/saturation/value (each in `[0, 1]`) to opaque RGBA.
#[must_use]
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec4 {
    let h = h.rem_euclid(1.0) * 6.0;
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    // rem_euclid rounds tiny negative hues up to 1.0
    let sector = h.floor().min(5.0);
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Vec4::new(r, g, b, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn test_hsv_primaries() {
        assert!(close(hsv_to_rgb(0.0, 1.0, 1.0), RED));
        assert!(close(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), Vec4::new(0.0, 1.0, 0.0, 1.0)));
        assert!(close(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), Vec4::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_hsv_hue_wraps_to_red() {
        assert!(close(hsv_to_rgb(-1e-9, 1.0, 1.0), RED));
        assert!(close(hsv_to_rgb(1.0, 1.0, 1.0), RED));
        assert!(close(hsv_to_rgb(-1.0 / 3.0, 1.0, 1.0), Vec4::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_hsv_greyscale() {
        assert!(close(hsv_to_rgb(0.4, 0.0, 0.5), Vec4::new(0.5, 0.5, 0.5, 1.0)));
        assert!(close(hsv_to_rgb(0.7, 1.0, 0.0), BLACK));
    }

    #[test]
    fn test_hsv_prey_hue_is_bluish() {
        let c = hsv_to_rgb(0.65, 0.8, 0.9);
        assert!(c.z > c.x && c.z > c.y);
    }
}
