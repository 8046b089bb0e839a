//! Particle coloring.
//!
//! Most shapes share one look: a warm two-stop gradient swept along Y over
//! time, pushed through the user's hue / saturation / brightness controls.

use crate::params::ParameterSet;
use crate::Vec3;

/// Warm end of the base gradient, `#fcb900`.
pub const AMBER: Vec3 = Vec3::new(252.0 / 255.0, 185.0 / 255.0, 0.0);
/// Hot end of the base gradient, `#ff6900`.
pub const ORANGE: Vec3 = Vec3::new(1.0, 105.0 / 255.0, 0.0);

/// Decode a `0xRRGGBB` color.
pub fn hex(rgb: u32) -> Vec3 {
    Vec3::new(
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
    )
}

/// HSV to RGB. All channels in `[0, 1]`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    let h = h.rem_euclid(1.0);
    let c = v * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h * 6.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

/// RGB to HSV. Returns `(h, s, v)` with hue in `[0, 1)`.
pub fn rgb_to_hsv(rgb: Vec3) -> (f32, f32, f32) {
    let max = rgb.max_element();
    let min = rgb.min_element();
    let d = max - min;

    let h = if d <= f32::EPSILON {
        0.0
    } else if max == rgb.x {
        ((rgb.y - rgb.z) / d).rem_euclid(6.0) / 6.0
    } else if max == rgb.y {
        ((rgb.z - rgb.x) / d + 2.0) / 6.0
    } else {
        ((rgb.x - rgb.y) / d + 4.0) / 6.0
    };
    let s = if max <= f32::EPSILON { 0.0 } else { d / max };

    (h, s, max)
}

/// Apply the user's hue shift, saturation and brightness to a color.
pub fn grade(color: Vec3, params: &ParameterSet) -> Vec3 {
    let (h, s, v) = rgb_to_hsv(color);
    hsv_to_rgb(
        (h + params.hue).rem_euclid(1.0),
        s * params.saturation,
        v * params.brightness,
    )
}

/// Blend factor of the base gradient at height `y`, in `[0.2, 1]`.
#[inline]
pub fn gradient_factor(y: f32, time: f32) -> f32 {
    let f = ((y * 0.01 + time * 0.5).sin() + 1.0) * 0.5;
    0.2 + f * 0.8
}

/// Graded base-gradient color of a point at height `y`.
pub fn surface_color(y: f32, time: f32, params: &ParameterSet) -> Vec3 {
    grade(AMBER.lerp(ORANGE, gradient_factor(y, time)), params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn test_hex() {
        assert!(close(hex(0xff7700), Vec3::new(1.0, 119.0 / 255.0, 0.0)));
        assert_eq!(hex(0xffffff), Vec3::ONE);
    }

    #[test]
    fn test_hsv_roundtrip_primaries() {
        for c in [Vec3::X, Vec3::Y, Vec3::Z, AMBER, ORANGE, Vec3::splat(0.5)] {
            let (h, s, v) = rgb_to_hsv(c);
            assert!(close(hsv_to_rgb(h, s, v), c), "{:?}", c);
        }
    }

    #[test]
    fn test_neutral_grade_is_identity() {
        let params = ParameterSet::default().with_color(0.0, 1.0, 1.0);
        assert!(close(grade(AMBER, &params), AMBER));
    }

    #[test]
    fn test_gradient_factor_range() {
        for i in 0..100 {
            let f = gradient_factor(i as f32 * 13.0 - 500.0, i as f32 * 0.1);
            assert!((0.2..=1.0).contains(&f));
        }
    }
}
