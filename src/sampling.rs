//! Sampling primitives shared by the shape strategies.
//!
//! Golden-angle spirals, closed-form surface profiles and the seeded RNG used
//! wherever a shape scatters particles randomly.

use crate::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{FRAC_PI_2, PI};

/// The golden angle `π(3 − √5)`, about 137.5°.
pub const GOLDEN_ANGLE: f32 = 2.399_963_2;

/// The golden ratio φ.
pub const GOLDEN_RATIO: f32 = 1.618_034;

/// Seed used when the caller does not provide one.
pub const DEFAULT_SEED: u64 = 0x5eed_f0a7;

// ========== Counts ==========

/// `floor(base × scale)`, never negative.
#[inline]
pub fn scaled_count(base: f32, scale: f32) -> usize {
    (base * scale).floor().max(0.0) as usize
}

/// `round(base × scale)`, never negative.
#[inline]
pub fn rounded_count(base: f32, scale: f32) -> usize {
    (base * scale).round().max(0.0) as usize
}

/// `i / (n − 1)`, or `0` when there is only one sample.
#[inline]
pub fn unit_progress(i: usize, n: usize) -> f32 {
    if n <= 1 {
        0.0
    } else {
        i as f32 / (n - 1) as f32
    }
}

// ========== Golden-angle spirals ==========

/// Point `i` of `n` on the unit Fibonacci sphere.
///
/// `y` runs linearly from `1` to `-1` and the azimuth advances by the golden
/// angle times `twist`. A twist other than `1.0` interleaves a second spiral
/// with the first.
pub fn fibonacci_sphere(i: usize, n: usize, twist: f32) -> Vec3 {
    let y = 1.0 - unit_progress(i, n) * 2.0;
    let ring = (1.0 - y * y).max(0.0).sqrt();
    let theta = GOLDEN_ANGLE * i as f32 * twist;
    Vec3::new(theta.cos() * ring, y, theta.sin() * ring)
}

/// Polar and azimuthal angles of point `i` of `n` on the half-offset spiral.
///
/// Returns `(phi, theta)` with `phi = acos(1 − 2(i + ½)/n)` and
/// `theta = π(1 + √5)(i + ½)`.
pub fn offset_spiral_angles(i: usize, n: usize) -> (f32, f32) {
    let k = i as f32 + 0.5;
    let phi = (1.0 - 2.0 * k / n.max(1) as f32).clamp(-1.0, 1.0).acos();
    let theta = PI * (1.0 + 5.0_f32.sqrt()) * k;
    (phi, theta)
}

/// Spherical to Cartesian with `phi` measured from +Z.
#[inline]
pub fn spherical(radius: f32, phi: f32, theta: f32) -> Vec3 {
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

/// Radius and angle of point `i` of `n` on the golden-angle disc.
///
/// Returns `(r, theta)` with `r = sqrt(i / (n − 1)) × max_radius`, so the
/// first point sits at the centre and the last on the rim.
#[inline]
pub fn golden_disc(i: usize, n: usize, max_radius: f32) -> (f32, f32) {
    (unit_progress(i, n).sqrt() * max_radius, GOLDEN_ANGLE * i as f32)
}

/// `+1` for even indices, `-1` for odd ones.
#[inline]
pub fn parity_sign(i: usize) -> f32 {
    if i % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

// ========== Profiles ==========

/// Evans–Fung biconcave disc coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvansFung {
    pub z0: f32,
    pub c0: f32,
    pub c1: f32,
    pub c2: f32,
}

impl EvansFung {
    /// Red blood cell coefficients with a height scale suited to a 180-unit disc.
    pub const RED_BLOOD_CELL: Self = Self { z0: 15.0, c0: 0.81, c1: 7.83, c2: -4.39 };

    /// Unsigned half-thickness at normalized radius `rho = r / R`.
    ///
    /// `|z0 (1 − ρ²)(c0 + c1 ρ² + c2 ρ⁴)|`
    pub fn height(&self, rho: f32) -> f32 {
        let rho2 = rho * rho;
        let rho4 = rho2 * rho2;
        (self.z0 * (1.0 - rho2) * (self.c0 + self.c1 * rho2 + self.c2 * rho4)).abs()
    }
}

/// Half-thickness of a lens with the given convexity at radius `r`.
#[inline]
pub fn biconvex_height(r: f32, radius: f32, convexity: f32) -> f32 {
    let rho = r / radius;
    convexity * (1.0 - rho * rho) * radius
}

/// Jellyfish bell profile at normalized radius `rr ∈ [0, 1)`.
///
/// Returns `(height, radius)` in bell units: a hemisphere 6 high and 10 wide,
/// curled down over the outer 80% and tucked inward at the lip.
pub fn bell_profile(rr: f32) -> (f32, f32) {
    let mut height = (1.0 - rr * rr).max(0.0).sqrt() * 6.0;
    let mut radius = rr * 10.0;

    if rr > 0.2 {
        let curl = (rr - 0.2) / 0.8;
        height -= (1.0 - (curl * FRAC_PI_2).cos()) * 3.0;

        if rr > 0.85 {
            let lip = (rr - 0.85) / 0.15;
            height += (lip * FRAC_PI_2).sin() * 1.5;
            radius *= 1.0 - lip * 0.7;
        } else {
            radius *= 1.0 - curl * 0.2;
        }
    }

    (height, radius)
}

// ========== Curves ==========

/// Hypocycloid point in the XZ plane: a circle of radius `r` rolling inside
/// one of radius `big_r`, pen at distance `d`.
pub fn hypocycloid(big_r: f32, r: f32, d: f32, t: f32) -> Vec3 {
    let k = big_r - r;
    let ratio = k / r;
    Vec3::new(
        k * t.cos() + d * (ratio * t).cos(),
        0.0,
        k * t.sin() - d * (ratio * t).sin(),
    )
}

/// Epicycloid point in the XZ plane: a circle rolling outside.
pub fn epicycloid(big_r: f32, r: f32, d: f32, t: f32) -> Vec3 {
    let k = big_r + r;
    let ratio = k / r;
    Vec3::new(
        k * t.cos() - d * (ratio * t).cos(),
        0.0,
        k * t.sin() - d * (ratio * t).sin(),
    )
}

// ========== Easing ==========

/// Cubic ease-in-out on `[0, 1]`.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

// ========== Randomness ==========

/// RNG for one sampling pass, derived from the gallery seed and a per-shape salt.
pub fn seeded_rng(seed: u64, salt: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed ^ salt.wrapping_mul(0x9e37_79b9_7f4a_7c15))
}

/// Uniform random unit vector by rejection sampling inside the unit ball.
pub fn random_direction(rng: &mut SmallRng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-4 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_angle() {
        let exact = PI * (3.0 - 5.0_f32.sqrt());
        assert!((GOLDEN_ANGLE - exact).abs() < 1e-6);
    }

    #[test]
    fn test_fibonacci_sphere_unit() {
        for i in 0..100 {
            let p = fibonacci_sphere(i, 100, 1.0);
            assert!((p.length() - 1.0).abs() < 1e-5);
        }
        assert_eq!(fibonacci_sphere(0, 100, 1.0).y, 1.0);
        assert_eq!(fibonacci_sphere(99, 100, 1.0).y, -1.0);
    }

    #[test]
    fn test_single_sample_is_finite() {
        assert!(fibonacci_sphere(0, 1, 1.0).is_finite());
        let (r, _) = golden_disc(0, 1, 200.0);
        assert_eq!(r, 0.0);
    }

    #[test]
    fn test_golden_disc_bounds() {
        assert_eq!(golden_disc(0, 1500, 200.0).0, 0.0);
        assert!((golden_disc(1499, 1500, 200.0).0 - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_evans_fung_rim_is_flat() {
        let ef = EvansFung::RED_BLOOD_CELL;
        assert!(ef.height(1.0).abs() < 1e-6);
        assert!((ef.height(0.0) - 15.0 * 0.81).abs() < 1e-5);
        // thicker toward the rim than at the centre
        assert!(ef.height(0.6) > ef.height(0.0));
    }

    #[test]
    fn test_bell_profile_lip_tucks_in() {
        let (h0, r0) = bell_profile(0.0);
        assert_eq!(r0, 0.0);
        assert!((h0 - 6.0).abs() < 1e-6);

        let (_, r_mid) = bell_profile(0.8);
        let (_, r_lip) = bell_profile(0.95);
        assert!(r_lip < r_mid);
    }

    #[test]
    fn test_hypocycloid_start() {
        let p = hypocycloid(120.0, 30.0, 50.0, 0.0);
        assert!((p.x - 140.0).abs() < 1e-4);
        assert_eq!(p.y, 0.0);
        assert!(p.z.abs() < 1e-4);
    }

    #[test]
    fn test_epicycloid_start() {
        let p = epicycloid(80.0, 25.0, 40.0, 0.0);
        assert!((p.x - 65.0).abs() < 1e-4);
    }

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_random_direction_unit_and_seeded() {
        let mut a = seeded_rng(7, 1);
        let mut b = seeded_rng(7, 1);
        for _ in 0..50 {
            let va = random_direction(&mut a);
            let vb = random_direction(&mut b);
            assert_eq!(va, vb);
            assert!((va.length() - 1.0).abs() < 1e-5);
        }
    }
}
