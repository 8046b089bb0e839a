//! Golden-angle tori with round and pentagonal cross-sections.
//!
//! The major angle advances linearly with the particle index while the minor
//! angle advances by the golden angle, which spreads points evenly over the
//! tube without a visible lattice.

use crate::arena::{Particle, ParticleMeta, Part, SampleWriter};
use crate::sampling::{scaled_count, GOLDEN_ANGLE};
use crate::shape::{Frame, SampleContext, ShapeStrategy};
use crate::Vec3;
use std::f32::consts::TAU;

pub const TORUS_BASE_COUNT: f32 = 3000.0;
pub const MAJOR_RADIUS: f32 = 150.0;
pub const MINOR_RADIUS: f32 = 60.0;
const TORUS_SIZE: f32 = 12.0;
const SIDES: u32 = 5;

pub const ROUND: ShapeStrategy = ShapeStrategy {
    sample: sample_round,
    advance: advance_round,
    refit: None,
    color: None,
};

pub const PENTAGONAL: ShapeStrategy = ShapeStrategy {
    sample: sample_pentagonal,
    advance: advance_pentagonal,
    refit: None,
    color: None,
};

/// Major and minor angles of particle `i` of `n`.
#[inline]
fn torus_angles(i: usize, n: usize) -> (f32, f32) {
    let u = i as f32 / n as f32 * TAU;
    let v = (GOLDEN_ANGLE * i as f32).rem_euclid(TAU);
    (u, v)
}

/// Point on a closed regular polygon of `sides` edges and circumradius
/// `radius`, at angle `v` measured around its centre.
///
/// The angle picks an edge; the position along the edge is the fraction of
/// the edge's angular span covered, interpolated linearly between corners.
pub fn polygon_point(v: f32, sides: u32, radius: f32) -> (f32, f32) {
    let span = TAU / sides as f32;
    let v = v.rem_euclid(TAU);
    let side = ((v / span).floor() as u32).min(sides - 1);
    let progress = (v - side as f32 * span) / span;

    let a1 = side as f32 * span;
    let a2 = ((side + 1) % sides) as f32 * span;
    let (x1, y1) = (radius * a1.cos(), radius * a1.sin());
    let (x2, y2) = (radius * a2.cos(), radius * a2.sin());

    (x1 + (x2 - x1) * progress, y1 + (y2 - y1) * progress)
}

/// Place a tube cross-section point `(local_x, local_y)` at major angle `u`.
#[inline]
fn sweep(major: f32, local_x: f32, local_y: f32, u: f32) -> Vec3 {
    Vec3::new((major + local_x) * u.cos(), local_y, (major + local_x) * u.sin())
}

/// Major angle, minor angle and tube-local radius of a rest position.
#[inline]
fn tube_coords(o: Vec3) -> (f32, f32, f32) {
    let dist = (o.x * o.x + o.z * o.z).sqrt();
    let local_x = dist - MAJOR_RADIUS;
    (o.z.atan2(o.x), o.y.atan2(local_x), (local_x * local_x + o.y * o.y).sqrt())
}

fn sample_round(out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
    let n = scaled_count(TORUS_BASE_COUNT, ctx.params.fibonacci_density);
    for i in 0..n {
        let (u, v) = torus_angles(i, n);
        let pos = sweep(MAJOR_RADIUS, MINOR_RADIUS * v.cos(), MINOR_RADIUS * v.sin(), u);
        out.push(pos, TORUS_SIZE, ParticleMeta::new(Part::Surface).index(i as u32));
    }
}

fn advance_round(particles: &mut [Particle], frame: &Frame<'_>) {
    let t = frame.phase;

    for p in particles {
        let (major, minor, tube) = tube_coords(p.rest);

        let major_wave = (t * 0.7 + major * 3.0).sin() * 0.15;
        let minor_wave = (t * 1.1 + minor * 4.0).cos() * 0.12;
        let torus_wave = (t * 0.9 + major * 2.0 + minor * 3.0).sin() * 0.1;
        let active = if frame.active {
            (t * 2.5 + major * 5.0 + minor * 6.0).sin() * 0.25
        } else {
            0.0
        };
        let total = major_wave + minor_wave + torus_wave + active;

        let big_r = MAJOR_RADIUS * (1.0 + major_wave);
        let small_r = tube * (1.0 + minor_wave + active);

        let mut pos = sweep(big_r, small_r * minor.cos(), small_r * minor.sin(), major);
        pos.y *= 1.0 + torus_wave;

        p.position = pos;
        p.size = p.base_size * (1.0 + total.abs() * 0.5);
    }
}

fn sample_pentagonal(out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
    let n = scaled_count(TORUS_BASE_COUNT, ctx.params.fibonacci_density);
    for i in 0..n {
        let (u, v) = torus_angles(i, n);
        let (local_x, local_y) = polygon_point(v, SIDES, MINOR_RADIUS);
        let pos = sweep(MAJOR_RADIUS, local_x, local_y, u);
        out.push(pos, TORUS_SIZE, ParticleMeta::new(Part::Surface).index(i as u32));
    }
}

fn advance_pentagonal(particles: &mut [Particle], frame: &Frame<'_>) {
    let f = frame.factor;
    let t = frame.slow();
    let sides = SIDES as f32;

    for p in particles {
        let (major, minor, tube) = tube_coords(p.rest);

        let pentagon = (t * 0.8 + major * sides).sin() * 0.12;
        let edge = (t * 1.2 + minor * sides * 2.0).cos() * 0.10;
        let corner = (t * 1.6 + major * sides * 1.5 + minor * sides).sin() * 0.08;
        let major_wave = (t * 0.6 + major * 3.0).sin() * 0.15;
        let minor_wave = (t * 1.0 + minor * 4.0).cos() * 0.12;
        let active = if frame.active {
            (t * 2.0 + major * sides * 2.0 + minor * sides * 3.0).sin() * 0.2
        } else {
            0.0
        };
        let total = (pentagon + edge + corner + major_wave + minor_wave + active) * f;

        let big_r = MAJOR_RADIUS * (1.0 + major_wave * f);
        let small_r = tube * (1.0 + (minor_wave + pentagon) * f);
        let enhance = 1.0 + (edge + corner) * f;

        let local_x = small_r * minor.cos() * enhance;
        let local_y = small_r * minor.sin() * enhance * (1.0 + corner * f);

        p.position = sweep(big_r, local_x, local_y, major);
        p.size = p.base_size * (1.0 + total.abs() * 0.4 * f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_corners() {
        let (x, y) = polygon_point(0.0, 5, 60.0);
        assert!((x - 60.0).abs() < 1e-4 && y.abs() < 1e-4);

        let span = TAU / 5.0;
        let (x, y) = polygon_point(span, 5, 60.0);
        assert!((x - 60.0 * span.cos()).abs() < 1e-3);
        assert!((y - 60.0 * span.sin()).abs() < 1e-3);
    }

    #[test]
    fn test_polygon_edges_inside_circumcircle() {
        for k in 0..200 {
            let v = k as f32 / 200.0 * TAU;
            let (x, y) = polygon_point(v, 5, 60.0);
            let r = (x * x + y * y).sqrt();
            assert!(r <= 60.0 + 1e-3);
            assert!(r >= 60.0 * (std::f32::consts::PI / 5.0).cos() - 1e-3);
        }
    }

    #[test]
    fn test_tube_coords_recover_sweep() {
        let pos = sweep(MAJOR_RADIUS, 30.0, 20.0, 1.0);
        let (major, minor, tube) = tube_coords(pos);
        assert!((major - 1.0).abs() < 1e-4);
        assert!((minor - 20.0_f32.atan2(30.0)).abs() < 1e-4);
        assert!((tube - (30.0_f32.powi(2) + 400.0).sqrt()).abs() < 1e-3);
    }
}
