//! Spherical point clouds.
//!
//! - `oblate`: a flattened spheroid with amoeba-like ripples.
//! - `sphere`: two concentric offset-spiral spheres that breathe in place.
//! - `fibonacci_sphere`: two concentric golden-spiral spheres, the inner one
//!   one sixth the size, with layered radial waves.

use crate::arena::{Particle, ParticleMeta, Part, SampleWriter};
use crate::sampling::{fibonacci_sphere, offset_spiral_angles, rounded_count, scaled_count, spherical};
use crate::shape::{Frame, SampleContext, ShapeStrategy};
use crate::shapes::{direction, polar_angles};
use crate::Vec3;

const OBLATE_BASE_COUNT: f32 = 3500.0;
const OBLATE_RADII: Vec3 = Vec3::new(180.0, 120.0, 180.0);
const OBLATE_SIZE: f32 = 12.0;

const CLING_OUTER_COUNT: usize = 1600;
const CLING_INNER_COUNT: usize = 400;
const CLING_OUTER_RADIUS: f32 = 150.0;
const CLING_INNER_RADIUS: f32 = CLING_OUTER_RADIUS / 6.0;
/// Cling breathing runs at 0.8× the raw clock.
const CLING_TIME_RATE: f32 = 0.8;

pub const FIBONACCI_OUTER_BASE: f32 = 1600.0;
pub const FIBONACCI_INNER_BASE: f32 = 400.0;
pub const FIBONACCI_OUTER_RADIUS: f32 = 180.0;
pub const FIBONACCI_INNER_RADIUS: f32 = FIBONACCI_OUTER_RADIUS / 6.0;
const FIBONACCI_OUTER_SIZE: f32 = 15.0;
const FIBONACCI_INNER_SIZE: f32 = 12.0;
/// Azimuth twist of the inner spiral so it does not line up with the outer one.
const INNER_TWIST: f32 = 1.618;

pub const OBLATE: ShapeStrategy = ShapeStrategy {
    sample: sample_oblate,
    advance: advance_oblate,
    refit: None,
    color: None,
};

pub const CLING: ShapeStrategy = ShapeStrategy {
    sample: sample_cling,
    advance: advance_cling,
    refit: None,
    color: None,
};

pub const FIBONACCI: ShapeStrategy = ShapeStrategy {
    sample: sample_fibonacci,
    advance: advance_fibonacci,
    refit: None,
    color: None,
};

// ========== Oblate spheroid ==========

fn sample_oblate(out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
    let n = scaled_count(OBLATE_BASE_COUNT, ctx.params.density);
    for i in 0..n {
        let (phi, theta) = offset_spiral_angles(i, n);
        let pos = Vec3::new(
            phi.sin() * theta.cos(),
            phi.cos(),
            phi.sin() * theta.sin(),
        ) * OBLATE_RADII;
        out.push(pos, OBLATE_SIZE, ParticleMeta::new(Part::Surface).index(i as u32));
    }
}

fn advance_oblate(particles: &mut [Particle], frame: &Frame<'_>) {
    let t = frame.phase;
    let breathing = (t * 0.5).sin() * 0.1 + 1.0;

    for p in particles {
        let o = p.rest;
        let (phi, theta) = polar_angles(o);

        let ripple = (t * 0.8 + phi * 4.0 + theta * 3.0).sin() * 0.15
            + (t * 1.2 + phi * 6.0 + theta * 2.0).cos() * 0.12
            + (t * 1.6 + phi * 3.0 + theta * 5.0).sin() * 0.08
            + (t * 2.1 + phi * 2.0 + theta * 4.0).cos() * 0.06;
        let propulsion = (t * 0.7 + o.x * 0.02 + o.z * 0.02).sin() * 0.2
            + (t * 1.1 + o.y * 0.03 + o.x * 0.015).cos() * 0.15
            + (t * 1.4 + o.z * 0.025 + o.y * 0.02).sin() * 0.1;
        let active = if frame.active {
            (t * 2.5 + phi * 8.0 + theta * 6.0).sin() * 0.25
        } else {
            0.0
        };
        let total = ripple + propulsion + active;

        let flow = Vec3::new(
            (t * 0.6 + o.y * 0.01).sin() * 8.0,
            (t * 0.8 + o.z * 0.01).cos() * 6.0,
            (t * 1.0 + o.x * 0.01).sin() * 8.0,
        );

        p.position = o * (1.0 + total * breathing) + flow;
        p.size = p.base_size * (1.0 + total.abs() * 0.5 + breathing * 0.2);
    }
}

// ========== Cling: breathing double sphere ==========

fn sample_cling(out: &mut SampleWriter<'_>, _ctx: &SampleContext<'_>) {
    let shells = [
        (Part::Outer, CLING_OUTER_COUNT, CLING_OUTER_RADIUS, 15.0),
        (Part::Inner, CLING_INNER_COUNT, CLING_INNER_RADIUS, 12.0),
    ];
    for (part, n, radius, size) in shells {
        for i in 0..n {
            let (phi, theta) = offset_spiral_angles(i, n);
            let meta = ParticleMeta::new(part).index(i as u32).param(radius);
            out.push(spherical(radius, phi, theta), size, meta);
        }
    }
}

fn advance_cling(particles: &mut [Particle], frame: &Frame<'_>) {
    let t = frame.time * CLING_TIME_RATE;

    for (i, p) in particles.iter_mut().enumerate() {
        let o = p.rest;
        let len = o.length();
        let phi = if len > 0.0 { (o.z / len).clamp(-1.0, 1.0).acos() } else { 0.0 };
        let theta = o.y.atan2(o.x);

        let outer = p.meta.part == Part::Outer;
        let (primary, secondary) = if outer { (8.0, 4.0) } else { (4.0, 2.0) };

        let mut radius = p.meta.param
            + (t * 0.5 + phi * 3.0 + theta * 2.0).sin() * primary
            + (t * 0.7 + phi * 2.0 + theta * 3.0).cos() * secondary;

        if frame.active {
            let (scale, freq) = if outer { (15.0, 2.0) } else { (8.0, 2.5) };
            radius += (frame.time * freq + i as f32 * 0.1).sin() * scale;
        }

        p.position = spherical(radius, phi, theta);
        p.size = p.base_size;
    }
}

// ========== Fibonacci double sphere ==========

/// Outer and inner particle counts at a given Fibonacci density.
pub fn fibonacci_counts(fibonacci_density: f32) -> (usize, usize) {
    (
        rounded_count(FIBONACCI_OUTER_BASE, fibonacci_density),
        rounded_count(FIBONACCI_INNER_BASE, fibonacci_density),
    )
}

fn sample_fibonacci(out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
    let (outer, inner) = fibonacci_counts(ctx.params.fibonacci_density);

    for i in 0..outer {
        let pos = fibonacci_sphere(i, outer, 1.0) * FIBONACCI_OUTER_RADIUS;
        out.push(pos, FIBONACCI_OUTER_SIZE, ParticleMeta::new(Part::Outer).index(i as u32));
    }
    for i in 0..inner {
        let pos = fibonacci_sphere(i, inner, INNER_TWIST) * FIBONACCI_INNER_RADIUS;
        out.push(pos, FIBONACCI_INNER_SIZE, ParticleMeta::new(Part::Inner).index(i as u32));
    }
}

fn advance_fibonacci(particles: &mut [Particle], frame: &Frame<'_>) {
    let f = frame.factor;
    let t = frame.slow();

    for (i, p) in particles.iter_mut().enumerate() {
        let o = p.rest;
        let (phi, theta) = polar_angles(o);

        let mut wave = (t * 0.8 + phi * 5.0 + theta * 3.0).sin() * 0.1
            + (t * 1.3 + phi * 8.0 + theta * 2.0).cos() * 0.08
            + (t * 2.1 + phi * 3.0 + theta * 8.0).sin() * 0.06
            + (t * 1.618 + i as f32 * 0.1).sin() * 0.12;
        if frame.active {
            wave += (t * 3.0 + phi * 13.0 + theta * 5.0).sin() * 0.15;
        }
        let total = wave * f;

        p.position = o + direction(o) * (total * 25.0);
        p.size = p.base_size * (1.0 + total.abs() * 0.4 * f);
    }
}
