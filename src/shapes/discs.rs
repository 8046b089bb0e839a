//! Golden-angle discs: flat, biconvex lens, and biconcave red blood cell.

use crate::arena::{Particle, ParticleMeta, Part, SampleWriter};
use crate::sampling::{biconvex_height, golden_disc, parity_sign, scaled_count, EvansFung};
use crate::shape::{Frame, SampleContext, ShapeStrategy};
use crate::Vec3;

pub const DISC_BASE_COUNT: f32 = 1500.0;
pub const DISC_MAX_RADIUS: f32 = 200.0;
const DISC_SIZE: f32 = 16.0;

pub const LENS_BASE_COUNT: f32 = 2500.0;
pub const LENS_RADIUS: f32 = 180.0;
const LENS_SIZE: f32 = 14.0;
const CONVEXITY: f32 = 0.3;

pub const FIBONACCI: ShapeStrategy = ShapeStrategy {
    sample: sample_disc,
    advance: advance_disc,
    refit: None,
    color: None,
};

pub const BICONVEX: ShapeStrategy = ShapeStrategy {
    sample: sample_biconvex,
    advance: advance_biconvex,
    refit: None,
    color: None,
};

pub const BICONCAVE: ShapeStrategy = ShapeStrategy {
    sample: sample_biconcave,
    advance: advance_biconcave,
    refit: None,
    color: None,
};

/// Push a golden-angle disc whose height at radius `r` is `height(r)`,
/// signed by particle parity.
fn fill_disc(
    out: &mut SampleWriter<'_>,
    n: usize,
    max_radius: f32,
    size: f32,
    height: impl Fn(f32) -> f32,
) {
    for i in 0..n {
        let (r, theta) = golden_disc(i, n, max_radius);
        let sign = parity_sign(i);
        let pos = Vec3::new(r * theta.cos(), sign * height(r), r * theta.sin());
        out.push(pos, size, ParticleMeta::new(Part::Surface).index(i as u32).param(sign));
    }
}

/// Radius and azimuth of a rest position in the XZ plane.
#[inline]
fn disc_coords(o: Vec3) -> (f32, f32) {
    ((o.x * o.x + o.z * o.z).sqrt(), o.z.atan2(o.x))
}

// ========== Flat disc ==========

fn sample_disc(out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
    let n = scaled_count(DISC_BASE_COUNT, ctx.params.fibonacci_density);
    fill_disc(out, n, DISC_MAX_RADIUS, DISC_SIZE, |_| 0.0);
}

fn advance_disc(particles: &mut [Particle], frame: &Frame<'_>) {
    let f = frame.factor;
    let t = frame.slow();

    for p in particles {
        let o = p.rest;
        let (r, theta) = disc_coords(o);

        let spiral = (t * 1.0 + r * 0.05 + theta * 3.0).sin() * 0.3
            + (t * 1.618 + r * 0.08 + theta * 5.0).cos() * 0.25
            + (t * 2.618 + r * 0.03 + theta * 8.0).sin() * 0.2;
        let radial = (t * 0.7 + r * 0.1).sin() * 0.4;
        let angular = (t * 1.4 + theta * 6.0).cos() * 0.15;
        let active = if frame.active {
            (t * 4.0 + r * 0.12 + theta * 10.0).sin() * 0.5
        } else {
            0.0
        };

        let wave_y = (spiral + radial + angular + active) * f;
        let spread = 1.0 + (t * 0.9 + theta * 4.0).sin() * 0.1 * f;

        p.position = Vec3::new(o.x * spread, wave_y * 30.0, o.z * spread);
        p.size = p.base_size * (1.0 + wave_y.abs() * 0.3 * f + r / DISC_MAX_RADIUS * 0.2);
    }
}

// ========== Biconvex lens ==========

fn sample_biconvex(out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
    let n = scaled_count(LENS_BASE_COUNT, ctx.params.fibonacci_density);
    fill_disc(out, n, LENS_RADIUS, LENS_SIZE, |r| {
        biconvex_height(r, LENS_RADIUS, CONVEXITY)
    });
}

fn advance_biconvex(particles: &mut [Particle], frame: &Frame<'_>) {
    let t = frame.phase;

    for p in particles {
        let o = p.rest;
        let (r, theta) = disc_coords(o);

        let radial = (t * 0.8 + r * 0.02).sin() * 0.08;
        let angular = (t * 1.2 + theta * 4.0).cos() * 0.05;
        let height = (t * 0.6 + r * 0.03 + theta * 2.0).sin() * 0.1;
        let active = if frame.active {
            (t * 2.0 + r * 0.05 + theta * 6.0).sin() * 0.15
        } else {
            0.0
        };
        let total = radial + angular + height + active;

        let y = p.meta.param * biconvex_height(r, LENS_RADIUS, CONVEXITY) * (1.0 + total);
        let spread = 1.0 + radial * 0.5;

        p.position = Vec3::new(o.x * spread, y, o.z * spread);
        p.size = p.base_size * (1.0 + total.abs() * 0.4);
    }
}

// ========== Biconcave red blood cell ==========

fn sample_biconcave(out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
    let n = scaled_count(LENS_BASE_COUNT, ctx.params.fibonacci_density);
    let profile = EvansFung::RED_BLOOD_CELL;
    fill_disc(out, n, LENS_RADIUS, LENS_SIZE, |r| profile.height(r / LENS_RADIUS));
}

fn advance_biconcave(particles: &mut [Particle], frame: &Frame<'_>) {
    let t = frame.phase;
    let profile = EvansFung::RED_BLOOD_CELL;

    for p in particles {
        let o = p.rest;
        let (r, theta) = disc_coords(o);

        let radial = (t * 0.9 + r * 0.025).sin() * 0.06;
        let angular = (t * 1.3 + theta * 5.0).cos() * 0.04;
        let height = (t * 0.7 + r * 0.035 + theta * 3.0).sin() * 0.09;
        let active = if frame.active {
            (t * 2.2 + r * 0.06 + theta * 7.0).sin() * 0.12
        } else {
            0.0
        };
        let total = radial + angular + height + active;

        let y = p.meta.param * (profile.height(r / LENS_RADIUS) * (1.0 + total)).abs();
        let spread = 1.0 + radial * 0.4;

        p.position = Vec3::new(o.x * spread, y, o.z * spread);
        p.size = p.base_size * (1.0 + total.abs() * 0.4);
    }
}
