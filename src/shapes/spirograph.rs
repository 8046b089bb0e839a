//! Spirograph curves laid flat in the XZ plane.
//!
//! The point count is `rotations × pointsPerRotation(density)` and is fixed
//! at sampling time. `R`, `r` and `d` are read live: the refit pass
//! re-evaluates the curve at each particle's stored parameter every tick, so
//! dragging a coefficient reshapes the curve without resampling.

use crate::arena::{Particle, ParticleMeta, Part, SampleWriter};
use crate::params::{ParameterSet, SpiralParams};
use crate::sampling::{epicycloid, hypocycloid, scaled_count};
use crate::shape::{Frame, SampleContext, ShapeStrategy};
use crate::Vec3;
use std::f32::consts::TAU;

const SPIRAL_SIZE: f32 = 13.0;

/// Shape-specific constants of one spirograph variant.
struct Variant {
    points_per_rotation: f32,
    curve: fn(f32, f32, f32, f32) -> Vec3,
    params: fn(&ParameterSet) -> SpiralParams,
    height_scale: f32,
}

const HYPO: Variant = Variant {
    points_per_rotation: 120.0,
    curve: hypocycloid,
    params: spiral1,
    height_scale: 30.0,
};

const EPI: Variant = Variant {
    points_per_rotation: 150.0,
    curve: epicycloid,
    params: spiral2,
    height_scale: 35.0,
};

fn spiral1(params: &ParameterSet) -> SpiralParams {
    params.spiral1
}

fn spiral2(params: &ParameterSet) -> SpiralParams {
    params.spiral2
}

pub const HYPOCYCLOID: ShapeStrategy = ShapeStrategy {
    sample: sample_hypocycloid,
    advance: advance_hypocycloid,
    refit: Some(refit_hypocycloid),
    color: None,
};

pub const EPICYCLOID: ShapeStrategy = ShapeStrategy {
    sample: sample_epicycloid,
    advance: advance_epicycloid,
    refit: Some(refit_epicycloid),
    color: None,
};

/// Points generated for one full turn of the curve parameter.
pub fn points_per_rotation(base: f32, density: f32) -> usize {
    scaled_count(base, density).max(1)
}

fn sample(variant: &Variant, out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
    let spiral = (variant.params)(ctx.params);
    let per_rotation = points_per_rotation(variant.points_per_rotation, ctx.params.density);
    let total = spiral.rotations as usize * per_rotation;

    for i in 0..total {
        let t = i as f32 / per_rotation as f32 * TAU;
        let pos = (variant.curve)(spiral.big_r as f32, spiral.r as f32, spiral.d as f32, t);
        let meta = ParticleMeta::new(Part::Surface)
            .index(i as u32)
            .param(t)
            .phase(i as f32 / variant.points_per_rotation);
        if !out.push(pos, SPIRAL_SIZE, meta) {
            out.skip(total - i - 1);
            break;
        }
    }
}

fn sample_hypocycloid(out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
    sample(&HYPO, out, ctx);
}

fn sample_epicycloid(out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
    sample(&EPI, out, ctx);
}

fn refit_hypocycloid(particles: &mut [Particle], params: &ParameterSet) {
    refit(&HYPO, particles, params);
}

fn refit_epicycloid(particles: &mut [Particle], params: &ParameterSet) {
    refit(&EPI, particles, params);
}

fn refit(variant: &Variant, particles: &mut [Particle], params: &ParameterSet) {
    let spiral = (variant.params)(params);
    let (big_r, r, d) = (spiral.big_r as f32, spiral.r as f32, spiral.d as f32);
    for p in particles {
        p.rest = (variant.curve)(big_r, r, d, p.meta.param);
    }
}

fn advance_hypocycloid(particles: &mut [Particle], frame: &Frame<'_>) {
    let time = frame.phase;

    for p in particles {
        let o = p.rest;
        let s = p.meta.phase;
        let dist = (o.x * o.x + o.z * o.z).sqrt();

        let radial = (time * 0.8 + s * 3.0).sin() * 0.15;
        let height = (time * 1.2 + dist * 0.02).cos() * 0.2;
        let rotation = (time * 0.6 + s * 2.0).sin() * 0.1;
        let active = if frame.active { (time * 2.5 + s * 4.0).sin() * 0.4 } else { 0.0 };
        let total = radial + height + rotation + active;

        p.position = Vec3::new(
            o.x * (1.0 + radial),
            o.y + (height + active) * HYPO.height_scale,
            o.z * (1.0 + radial),
        );
        p.size = p.base_size * (1.0 + total.abs() * 0.5);
    }
}

fn advance_epicycloid(particles: &mut [Particle], frame: &Frame<'_>) {
    let time = frame.phase;

    for p in particles {
        let o = p.rest;
        let s = p.meta.phase;
        let dist = (o.x * o.x + o.z * o.z).sqrt();

        let radial = (time * 0.9 + s * 2.5).cos() * 0.18;
        let height = (time * 1.4 + dist * 0.015).sin() * 0.22;
        let rotation = (time * 0.7 + s * 3.0).cos() * 0.12;
        let active = if frame.active { (time * 3.0 + s * 5.0).cos() * 0.45 } else { 0.0 };
        let total = radial + height + rotation + active;

        p.position = Vec3::new(
            o.x * (1.0 + radial),
            o.y + (height + active) * EPI.height_scale,
            o.z * (1.0 + radial),
        );
        p.size = p.base_size * (1.0 + total.abs() * 0.5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_per_rotation() {
        assert_eq!(points_per_rotation(120.0, 1.0), 120);
        assert_eq!(points_per_rotation(150.0, 0.1), 15);
        assert_eq!(points_per_rotation(120.0, 0.0), 1);
    }
}
