//! A flat field of immune cells in the XY plane.
//!
//! Cells are scattered over an annulus around the origin. Each tick every
//! cell circles its base position with an amplitude set by cellular damage,
//! then one relaxation pass pushes overlapping cells apart. Radius, padding
//! and outline intensity all follow the live immune sliders.

use crate::arena::{Particle, ParticleMeta, Part, SampleWriter};
use crate::params::{ImmuneParams, ParameterSet};
use crate::sampling::seeded_rng;
use crate::shape::{Frame, SampleContext, ShapeStrategy};
use crate::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

pub const CELL_COUNT: usize = 500;
pub const RING_INNER: f32 = 50.0;
pub const RING_WIDTH: f32 = 200.0;
const MAX_OFFSET: f32 = 1000.0;

pub const IMMUNE: ShapeStrategy = ShapeStrategy {
    sample,
    advance,
    refit: Some(refit),
    color: Some(color),
};

/// Collision radius of a cell: drawn radius plus damage padding.
#[inline]
pub fn collision_radius(immune: &ImmuneParams) -> f32 {
    immune.cell_radius() + immune.cellular_damage * 2.0
}

fn sample(out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
    let mut rng = seeded_rng(ctx.seed, 0x1333);
    let size = collision_radius(&ctx.params.immune) * 2.0;

    for i in 0..CELL_COUNT {
        let angle = rng.gen::<f32>() * TAU;
        let radius = RING_INNER + rng.gen::<f32>() * RING_WIDTH;
        let offset = rng.gen::<f32>() * MAX_OFFSET;
        let pos = Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.0);
        let meta = ParticleMeta::new(Part::Cell).index(i as u32).param(angle).phase(offset);
        out.push(pos, size, meta);
    }
}

fn refit(particles: &mut [Particle], params: &ParameterSet) {
    let size = collision_radius(&params.immune) * 2.0;
    for p in particles {
        p.base_size = size;
    }
}

/// Push every overlapping pair apart by half the overlap each.
///
/// A single in-order pass; later pairs see earlier corrections.
pub fn relax(particles: &mut [Particle], radius: f32) {
    let min_dist = radius * 2.0;
    for i in 0..particles.len() {
        let (head, tail) = particles.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            let d = b.position - a.position;
            let dist = (d.x * d.x + d.y * d.y).sqrt();
            if dist < min_dist {
                let angle = d.y.atan2(d.x);
                let overlap = 0.5 * (min_dist - dist);
                let push = Vec3::new(angle.cos() * overlap, angle.sin() * overlap, 0.0);
                a.position -= push;
                b.position += push;
            }
        }
    }
}

fn advance(particles: &mut [Particle], frame: &Frame<'_>) {
    let immune = &frame.params.immune;
    let amplitude = immune.cellular_damage * 20.0;

    for p in particles.iter_mut() {
        let t = frame.time + p.meta.phase + p.meta.param;
        p.position = p.rest + Vec3::new(t.cos(), t.sin(), 0.0) * amplitude;
        p.size = p.base_size;
    }

    relax(particles, collision_radius(immune));
}

fn color(_p: &Particle, frame: &Frame<'_>) -> Vec3 {
    Vec3::splat(frame.params.immune.intensity())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: f32, y: f32) -> Particle {
        Particle::at_rest(Vec3::new(x, y, 0.0), 1.0, ParticleMeta::new(Part::Cell))
    }

    #[test]
    fn test_relax_separates_overlap() {
        let mut cells = [cell(0.0, 0.0), cell(1.0, 0.0)];
        relax(&mut cells, 2.0);
        let dist = (cells[1].position - cells[0].position).length();
        assert!((dist - 4.0).abs() < 1e-4);
        assert!((cells[0].position.x + 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_relax_leaves_distant_cells() {
        let mut cells = [cell(0.0, 0.0), cell(10.0, 0.0)];
        relax(&mut cells, 2.0);
        assert_eq!(cells[0].position, Vec3::ZERO);
        assert_eq!(cells[1].position, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_collision_radius_defaults() {
        let r = collision_radius(&ImmuneParams::default());
        assert!((r - (1.25 * 2.0 + 0.8)).abs() < 1e-5);
    }
}
