//! A golden-spiral sphere enclosing many small spheres packed in shells,
//! like an atom diagram.
//!
//! Inner sphere centres come from a fixed shell table; each shell places its
//! spheres on its own Fibonacci spiral. Every inner particle keeps its
//! sphere's centre in `meta.anchor` so it can undulate about that centre.

use crate::arena::{Particle, ParticleMeta, Part, SampleWriter};
use crate::sampling::{fibonacci_sphere, scaled_count};
use crate::shape::{Frame, SampleContext, ShapeStrategy};
use crate::shapes::{direction, polar_angles};
use crate::Vec3;

const OUTER_RADIUS: f32 = 200.0;
const OUTER_SIZE: f32 = 16.0;

/// One wave term: `trig(t × rate + phi × k_phi + theta × k_theta) × amplitude`.
#[derive(Debug, Clone, Copy)]
struct Wave {
    rate: f32,
    k_phi: f32,
    k_theta: f32,
    amplitude: f32,
    cosine: bool,
}

const fn sin(rate: f32, k_phi: f32, k_theta: f32, amplitude: f32) -> Wave {
    Wave { rate, k_phi, k_theta, amplitude, cosine: false }
}

const fn cos(rate: f32, k_phi: f32, k_theta: f32, amplitude: f32) -> Wave {
    Wave { rate, k_phi, k_theta, amplitude, cosine: true }
}

/// Radial undulation of one sphere family.
#[derive(Debug, Clone, Copy)]
struct Undulation {
    waves: &'static [Wave],
    /// Radial displacement per unit of wave.
    reach: f32,
    /// Size growth per unit of wave.
    size_gain: f32,
    /// Phase offset added per inner sphere index.
    sphere_phase: f32,
}

impl Undulation {
    fn total(&self, t: f32, phi: f32, theta: f32, offset: f32) -> f32 {
        self.waves
            .iter()
            .map(|w| {
                let arg = t * w.rate + phi * w.k_phi + theta * w.k_theta + offset;
                let v = if w.cosine { arg.cos() } else { arg.sin() };
                v * w.amplitude
            })
            .sum()
    }
}

/// Layout and motion of one nested-sphere shape.
struct Nested {
    outer_base: f32,
    inner_base: f32,
    inner_radius: f32,
    inner_size: f32,
    sphere_count: usize,
    /// `(sphere count, shell radius)`, nucleus first.
    shells: &'static [(usize, f32)],
    /// Per-sphere azimuth twist step.
    twist: f32,
    outer: Undulation,
    inner: Undulation,
}

const NESTED_25: Nested = Nested {
    outer_base: 1000.0,
    inner_base: 25.0,
    inner_radius: OUTER_RADIUS / 25.0,
    inner_size: 8.0,
    sphere_count: 80,
    shells: &[(1, 0.0), (8, 15.0), (18, 30.0), (32, 50.0), (21, 70.0)],
    twist: 0.05,
    outer: Undulation {
        waves: &[sin(0.6, 4.0, 2.0, 0.08), cos(1.0, 6.0, 3.0, 0.06), sin(1.8, 2.0, 5.0, 0.04)],
        reach: 20.0,
        size_gain: 0.3,
        sphere_phase: 0.0,
    },
    inner: Undulation {
        waves: &[sin(1.2, 3.0, 4.0, 0.1), cos(1.8, 5.0, 2.0, 0.08)],
        reach: 8.0,
        size_gain: 0.4,
        sphere_phase: 0.5,
    },
};

const NESTED_10: Nested = Nested {
    outer_base: 1100.0,
    inner_base: 120.0,
    inner_radius: OUTER_RADIUS / 10.0,
    inner_size: 12.0,
    sphere_count: 24,
    shells: &[(1, 0.0), (6, 25.0), (12, 45.0), (5, 65.0)],
    twist: 0.1,
    outer: Undulation {
        waves: &[sin(0.7, 3.0, 2.0, 0.09), cos(1.1, 5.0, 4.0, 0.07), sin(1.6, 2.0, 6.0, 0.05)],
        reach: 22.0,
        size_gain: 0.3,
        sphere_phase: 0.0,
    },
    inner: Undulation {
        waves: &[sin(1.0, 4.0, 3.0, 0.12), cos(1.5, 6.0, 2.0, 0.10)],
        reach: 12.0,
        size_gain: 0.4,
        sphere_phase: 0.3,
    },
};

pub const MULTI_25: ShapeStrategy = ShapeStrategy {
    sample: sample_25,
    advance: advance_25,
    refit: None,
    color: None,
};

pub const MULTI_10: ShapeStrategy = ShapeStrategy {
    sample: sample_10,
    advance: advance_10,
    refit: None,
    color: None,
};

impl Nested {
    /// Centres of the inner spheres, shell by shell.
    fn centres(&self) -> Vec<Vec3> {
        let mut centres = Vec::with_capacity(self.sphere_count);
        for &(count, radius) in self.shells {
            for i in 0..count {
                if centres.len() == self.sphere_count {
                    return centres;
                }
                centres.push(fibonacci_sphere(i, count, 1.0) * radius);
            }
        }
        centres.resize(self.sphere_count, Vec3::ZERO);
        centres
    }

    fn sample(&self, out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
        let density = ctx.params.fibonacci_density;
        let outer = scaled_count(self.outer_base, density);
        let inner = scaled_count(self.inner_base, density);

        for i in 0..outer {
            let pos = fibonacci_sphere(i, outer, 1.0) * OUTER_RADIUS;
            out.push(pos, OUTER_SIZE, ParticleMeta::new(Part::Outer).index(i as u32));
        }

        for (sphere, centre) in self.centres().into_iter().enumerate() {
            let twist = 1.0 + sphere as f32 * self.twist;
            for i in 0..inner {
                let pos = centre + fibonacci_sphere(i, inner, twist) * self.inner_radius;
                let meta = ParticleMeta::new(Part::Inner)
                    .group(sphere as u32)
                    .index(i as u32)
                    .anchor(centre);
                if !out.push(pos, self.inner_size, meta) {
                    out.skip((self.sphere_count - sphere) * inner - i - 1);
                    return;
                }
            }
        }
    }

    fn advance(&self, particles: &mut [Particle], frame: &Frame<'_>) {
        let f = frame.factor;
        let t = frame.slow();

        for p in particles {
            let (centre, law, offset) = match p.meta.part {
                Part::Inner => (
                    p.meta.anchor,
                    &self.inner,
                    p.meta.group as f32 * self.inner.sphere_phase,
                ),
                _ => (Vec3::ZERO, &self.outer, 0.0),
            };

            let rel = p.rest - centre;
            if rel.length_squared() == 0.0 {
                p.position = p.rest;
                p.size = p.base_size;
                continue;
            }

            let (phi, theta) = polar_angles(rel);
            let total = law.total(t, phi, theta, offset) * f;

            p.position = p.rest + direction(rel) * (total * law.reach);
            p.size = p.base_size * (1.0 + total.abs() * law.size_gain * f);
        }
    }
}

fn sample_25(out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
    NESTED_25.sample(out, ctx);
}

fn advance_25(particles: &mut [Particle], frame: &Frame<'_>) {
    NESTED_25.advance(particles, frame);
}

fn sample_10(out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
    NESTED_10.sample(out, ctx);
}

fn advance_10(particles: &mut [Particle], frame: &Frame<'_>) {
    NESTED_10.advance(particles, frame);
}
