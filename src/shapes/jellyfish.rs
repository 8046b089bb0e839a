//! A jellyfish bell built from bioluminescent photophores.
//!
//! Three structures share the buffer, in order:
//!
//! - concentric rings tracing the bell profile, denser towards the rim;
//! - reinforcement lines running radially over the inner dome;
//! - a tapering trunk (manubrium) hanging from the bell's centre.
//!
//! The bell is modelled in small "bell units" and scaled up on output. Every
//! photophore carries its own tint, base intensity and flicker phase, all
//! drawn from the seeded RNG, and flickers with a pattern specific to its
//! structure.

use crate::arena::{Particle, ParticleMeta, Part, SampleWriter};
use crate::sampling::{bell_profile, scaled_count, seeded_rng, unit_progress};
use crate::shape::{Frame, SampleContext, ShapeStrategy};
use crate::Vec3;
use rand::rngs::SmallRng;
use rand::Rng;
use std::f32::consts::TAU;

/// World units per bell unit.
pub const BELL_SCALE: f32 = 15.0;
/// Bell dome sits this far above the origin, in bell units.
const DOME_LIFT: f32 = 2.0;

pub const RINGS: u32 = 28;
const MAX_PER_RING: f32 = 64.0;
const MIN_PER_RING: usize = 6;

pub const REINFORCEMENT_LINES: u32 = 8;
const POINTS_PER_LINE: u32 = 12;
/// Reinforcement lines skip the innermost points.
const LINE_START: u32 = 2;

pub const TRUNK_SEGMENTS: u32 = 20;
const TRUNK_POINTS_PER_SEGMENT: u32 = 12;
const TRUNK_LENGTH: f32 = 12.0;

const CONCENTRIC_SIZE: f32 = 10.0;
const REINFORCEMENT_SIZE: f32 = 8.0;
const TRUNK_SIZE: f32 = 12.0;

pub const JELLYFISH: ShapeStrategy = ShapeStrategy {
    sample,
    advance,
    refit: None,
    color: Some(color),
};

/// Photophores in ring `ring`.
fn ring_count(ring: u32) -> usize {
    let rr = unit_progress(ring as usize, RINGS as usize) * 0.9;
    ((MAX_PER_RING * (0.3 + 0.7 * rr)).floor() as usize).max(MIN_PER_RING)
}

/// Photophores in the full bell, before density is applied.
pub fn full_count() -> usize {
    let rings: usize = (0..RINGS).map(ring_count).sum();
    let lines = (REINFORCEMENT_LINES * (POINTS_PER_LINE - LINE_START)) as usize;
    let trunk = (TRUNK_SEGMENTS * TRUNK_POINTS_PER_SEGMENT) as usize;
    rings + lines + trunk
}

/// Dome point at normalized radius `rr` and angle `angle`, in bell units.
fn dome_point(rr: f32, angle: f32) -> Vec3 {
    let (height, radius) = bell_profile(rr);
    Vec3::new(angle.cos() * radius, height + DOME_LIFT, angle.sin() * radius)
}

fn uniform(rng: &mut SmallRng, lo: f32, span: f32) -> f32 {
    lo + rng.gen::<f32>() * span
}

/// Pushes photophores until the density budget runs out.
struct Photophores<'w, 'a> {
    out: &'w mut SampleWriter<'a>,
    rng: SmallRng,
    budget: usize,
}

impl Photophores<'_, '_> {
    fn push(&mut self, bell: Vec3, size: f32, meta: ParticleMeta) -> bool {
        if self.budget == 0 {
            return false;
        }
        self.budget -= 1;
        let jitter = self.rng.gen::<f32>() * 0.5;
        self.out.push(bell * BELL_SCALE, size * (1.0 + jitter), meta)
    }
}

fn sample(out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
    let budget = scaled_count(full_count() as f32, ctx.params.density).min(full_count());
    let mut ph = Photophores {
        out,
        rng: seeded_rng(ctx.seed, 0x3e11),
        budget,
    };

    for ring in 0..RINGS {
        let rr = unit_progress(ring as usize, RINGS as usize) * 0.9;
        let n = ring_count(ring);
        for i in 0..n {
            let angle = i as f32 / n as f32 * TAU;
            let rng = &mut ph.rng;
            let tint = Vec3::new(
                uniform(rng, 0.7, 0.3),
                uniform(rng, 0.2, 0.8),
                uniform(rng, 0.1, 0.9),
            );
            let intensity = uniform(rng, 0.5, 0.5);
            let meta = ParticleMeta::new(Part::Concentric)
                .group(ring)
                .index(i as u32)
                .phase(rng.gen::<f32>() * TAU)
                .tint(tint, intensity);
            if !ph.push(dome_point(rr, angle), CONCENTRIC_SIZE, meta) {
                return;
            }
        }
    }

    for line in 0..REINFORCEMENT_LINES {
        let angle = line as f32 / REINFORCEMENT_LINES as f32 * TAU;
        for i in LINE_START..POINTS_PER_LINE {
            let rr = i as f32 / (POINTS_PER_LINE - 1) as f32 * 0.7;
            let rng = &mut ph.rng;
            let tint = Vec3::new(
                uniform(rng, 0.6, 0.3),
                uniform(rng, 0.5, 0.4),
                uniform(rng, 0.4, 0.5),
            );
            let intensity = uniform(rng, 0.5, 0.3);
            let meta = ParticleMeta::new(Part::Reinforcement)
                .group(line)
                .index(i)
                .phase(rng.gen::<f32>() * TAU + line as f32 * 0.4)
                .tint(tint, intensity);
            if !ph.push(dome_point(rr, angle), REINFORCEMENT_SIZE, meta) {
                return;
            }
        }
    }

    for segment in 0..TRUNK_SEGMENTS {
        let ratio = unit_progress(segment as usize, TRUNK_SEGMENTS as usize);
        let radius = 2.0 * (1.0 - ratio * 0.6);
        let y = DOME_LIFT - ratio * TRUNK_LENGTH;
        for i in 0..TRUNK_POINTS_PER_SEGMENT {
            let angle = i as f32 / TRUNK_POINTS_PER_SEGMENT as f32 * TAU;
            let rng = &mut ph.rng;
            let tint = Vec3::new(
                uniform(rng, 0.8, 0.2),
                uniform(rng, 0.7, 0.3),
                uniform(rng, 0.6, 0.4),
            );
            let intensity = uniform(rng, 0.8, 0.2);
            let meta = ParticleMeta::new(Part::Trunk)
                .group(segment)
                .index(i)
                .param(ratio)
                .phase(rng.gen::<f32>() * TAU + segment as f32 * 0.2)
                .tint(tint, intensity);
            let pos = Vec3::new(angle.cos() * radius, y, angle.sin() * radius);
            if !ph.push(pos, TRUNK_SIZE, meta) {
                return;
            }
        }
    }
}

/// Current brightness of a photophore, by structure.
pub fn flicker(meta: &ParticleMeta, t: f32) -> f32 {
    let wave = |rate: f32, offset: f32, amp: f32| (t * rate + offset).sin() * amp + (1.0 - amp);
    match meta.part {
        Part::Concentric => {
            let metachronal = (t * 2.0 + meta.phase).sin() * 0.4 + 0.6;
            let lat = wave(1.5, meta.group as f32 * 0.5, 0.3);
            let lon = wave(2.2, meta.index as f32 * 0.4, 0.2);
            meta.intensity * metachronal * lat * lon
        }
        Part::Reinforcement => {
            let line = wave(1.5, meta.group as f32 * 0.8, 0.3);
            let along = wave(2.0, meta.index as f32 * 0.6, 0.2);
            meta.intensity * line * along
        }
        Part::Trunk => {
            let peristaltic = wave(3.0, meta.group as f32 * 0.8, 0.3);
            let circumferential = wave(2.5, meta.index as f32 * 1.2, 0.2);
            let pulse = wave(1.5, meta.param * 2.0, 0.2);
            let glow = wave(4.0, meta.param * 3.0, 0.1);
            meta.intensity * peristaltic * circumferential * pulse * glow
        }
        _ => meta.intensity,
    }
}

fn advance(particles: &mut [Particle], frame: &Frame<'_>) {
    let t = frame.time;
    let pulse = t.sin() * 0.4 + 1.0;

    for p in particles {
        let b = p.rest / BELL_SCALE;

        let bell = if p.meta.part == Part::Trunk {
            let along = p.meta.param;
            let sway = (t * 1.8 + along * 1.5).sin() * 0.3;
            Vec3::new(
                b.x * pulse + sway * along,
                (b.y + DOME_LIFT) * pulse - DOME_LIFT,
                b.z * pulse + sway * 0.5 * along,
            )
        } else {
            let radius = (b.x * b.x + b.z * b.z).sqrt();
            let ripple = (t * 1.5 + radius * 0.3).sin() * 0.2;
            Vec3::new(b.x * pulse, b.y * pulse + ripple, b.z * pulse)
        };

        p.position = bell * BELL_SCALE;
        p.size = p.base_size * (0.5 + flicker(&p.meta, t) * 1.5);
    }
}

fn color(p: &Particle, frame: &Frame<'_>) -> Vec3 {
    p.meta.tint * flicker(&p.meta, frame.time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_counts() {
        assert_eq!(ring_count(0), 19);
        assert_eq!(ring_count(RINGS - 1), 59);
        assert!((0..RINGS).all(|r| ring_count(r) >= MIN_PER_RING));
    }

    #[test]
    fn test_full_count_includes_every_structure() {
        let rings: usize = (0..RINGS).map(ring_count).sum();
        assert_eq!(full_count(), rings + 80 + 240);
    }

    #[test]
    fn test_dome_point_centre() {
        let p = dome_point(0.0, 1.0);
        assert!(p.x.abs() < 1e-6 && p.z.abs() < 1e-6);
        assert!((p.y - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_flicker_bounded_by_intensity() {
        let meta = ParticleMeta::new(Part::Trunk).param(0.5).tint(Vec3::ONE, 0.9);
        for k in 0..50 {
            let f = flicker(&meta, k as f32 * 0.37);
            assert!(f > 0.0 && f <= 0.9 + 1e-5);
        }
    }
}
