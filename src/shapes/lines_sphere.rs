//! Nine concentric shells of radial line segments.
//!
//! Every segment is a pair of rows: an inner endpoint on the shell and an
//! outer endpoint pushed out along the same direction. Shells spin about Y
//! at their own rate, alternating direction past the fourth shell, and the
//! whole assembly pulses between 0.3× and 1.7× scale.

use crate::arena::{Particle, ParticleMeta, Part, SampleWriter};
use crate::palette::{grade, hex};
use crate::params::ParameterSet;
use crate::sampling::{ease_in_out_cubic, random_direction, scaled_count, seeded_rng};
use crate::shape::{Frame, SampleContext, ShapeStrategy};
use crate::{Quat, Vec3};
use rand::Rng;

pub const BASE_RADIUS: f32 = 200.0;
pub const SEGMENT_BASE_COUNT: f32 = 1500.0;
/// Random extra length of each segment, as a fraction of its shell radius.
const MAX_EXTENSION: f32 = 0.09;
const LINE_POINT_SIZE: f32 = 3.0;

/// One shell: radius scale, color, opacity and line width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shell {
    pub scale: f32,
    pub color: u32,
    pub opacity: f32,
    pub width: f32,
}

const fn shell(scale: f32, color: u32, opacity: f32, width: f32) -> Shell {
    Shell { scale, color, opacity, width }
}

pub const SHELLS: [Shell; 9] = [
    shell(0.25, 0xff7700, 1.0, 2.0),
    shell(0.5, 0xff9900, 1.0, 1.0),
    shell(0.75, 0xffaa00, 0.75, 1.0),
    shell(1.0, 0xffaa00, 0.5, 1.0),
    shell(1.25, 0x000833, 0.8, 1.0),
    shell(3.0, 0xaaaaaa, 0.75, 2.0),
    shell(3.5, 0xffffff, 0.5, 1.0),
    shell(4.5, 0xffffff, 0.25, 1.0),
    shell(5.5, 0xffffff, 0.125, 1.0),
];

impl Shell {
    #[inline]
    pub fn radius(&self) -> f32 {
        BASE_RADIUS * self.scale
    }

    /// Y spin rate multiplier: the first four shells turn one way, the rest
    /// the other, each faster than the last.
    #[inline]
    pub fn spin(index: usize) -> f32 {
        let rate = (index + 1) as f32;
        if index < 4 {
            rate
        } else {
            -rate
        }
    }
}

pub const LINES_SPHERE: ShapeStrategy = ShapeStrategy {
    sample,
    advance,
    refit: Some(refit),
    color: Some(color),
};

/// Segments per shell at `density`, limited so all shells fit in `capacity`.
pub fn segments_per_shell(density: f32, capacity: usize) -> usize {
    scaled_count(SEGMENT_BASE_COUNT, density).min(capacity / (SHELLS.len() * 2))
}

/// Outer endpoint of a segment along `dir` on `shell`.
#[inline]
fn outer_endpoint(dir: Vec3, shell: &Shell, extension: f32, line_length: f32) -> Vec3 {
    dir * shell.radius() * (1.0 + extension) * line_length
}

fn sample(out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
    let requested = scaled_count(SEGMENT_BASE_COUNT, ctx.params.density);
    let segments = segments_per_shell(ctx.params.density, out.remaining());
    out.skip((requested - segments) * SHELLS.len() * 2);
    let mut rng = seeded_rng(ctx.seed, 0x11e5);

    for (idx, shell) in SHELLS.iter().enumerate() {
        for s in 0..segments {
            let dir = random_direction(&mut rng);
            let extension = rng.gen::<f32>() * MAX_EXTENSION;
            let meta = ParticleMeta::new(Part::Segment)
                .group(idx as u32)
                .index(s as u32 * 2)
                .anchor(dir)
                .param(extension);
            out.push_segment(
                dir * shell.radius(),
                outer_endpoint(dir, shell, extension, ctx.params.line_length),
                LINE_POINT_SIZE * shell.width,
                meta,
            );
        }
    }
}

/// Re-extend every outer endpoint with the live line length.
fn refit(particles: &mut [Particle], params: &ParameterSet) {
    for p in particles.iter_mut().filter(|p| p.meta.index % 2 == 1) {
        let shell = &SHELLS[p.meta.group as usize % SHELLS.len()];
        p.rest = outer_endpoint(p.meta.anchor, shell, p.meta.param, params.line_length);
    }
}

/// Global zoom in `[0.3, 1.7]`, eased so it lingers at the extremes.
///
/// `slow` is the factor-scaled time from [`Frame::slow`]; `factor` only
/// gates the pulse.
pub fn pulse_scale(slow: f32, factor: f32) -> f32 {
    if factor <= 0.0 {
        return 1.0;
    }
    let raw = (slow * 0.002).sin();
    0.3 + ease_in_out_cubic((raw + 1.0) / 2.0) * 1.4
}

fn advance(particles: &mut [Particle], frame: &Frame<'_>) {
    let t = frame.phase;
    let pulse = pulse_scale(frame.slow(), frame.factor);
    let rotation_speed = frame.params.rotation_speed;

    let spins: [Quat; 9] = std::array::from_fn(|idx| {
        Quat::from_rotation_y(t * 0.01 * Shell::spin(idx) * rotation_speed)
    });

    for p in particles {
        let spin = spins[p.meta.group as usize % SHELLS.len()];
        p.position = spin * p.rest * pulse;
        p.size = p.base_size;
    }
}

fn color(p: &Particle, frame: &Frame<'_>) -> Vec3 {
    let shell = &SHELLS[p.meta.group as usize % SHELLS.len()];
    grade(hex(shell.color) * shell.opacity, frame.params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_alternates() {
        assert_eq!(Shell::spin(0), 1.0);
        assert_eq!(Shell::spin(3), 4.0);
        assert_eq!(Shell::spin(4), -5.0);
        assert_eq!(Shell::spin(8), -9.0);
    }

    #[test]
    fn test_segments_fit_capacity() {
        assert_eq!(segments_per_shell(1.0, 27_000), 1500);
        assert_eq!(segments_per_shell(3.0, 27_000), 1500);
        assert_eq!(segments_per_shell(0.1, 27_000), 150);
        assert_eq!(segments_per_shell(1.0, 180), 10);
    }

    #[test]
    fn test_overflow_rows_are_reported() {
        let params = ParameterSet::default().with_density(3.0);
        let ctx = SampleContext { params: &params, seed: 7 };
        let mut buffer = crate::ParticleBuffer::with_capacity(crate::DEFAULT_CAPACITY);
        let mut out = SampleWriter::new(&mut buffer);
        sample(&mut out, &ctx);

        assert_eq!(out.written(), 27_000);
        assert_eq!(out.dropped(), 81_000 - 27_000);
        assert_eq!(out.finish("lines_sphere"), 27_000);
    }

    #[test]
    fn test_nothing_dropped_when_everything_fits() {
        let params = ParameterSet::default();
        let ctx = SampleContext { params: &params, seed: 7 };
        let mut buffer = crate::ParticleBuffer::with_capacity(crate::DEFAULT_CAPACITY);
        let mut out = SampleWriter::new(&mut buffer);
        sample(&mut out, &ctx);

        assert_eq!(out.written(), 27_000);
        assert_eq!(out.dropped(), 0);
    }

    #[test]
    fn test_pulse_follows_slow_time() {
        // slowTime 72 s at full undulation: sin(0.144) eased into [0.3, 1.7]
        let raw = (72.0_f32 * 0.002).sin();
        let expected = 0.3 + ease_in_out_cubic((raw + 1.0) / 2.0) * 1.4;
        assert!((pulse_scale(72.0, 1.0) - expected).abs() < 1e-6);
        assert!((pulse_scale(72.0, 1.0) - 1.2602).abs() < 1e-3);
        // the factor gates but does not rescale
        assert_eq!(pulse_scale(72.0, 0.3), pulse_scale(72.0, 1.0));
    }

    #[test]
    fn test_pulse_range() {
        assert_eq!(pulse_scale(123.0, 0.0), 1.0);
        assert!((pulse_scale(0.0, 0.5) - 1.0).abs() < 1e-5);
        for k in 0..100 {
            let s = pulse_scale(k as f32 * 37.0, 1.0);
            assert!((0.3 - 1e-5..=1.7 + 1e-5).contains(&s));
        }
    }

    #[test]
    fn test_outer_endpoint_scales_with_line_length() {
        let shell = &SHELLS[3];
        let a = outer_endpoint(Vec3::X, shell, 0.05, 1.0);
        let b = outer_endpoint(Vec3::X, shell, 0.05, 2.0);
        assert!((a.x - 210.0).abs() < 1e-3);
        assert!((b.x - 420.0).abs() < 1e-3);
    }
}
