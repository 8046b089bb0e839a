//! Flat grid surfaces in the XZ plane.
//!
//! `puncture` dimples a pulsing pit into the centre with ripples spreading
//! outward, `wave` rolls sinusoids across the sheet, and `stretch` scales X
//! against Z.

use crate::arena::{Particle, ParticleMeta, Part, SampleWriter};
use crate::shape::{Frame, SampleContext, ShapeStrategy};
use crate::Vec3;
use std::f32::consts::FRAC_PI_2;

/// Dimensions and spacing of one grid surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub amount_x: u32,
    pub amount_y: u32,
    pub separation: f32,
    pub size: f32,
}

impl GridSpec {
    /// Resting position of cell `(ix, iy)`.
    pub fn position(&self, ix: u32, iy: u32) -> Vec3 {
        let half_x = self.amount_x as f32 * self.separation / 2.0;
        let half_y = self.amount_y as f32 * self.separation / 2.0;
        Vec3::new(
            ix as f32 * self.separation - half_x,
            0.0,
            iy as f32 * self.separation - half_y,
        )
    }

    /// Total cell count.
    pub fn count(&self) -> usize {
        (self.amount_x * self.amount_y) as usize
    }

    fn fill(&self, out: &mut SampleWriter<'_>) {
        for ix in 0..self.amount_x {
            for iy in 0..self.amount_y {
                let meta = ParticleMeta::new(Part::Surface).group(ix).index(iy);
                out.push(self.position(ix, iy), self.size, meta);
            }
        }
    }
}

pub const PUNCTURE_GRID: GridSpec = GridSpec { amount_x: 30, amount_y: 30, separation: 20.0, size: 18.0 };
pub const WAVE_GRID: GridSpec = GridSpec { amount_x: 40, amount_y: 40, separation: 15.0, size: 20.0 };
pub const STRETCH_GRID: GridSpec = GridSpec { amount_x: 30, amount_y: 20, separation: 18.0, size: 18.0 };

/// Pit radius in grid cells.
const PIT_RADIUS: f32 = 8.0;
/// Maximum pit depth.
const PIT_DEPTH: f32 = 80.0;

// Per-frame counter increments at 60 Hz, re-expressed per simulated second.
const PUNCTURE_COUNTER_RATE: f32 = 0.08 * 60.0 / 10.0;
const WAVE_COUNTER_RATE: f32 = 0.15 * 60.0 / 10.0;

pub const PUNCTURE: ShapeStrategy = ShapeStrategy {
    sample: sample_puncture,
    advance: advance_puncture,
    refit: None,
    color: None,
};

pub const WAVE: ShapeStrategy = ShapeStrategy {
    sample: sample_wave,
    advance: advance_wave,
    refit: None,
    color: None,
};

pub const STRETCH: ShapeStrategy = ShapeStrategy {
    sample: sample_stretch,
    advance: advance_stretch,
    refit: None,
    color: None,
};

fn sample_puncture(out: &mut SampleWriter<'_>, _ctx: &SampleContext<'_>) {
    PUNCTURE_GRID.fill(out);
}

fn sample_wave(out: &mut SampleWriter<'_>, _ctx: &SampleContext<'_>) {
    WAVE_GRID.fill(out);
}

fn sample_stretch(out: &mut SampleWriter<'_>, _ctx: &SampleContext<'_>) {
    STRETCH_GRID.fill(out);
}

fn advance_puncture(particles: &mut [Particle], frame: &Frame<'_>) {
    let f = frame.factor;
    let t = frame.phase;
    let count = frame.time * PUNCTURE_COUNTER_RATE;
    let centre_x = (PUNCTURE_GRID.amount_x as f32 - 1.0) / 2.0;
    let centre_y = (PUNCTURE_GRID.amount_y as f32 - 1.0) / 2.0;
    let pulse = (count * 0.1).sin() * 0.5 + 0.5;

    for p in particles {
        let ix = p.meta.group as f32;
        let iy = p.meta.index as f32;

        // Phase already carries the speed, so only the grid offsets remain.
        let surface = (t * 0.5 + ix * 0.1 + iy * 0.1).sin() * 8.0 * f;

        let mut y = p.rest.y + surface;
        if frame.active {
            let dist = ((ix - centre_x).powi(2) + (iy - centre_y).powi(2)).sqrt();
            if dist < PIT_RADIUS {
                let bulge = (dist / PIT_RADIUS * FRAC_PI_2).cos();
                y -= bulge * PIT_DEPTH * pulse * f;
            } else {
                let delay = (dist - PIT_RADIUS) * 0.3;
                y += (count * 0.2 - delay).sin() * (-(dist - PIT_RADIUS) * 0.1).exp() * 15.0 * f;
            }
        }

        p.position = Vec3::new(p.rest.x, y, p.rest.z);
        p.size = p.base_size;
    }
}

fn advance_wave(particles: &mut [Particle], frame: &Frame<'_>) {
    let f = frame.factor;
    let t = frame.phase;
    let count = frame.time * WAVE_COUNTER_RATE;

    for p in particles {
        let ix = p.meta.group as f32;
        let iy = p.meta.index as f32;

        let dx = (t * 0.6 + ix * 0.2).sin() * 15.0 * f + (t * 1.1 + iy * 0.15).cos() * 10.0 * f;
        let dz = (t * 0.8 + iy * 0.2).cos() * 15.0 * f + (t * 0.9 + ix * 0.15).sin() * 10.0 * f;
        let mut dy = (t * 0.4 + ix * 0.1 + iy * 0.1).sin() * 25.0 * f
            + (t * 0.7 + (ix + iy) * 0.08).cos() * 12.0 * f;

        if frame.active {
            dy += ((ix + count) * 0.3).sin() * 30.0 * f + ((iy + count) * 0.5).sin() * 30.0 * f;
        }

        p.position = p.rest + Vec3::new(dx, dy, dz);
        p.size = p.base_size;
    }
}

fn advance_stretch(particles: &mut [Particle], frame: &Frame<'_>) {
    let f = frame.factor;
    let stretch = if frame.active {
        1.0 + (frame.time * 1.5).sin() * 0.8 * f
    } else {
        1.0 + (frame.phase * 0.3).sin() * 0.2 * f
    };

    for p in particles {
        p.position = Vec3::new(p.rest.x * stretch, p.rest.y, p.rest.z / stretch);
        p.size = p.base_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_is_centred() {
        let first = WAVE_GRID.position(0, 0);
        let last = WAVE_GRID.position(39, 39);
        assert_eq!(first, Vec3::new(-300.0, 0.0, -300.0));
        assert_eq!(last, Vec3::new(285.0, 0.0, 285.0));
    }

    #[test]
    fn test_counts() {
        assert_eq!(PUNCTURE_GRID.count(), 900);
        assert_eq!(WAVE_GRID.count(), 1600);
        assert_eq!(STRETCH_GRID.count(), 600);
    }
}
