//! Per-tick deformation of the particle buffer.
//!
//! [`advance`] is the only entry point the render loop needs. One call:
//!
//! 1. re-derives rest data from live parameters if the shape has a `refit`;
//! 2. deforms every active particle, or copies rest positions verbatim when
//!    `speed` is zero;
//! 3. recomputes colors;
//! 4. forces every row past the active count invisible.
//!
//! The engine does not validate parameters. Callers pass a
//! [`ParameterSet::sanitized`] set.

use crate::arena::{Particle, ParticleBuffer};
use crate::palette::surface_color;
use crate::params::ParameterSet;
use crate::shape::{Frame, ShapeKind, ShapeStrategy};
use crate::time::AnimationClock;

/// Deform `buffer` in place for the current clock time.
pub fn advance(
    kind: ShapeKind,
    buffer: &mut ParticleBuffer,
    clock: &AnimationClock,
    params: &ParameterSet,
    active: bool,
) {
    let strategy = kind.strategy();
    let frame = Frame::new(clock, params, active);
    let particles = buffer.active_mut();

    if let Some(refit) = strategy.refit {
        refit(particles, params);
    }

    if params.speed == 0.0 {
        settle(particles);
    } else {
        (strategy.advance)(particles, &frame);
    }

    paint(strategy, particles, &frame);
    buffer.hide_inactive();
}

/// Put `buffer` in its rest pose: positions at rest, sizes at base, colors
/// for the current clock time.
pub fn rest_pose(kind: ShapeKind, buffer: &mut ParticleBuffer, clock: &AnimationClock, params: &ParameterSet) {
    let strategy = kind.strategy();
    let frame = Frame::new(clock, params, false);
    let particles = buffer.active_mut();

    if let Some(refit) = strategy.refit {
        refit(particles, params);
    }
    settle(particles);
    paint(strategy, particles, &frame);
    buffer.hide_inactive();
}

#[inline]
fn settle(particles: &mut [Particle]) {
    for p in particles {
        p.position = p.rest;
        p.size = p.base_size;
    }
}

fn paint(strategy: &ShapeStrategy, particles: &mut [Particle], frame: &Frame<'_>) {
    match strategy.color {
        Some(color) => {
            for p in particles {
                p.color = color(p, frame);
            }
        }
        None => {
            for p in particles {
                p.color = surface_color(p.position.y, frame.phase, frame.params);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::sample;

    fn sampled(kind: ShapeKind, params: &ParameterSet) -> ParticleBuffer {
        let mut buffer = ParticleBuffer::with_capacity(crate::arena::DEFAULT_CAPACITY);
        sample(kind, &mut buffer, params, 7);
        buffer
    }

    #[test]
    fn test_speed_zero_is_rest() {
        let params = ParameterSet::default().with_speed(0.0);
        let clock = AnimationClock::at(42.0);
        let mut buffer = sampled(ShapeKind::Torus, &params);
        advance(ShapeKind::Torus, &mut buffer, &clock, &params, true);
        for p in buffer.active() {
            assert_eq!(p.position, p.rest);
            assert_eq!(p.size, p.base_size);
        }
    }

    #[test]
    fn test_moving_shape_leaves_rest() {
        let params = ParameterSet::default().with_speed(5.0);
        let clock = AnimationClock::at(3.0);
        let mut buffer = sampled(ShapeKind::Oblate, &params);
        advance(ShapeKind::Oblate, &mut buffer, &clock, &params, false);
        let moved = buffer.active().iter().filter(|p| p.position != p.rest).count();
        assert!(moved > buffer.len() / 2);
    }

    #[test]
    fn test_inactive_rows_stay_hidden() {
        let params = ParameterSet::default();
        let clock = AnimationClock::at(1.0);
        let mut buffer = sampled(ShapeKind::Cube, &params);
        advance(ShapeKind::Cube, &mut buffer, &clock, &params, true);
        let len = buffer.len();
        assert!(buffer.rows()[len..].iter().all(|p| p.size == 0.0 && p.color == crate::Vec3::ZERO));
    }

    #[test]
    fn test_colors_written_for_active_rows() {
        let params = ParameterSet::default();
        let clock = AnimationClock::at(1.0);
        let mut buffer = sampled(ShapeKind::Wave, &params);
        advance(ShapeKind::Wave, &mut buffer, &clock, &params, false);
        assert!(buffer.active().iter().all(|p| p.color.max_element() > 0.0));
    }

    #[test]
    fn test_rest_pose_applies_line_length() {
        let params = ParameterSet::default().with_density(0.1);
        let clock = AnimationClock::new();
        let mut buffer = sampled(ShapeKind::LinesSphere, &params);
        let before = buffer.active()[1].rest.length();

        let longer = params.with_line_length(2.0);
        rest_pose(ShapeKind::LinesSphere, &mut buffer, &clock, &longer);
        let after = buffer.active()[1].position.length();
        assert!((after - before * 2.0).abs() < 1e-2);
    }
}
