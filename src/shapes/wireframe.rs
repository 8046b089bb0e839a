//! A latitude / longitude wireframe sphere drawn as point polylines.
//!
//! `latitudeLines + 1` parallels run pole to pole and `longitudeLines`
//! meridians fan around Y. The whole frame turns slowly about Y; each point
//! takes the shared gradient at its resting height, brightened by a glow
//! that sweeps along X.

use crate::arena::{Particle, ParticleMeta, Part, SampleWriter};
use crate::palette::surface_color;
use crate::shape::{Frame, SampleContext, ShapeStrategy};
use crate::{Quat, Vec3};
use std::f32::consts::{PI, TAU};

pub const RADIUS: f32 = 150.0;
/// Points per parallel, the closing point included.
pub const LATITUDE_SEGMENTS: u32 = 64;
/// Points per meridian, both poles included.
pub const LONGITUDE_SEGMENTS: u32 = 32;
const POINT_SIZE: f32 = 6.0;
const SPIN_RATE: f32 = 0.2;
const SHADER_RATE: f32 = 0.8;

pub const SPHERE_LINES: ShapeStrategy = ShapeStrategy {
    sample,
    advance,
    refit: None,
    color: Some(color),
};

/// Rows used by a wireframe with the given line counts.
pub fn point_count(latitude: u32, longitude: u32) -> usize {
    ((latitude + 1) * (LATITUDE_SEGMENTS + 1) + longitude * (LONGITUDE_SEGMENTS + 1)) as usize
}

fn sample(out: &mut SampleWriter<'_>, ctx: &SampleContext<'_>) {
    let latitude = ctx.params.latitude_lines.max(1);
    let longitude = ctx.params.longitude_lines;

    for i in 0..=latitude {
        let phi = i as f32 / latitude as f32 * PI;
        let (y, ring) = (RADIUS * phi.cos(), RADIUS * phi.sin());
        for j in 0..=LATITUDE_SEGMENTS {
            let theta = j as f32 / LATITUDE_SEGMENTS as f32 * TAU;
            let pos = Vec3::new(ring * theta.cos(), y, ring * theta.sin());
            out.push(pos, POINT_SIZE, ParticleMeta::new(Part::Latitude).group(i).index(j));
        }
    }

    for i in 0..longitude {
        let theta = i as f32 / longitude as f32 * TAU;
        for j in 0..=LONGITUDE_SEGMENTS {
            let phi = j as f32 / LONGITUDE_SEGMENTS as f32 * PI;
            let pos = Vec3::new(
                RADIUS * phi.sin() * theta.cos(),
                RADIUS * phi.cos(),
                RADIUS * phi.sin() * theta.sin(),
            );
            out.push(pos, POINT_SIZE, ParticleMeta::new(Part::Longitude).group(i).index(j));
        }
    }
}

fn advance(particles: &mut [Particle], frame: &Frame<'_>) {
    let spin = Quat::from_rotation_y(frame.time * SPIN_RATE);
    for p in particles {
        p.position = spin * p.rest;
        p.size = p.base_size;
    }
}

fn color(p: &Particle, frame: &Frame<'_>) -> Vec3 {
    let t = frame.time * SHADER_RATE;
    let glow = 1.0 + 0.3 * (t * 2.0 + p.rest.x * 0.01).sin();
    surface_color(p.rest.y, t, frame.params) * glow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ParticleBuffer;
    use crate::params::ParameterSet;
    use crate::shape::{sample as sample_shape, ShapeKind};

    #[test]
    fn test_point_count() {
        assert_eq!(point_count(10, 16), 11 * 65 + 16 * 33);
        assert_eq!(point_count(1, 3), 2 * 65 + 3 * 33);
    }

    #[test]
    fn test_points_lie_on_sphere() {
        let params = ParameterSet::default().with_grid_lines(4, 6);
        let mut buffer = ParticleBuffer::with_capacity(2_000);
        let n = sample_shape(ShapeKind::SphereLines, &mut buffer, &params, 1);
        assert_eq!(n, point_count(4, 6));
        for p in buffer.active() {
            assert!((p.rest.length() - RADIUS).abs() < 1e-2);
        }
    }
}
