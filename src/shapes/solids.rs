//! Hollow solids: a cube of face grids and a tessellated icosahedron.

use crate::arena::{Particle, ParticleMeta, Part, SampleWriter};
use crate::sampling::{ease_in_out_cubic, GOLDEN_RATIO};
use crate::shape::{Frame, SampleContext, ShapeStrategy};
use crate::shapes::direction;
use crate::Vec3;

const CUBE_SIZE: f32 = 300.0;
const CUBE_SPACING: f32 = 20.0;
const CUBE_PARTICLE_SIZE: f32 = 15.0;

const ICOSAHEDRON_RADIUS: f32 = 180.0;
/// Subdivisions along each face edge.
pub const ICOSAHEDRON_RESOLUTION: u32 = 35;
const ICOSAHEDRON_PARTICLE_SIZE: f32 = 8.0;

/// Face winding of the icosahedron, five-triangle caps around vertices 0 and 3.
pub const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// The 12 icosahedron vertices scaled onto a sphere of `radius`.
pub fn icosahedron_vertices(radius: f32) -> [Vec3; 12] {
    let phi = GOLDEN_RATIO;
    [
        Vec3::new(-1.0, phi, 0.0),
        Vec3::new(1.0, phi, 0.0),
        Vec3::new(-1.0, -phi, 0.0),
        Vec3::new(1.0, -phi, 0.0),
        Vec3::new(0.0, -1.0, phi),
        Vec3::new(0.0, 1.0, phi),
        Vec3::new(0.0, -1.0, -phi),
        Vec3::new(0.0, 1.0, -phi),
        Vec3::new(phi, 0.0, -1.0),
        Vec3::new(phi, 0.0, 1.0),
        Vec3::new(-phi, 0.0, -1.0),
        Vec3::new(-phi, 0.0, 1.0),
    ]
    .map(|v| v.normalize() * radius)
}

/// Points per face at a given resolution: `(res + 1)(res + 2) / 2`.
pub fn face_point_count(resolution: u32) -> usize {
    ((resolution + 1) * (resolution + 2) / 2) as usize
}

pub const CUBE: ShapeStrategy = ShapeStrategy {
    sample: sample_cube,
    advance: advance_cube,
    refit: None,
    color: None,
};

pub const ICOSAHEDRON: ShapeStrategy = ShapeStrategy {
    sample: sample_icosahedron,
    advance: advance_icosahedron,
    refit: None,
    color: None,
};

fn sample_cube(out: &mut SampleWriter<'_>, _ctx: &SampleContext<'_>) {
    let per_side = (CUBE_SIZE / CUBE_SPACING).floor() as u32;
    let half = CUBE_SIZE / 2.0;

    for face in 0..6u32 {
        for i in 0..per_side {
            for j in 0..per_side {
                let u = i as f32 / (per_side - 1) as f32 * CUBE_SIZE - half;
                let v = j as f32 / (per_side - 1) as f32 * CUBE_SIZE - half;
                let pos = match face {
                    0 => Vec3::new(u, v, half),
                    1 => Vec3::new(u, v, -half),
                    2 => Vec3::new(half, v, u),
                    3 => Vec3::new(-half, v, u),
                    4 => Vec3::new(u, half, v),
                    _ => Vec3::new(u, -half, v),
                };
                let meta = ParticleMeta::new(Part::Surface).group(face).index(i * per_side + j);
                out.push(pos, CUBE_PARTICLE_SIZE, meta);
            }
        }
    }
}

fn advance_cube(particles: &mut [Particle], frame: &Frame<'_>) {
    let t = frame.phase;

    for (i, p) in particles.iter_mut().enumerate() {
        let o = p.rest;
        p.position = Vec3::new(
            o.x + (t * 0.5 + o.x * 0.01 + o.y * 0.01).sin() * 5.0,
            o.y + (t * 0.7 + o.z * 0.01).cos() * 3.0,
            o.z + (t * 0.6 + o.x * 0.01).sin() * 4.0,
        );
        p.size = p.base_size * (1.0 + (t * 0.4 + i as f32 * 0.1).sin() * 0.1);
    }
}

fn sample_icosahedron(out: &mut SampleWriter<'_>, _ctx: &SampleContext<'_>) {
    let vertices = icosahedron_vertices(ICOSAHEDRON_RADIUS);
    let res = ICOSAHEDRON_RESOLUTION;

    for (face, &[a, b, c]) in ICOSAHEDRON_FACES.iter().enumerate() {
        let (v1, v2, v3) = (vertices[a], vertices[b], vertices[c]);
        for i in 0..=res {
            for j in 0..=(res - i) {
                let u = i as f32 / res as f32;
                let v = j as f32 / res as f32;
                let w = 1.0 - u - v;
                let pos = v1 * w + v2 * u + v3 * v;
                let meta = ParticleMeta::new(Part::Surface).group(face as u32).index(i * (res + 1) + j);
                out.push(pos, ICOSAHEDRON_PARTICLE_SIZE, meta);
            }
        }
    }
}

fn advance_icosahedron(particles: &mut [Particle], frame: &Frame<'_>) {
    let t = frame.phase;

    let global = (t * 0.7).sin() * 0.15 + (t * 1.1).cos() * 0.12 + (t * 1.8).sin() * 0.08;
    let smooth = ease_in_out_cubic(((t * 0.4).sin() + 1.0) / 2.0);
    let active = if frame.active { (t * 1.3).sin() * 0.25 * smooth } else { 0.0 };

    for p in particles {
        let o = p.rest;
        let (sx, sy, sz) = (o.x * 0.01, o.y * 0.01, o.z * 0.01);

        let spatial = (t * 0.9 + sx + sy).sin() * 0.1
            + (t * 1.4 + sz + sx).cos() * 0.08
            + (t * 2.2 + sy + sz).sin() * 0.06;
        let total = (global + spatial + active) * smooth;

        let directional = Vec3::new(
            (t * 0.8 + o.y * 0.02).sin() * 8.0,
            (t * 1.2 + o.z * 0.02).cos() * 8.0,
            (t * 1.6 + o.x * 0.02).sin() * 8.0,
        );

        p.position = o + direction(o) * (total * 20.0) + directional;
        p.size = p.base_size * (1.0 + total.abs() * 0.4 + smooth * 0.3);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices_on_sphere() {
        for v in icosahedron_vertices(180.0) {
            assert!((v.length() - 180.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_faces_use_every_vertex_five_times() {
        let mut uses = [0; 12];
        for face in ICOSAHEDRON_FACES {
            for v in face {
                uses[v] += 1;
            }
        }
        assert!(uses.iter().all(|&n| n == 5));
    }

    #[test]
    fn test_face_point_count() {
        assert_eq!(face_point_count(35), 666);
        assert_eq!(face_point_count(1), 3);
    }
}
