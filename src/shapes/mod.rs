//! Per-shape sample and advance laws.
//!
//! Each submodule exports one [`ShapeStrategy`](crate::shape::ShapeStrategy)
//! constant per shape kind. Sampling functions only push resting particles;
//! advance functions only write `position` and `size`. Shapes that own their
//! coloring supply a color function. The engine handles speed-zero rest
//! copies, the shared color gradient and tail blanking.

pub mod discs;
pub mod grid;
pub mod immune;
pub mod jellyfish;
pub mod lines_sphere;
pub mod nested;
pub mod solids;
pub mod spheres;
pub mod spirograph;
pub mod torus;
pub mod wireframe;

/// Unit direction of `v`, or `Vec3::Y` for the origin.
#[inline]
pub(crate) fn direction(v: crate::Vec3) -> crate::Vec3 {
    v.try_normalize().unwrap_or(crate::Vec3::Y)
}

/// Polar angle from +Y and azimuth in the XZ plane of `v`.
#[inline]
pub(crate) fn polar_angles(v: crate::Vec3) -> (f32, f32) {
    let len = v.length();
    let phi = if len > 0.0 { (v.y / len).clamp(-1.0, 1.0).acos() } else { 0.0 };
    (phi, v.z.atan2(v.x))
}
