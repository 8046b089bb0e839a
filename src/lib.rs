//! # particle-forms
//!
//! Procedural particle geometries with per-frame deformation.
//!
//! Every shape is a point set sampled once into a fixed-capacity buffer and
//! then deformed in place each tick. Nothing is allocated per frame; a
//! renderer only has to upload [`ParticleBuffer`] rows.
//!
//! ## Quick Start
//!
//! ```ignore
//! use particle_forms::prelude::*;
//!
//! let mut gallery = Gallery::new(GalleryConfig::new().with_shape(ShapeKind::Torus));
//!
//! loop {
//!     gallery.tick(1.0 / 60.0);
//!     for p in gallery.buffer().active() {
//!         draw(p.position, p.size, p.color);
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Shapes
//!
//! [`ShapeKind`] enumerates the gallery. Each kind maps to a
//! [`ShapeStrategy`](shape::ShapeStrategy): a sampler that writes resting
//! particles and an advance function that deforms them. Selectors are the
//! snake_case ids used by the gallery (`"torus_5_sided"`,
//! `"parametric_spiral_1"`), with a few legacy aliases (`"cling"`,
//! `"flexibility"`).
//!
//! ### Parameters
//!
//! [`ParameterSet`] holds every slider. Out-of-range values are clamped by
//! [`ParameterSet::sanitized`], never rejected. Only count-affecting fields
//! (densities, spiral rotations, wireframe line counts) trigger a resample;
//! the rest are read live each tick.
//!
//! ### Time
//!
//! [`AnimationClock`] advances by `delta × speed`. At `speed = 0` the clock
//! stops and every particle sits exactly at its rest position.
//!
//! ### Snapshots
//!
//! [`SnapshotStore`] keeps up to [`MAX_SNAPSHOTS`](snapshot::MAX_SNAPSHOTS)
//! saved shape/parameter/camera triples and projects them to JSON.
//!
//! ## Feature Overview
//!
//! | Family | Kinds |
//! |--------|-------|
//! | Grids | [`ShapeKind::Puncture`], [`ShapeKind::Wave`], [`ShapeKind::Stretch`] |
//! | Solids | [`ShapeKind::Cube`], [`ShapeKind::Icosahedron`] |
//! | Spheres | [`ShapeKind::Oblate`], [`ShapeKind::Sphere`], [`ShapeKind::FibonacciSphere`] |
//! | Discs | [`ShapeKind::FibonacciDisc`], [`ShapeKind::BiconvexDisc`], [`ShapeKind::BiconcaveDisc`] |
//! | Tori | [`ShapeKind::Torus`], [`ShapeKind::PentagonalTorus`] |
//! | Spirographs | [`ShapeKind::Hypocycloid`], [`ShapeKind::Epicycloid`] |
//! | Composites | [`ShapeKind::MultiSphere25`], [`ShapeKind::MultiSphere10`], [`ShapeKind::LinesSphere`] |
//! | Organic | [`ShapeKind::Jellyfish`], [`ShapeKind::ImmuneSystem`] |
//! | Wireframe | [`ShapeKind::SphereLines`] |
//!
//! The `viewer` feature builds the `particle-forms` binary, a winit + wgpu
//! window that renders the gallery as instanced point sprites.

pub mod arena;
pub mod engine;
pub mod error;
pub mod gallery;
pub mod palette;
pub mod params;
pub mod sampling;
pub mod shape;
pub mod shapes;
pub mod snapshot;
pub mod time;

pub use bytemuck;
pub use glam::{Quat, Vec3};

pub use arena::{GpuParticle, Part, Particle, ParticleBuffer, ParticleMeta, DEFAULT_CAPACITY};
pub use error::{ShapeError, SnapshotError};
#[cfg(feature = "viewer")]
pub use error::{GpuError, ViewerError};
pub use gallery::{Gallery, GalleryConfig, LiveChange, ParamDiff};
pub use params::{ImmuneParams, ParameterSet, SpiralParams};
pub use shape::ShapeKind;
pub use snapshot::{CameraPose, Snapshot, SnapshotStore};
pub use time::{AnimationClock, FrameTimer};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use particle_forms::prelude::*;
/// ```
pub mod prelude {
    pub use crate::arena::{Particle, ParticleBuffer};
    pub use crate::gallery::{Gallery, GalleryConfig};
    pub use crate::params::{ImmuneParams, ParameterSet, SpiralParams};
    pub use crate::shape::ShapeKind;
    pub use crate::snapshot::{CameraPose, SnapshotStore};
    pub use crate::time::{AnimationClock, FrameTimer};
    pub use crate::{Quat, Vec3};
}
