//! The gallery controller: one shape, one buffer, one clock.
//!
//! [`Gallery`] ties sampling and deformation together the way a render loop
//! uses them. It resamples only on discrete events (shape change, a
//! count-affecting parameter change, or a restore) and otherwise just ticks.
//!
//! ```ignore
//! use particle_forms::prelude::*;
//!
//! let mut gallery = Gallery::new(
//!     GalleryConfig::new()
//!         .with_shape(ShapeKind::Torus)
//!         .with_params(ParameterSet::default().with_speed(3.0)),
//! );
//!
//! // Every frame:
//! gallery.tick(1.0 / 60.0);
//! upload(gallery.buffer());
//! ```

use crate::arena::{ParticleBuffer, DEFAULT_CAPACITY};
use crate::engine;
use crate::error::SnapshotError;
use crate::params::ParameterSet;
use crate::sampling::DEFAULT_SEED;
use crate::shape::{self, ShapeKind};
use crate::snapshot::{CameraPose, Snapshot, SnapshotStore};
use crate::time::AnimationClock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Start-up configuration of a [`Gallery`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Buffer rows; fixed for the gallery's lifetime.
    pub capacity: usize,
    /// Seed for shapes that scatter particles randomly.
    pub seed: u64,
    pub shape: ShapeKind,
    pub params: ParameterSet,
    /// Whether the shape starts as the foreground demo.
    pub active: bool,
    pub camera: CameraPose,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            seed: DEFAULT_SEED,
            shape: ShapeKind::default(),
            params: ParameterSet::default(),
            active: true,
            camera: CameraPose::default(),
        }
    }
}

impl GalleryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_params(mut self, params: ParameterSet) -> Self {
        self.params = params;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_camera(mut self, camera: CameraPose) -> Self {
        self.camera = camera;
        self
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|error| SnapshotError::Io {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Load a config. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|error| SnapshotError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// A parameter change that takes effect without resampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiveChange {
    Speed(f32),
    Color { hue: f32, saturation: f32, brightness: f32 },
    RotationSpeed(f32),
    LineLength(f32),
    /// Spiral `R`, `r` or `d` changed; rotations count toward resampling.
    SpiralShape,
    Immune,
    /// A count-affecting field changed that the current shape ignores.
    Unused,
}

/// Result of comparing two parameter sets for the current shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamDiff {
    /// Whether the particle count or layout changed and the buffer must be
    /// resampled.
    pub needs_resample: bool,
    /// Changes picked up live by the next tick.
    pub live: Vec<LiveChange>,
}

impl ParamDiff {
    /// Compare `old → new` for `kind`.
    pub fn between(kind: ShapeKind, old: &ParameterSet, new: &ParameterSet) -> Self {
        let mut live = Vec::new();

        if old.speed != new.speed {
            live.push(LiveChange::Speed(new.speed));
        }
        if (old.hue, old.saturation, old.brightness) != (new.hue, new.saturation, new.brightness) {
            live.push(LiveChange::Color {
                hue: new.hue,
                saturation: new.saturation,
                brightness: new.brightness,
            });
        }
        if old.rotation_speed != new.rotation_speed {
            live.push(LiveChange::RotationSpeed(new.rotation_speed));
        }
        if old.line_length != new.line_length {
            live.push(LiveChange::LineLength(new.line_length));
        }
        let spiral_shape = |a: &ParameterSet| {
            let (s1, s2) = (a.spiral1, a.spiral2);
            (s1.big_r, s1.r, s1.d, s2.big_r, s2.r, s2.d)
        };
        if spiral_shape(old) != spiral_shape(new) {
            live.push(LiveChange::SpiralShape);
        }
        if old.immune != new.immune {
            live.push(LiveChange::Immune);
        }

        let needs_resample = kind.needs_resample(old, new);
        let counts_changed = old.density != new.density
            || old.fibonacci_density != new.fibonacci_density
            || old.spiral1.rotations != new.spiral1.rotations
            || old.spiral2.rotations != new.spiral2.rotations
            || old.latitude_lines != new.latitude_lines
            || old.longitude_lines != new.longitude_lines;
        if counts_changed && !needs_resample {
            live.push(LiveChange::Unused);
        }

        Self { needs_resample, live }
    }

    /// Returns true if nothing changed.
    pub fn is_empty(&self) -> bool {
        !self.needs_resample && self.live.is_empty()
    }
}

/// The live gallery state.
#[derive(Debug, Clone)]
pub struct Gallery {
    buffer: ParticleBuffer,
    clock: AnimationClock,
    params: ParameterSet,
    shape: ShapeKind,
    seed: u64,
    active: bool,
    camera: CameraPose,
}

impl Gallery {
    /// Build a gallery and sample its initial shape.
    pub fn new(config: GalleryConfig) -> Self {
        let mut gallery = Self {
            buffer: ParticleBuffer::with_capacity(config.capacity),
            clock: AnimationClock::new(),
            params: config.params.sanitized(),
            shape: config.shape,
            seed: config.seed,
            active: config.active,
            camera: config.camera,
        };
        gallery.resample();
        gallery
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn camera(&self) -> &CameraPose {
        &self.camera
    }

    pub fn set_camera(&mut self, camera: CameraPose) {
        self.camera = camera;
    }

    /// Active particle count.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Switch to `kind` and resample. Returns the new active count.
    pub fn select_shape(&mut self, kind: ShapeKind) -> usize {
        self.shape = kind;
        self.resample()
    }

    /// Replace the parameter set, resampling only when the current shape's
    /// particle layout depends on a changed field.
    pub fn set_params(&mut self, params: ParameterSet) -> ParamDiff {
        let params = params.sanitized();
        let diff = ParamDiff::between(self.shape, &self.params, &params);
        self.params = params;
        if diff.needs_resample {
            self.resample();
        }
        diff
    }

    /// Advance the clock by `delta` wall seconds and deform the buffer.
    pub fn tick(&mut self, delta: f32) {
        self.clock.tick(delta, self.params.speed);
        engine::advance(self.shape, &mut self.buffer, &self.clock, &self.params, self.active);
    }

    /// Put every particle at rest without advancing the clock.
    pub fn rest_pose(&mut self) {
        engine::rest_pose(self.shape, &mut self.buffer, &self.clock, &self.params);
    }

    /// Sample the current shape from scratch. Returns the active count.
    pub fn resample(&mut self) -> usize {
        let count = shape::sample(self.shape, &mut self.buffer, &self.params, self.seed);
        self.rest_pose();
        count
    }

    /// The current parameter set.
    pub fn snapshot(&self) -> ParameterSet {
        self.params
    }

    /// Replace the parameter set and force a resample.
    pub fn restore(&mut self, params: ParameterSet) -> usize {
        self.params = params.sanitized();
        log::info!("restored parameters for '{}'", self.shape);
        self.resample()
    }

    /// Reset parameters and camera to their defaults.
    pub fn restore_defaults(&mut self) -> usize {
        self.camera = CameraPose::default();
        self.restore(ParameterSet::default())
    }

    /// Save the current shape, parameters and camera into `store`.
    pub fn capture(&self, store: &mut SnapshotStore) -> Result<u64, SnapshotError> {
        store.save(self.shape, self.params, self.camera)
    }

    /// Apply a saved snapshot: shape, parameters and camera.
    pub fn restore_snapshot(&mut self, snapshot: &Snapshot) -> usize {
        log::info!("restoring snapshot '{}'", snapshot.name);
        self.shape = snapshot.shape;
        self.camera = snapshot.camera;
        self.restore(snapshot.params)
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new(GalleryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_live_only() {
        let old = ParameterSet::default();
        let new = old.with_speed(3.0).with_line_length(2.0);
        let diff = ParamDiff::between(ShapeKind::LinesSphere, &old, &new);
        assert!(!diff.needs_resample);
        assert_eq!(diff.live, vec![LiveChange::Speed(3.0), LiveChange::LineLength(2.0)]);
    }

    #[test]
    fn test_diff_density_for_density_shape() {
        let old = ParameterSet::default();
        let new = old.with_density(2.0);
        assert!(ParamDiff::between(ShapeKind::Oblate, &old, &new).needs_resample);

        let diff = ParamDiff::between(ShapeKind::Torus, &old, &new);
        assert!(!diff.needs_resample);
        assert_eq!(diff.live, vec![LiveChange::Unused]);
    }

    #[test]
    fn test_diff_empty() {
        let p = ParameterSet::default();
        assert!(ParamDiff::between(ShapeKind::Wave, &p, &p).is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = GalleryConfig::new()
            .with_capacity(1000)
            .with_seed(3)
            .with_shape(ShapeKind::Cube)
            .with_active(false);
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.seed, 3);
        assert_eq!(config.shape, ShapeKind::Cube);
        assert!(!config.active);
    }

    #[test]
    fn test_config_partial_json() {
        let config: GalleryConfig = serde_json::from_str(r#"{ "shape": "torus_5_sided" }"#).unwrap();
        assert_eq!(config.shape, ShapeKind::PentagonalTorus);
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.params, ParameterSet::default());
    }
}
