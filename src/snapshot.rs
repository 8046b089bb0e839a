//! Saved gallery configurations.
//!
//! A [`Snapshot`] captures the shape, the parameter set and the camera pose.
//! [`SnapshotStore`] keeps a bounded, ordered list of them and projects to
//! and from JSON.

use crate::error::SnapshotError;
use crate::params::ParameterSet;
use crate::shape::ShapeKind;
use crate::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Most snapshots a store will hold.
pub const MAX_SNAPSHOTS: usize = 20;

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 350.0),
            target: Vec3::ZERO,
        }
    }
}

impl CameraPose {
    /// Distance from the camera to the origin.
    pub fn distance(&self) -> f32 {
        self.position.length()
    }
}

/// One saved configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: u64,
    pub shape: ShapeKind,
    pub name: String,
    #[serde(default)]
    pub params: ParameterSet,
    #[serde(default)]
    pub camera: CameraPose,
}

impl Snapshot {
    /// Short description of what makes this snapshot different.
    ///
    /// Speed is always listed, then non-default densities, rotation and line
    /// length, the spiral coefficients for spiral shapes, and the camera
    /// distance. At most three parts are kept.
    pub fn summary(&self) -> String {
        let p = &self.params;
        let mut parts = vec![format!("Speed: {:.1}", p.speed)];

        if p.fibonacci_density != 1.0 {
            parts.push(format!("Fib Density: {:.1}", p.fibonacci_density));
        }
        if p.density != 1.0 {
            parts.push(format!("Density: {:.1}", p.density));
        }
        if p.rotation_speed != 1.0 {
            parts.push(format!("Rotation: {:.1}x", p.rotation_speed));
        }
        if p.line_length != 1.0 {
            parts.push(format!("Line Length: {:.1}x", p.line_length));
        }
        let spiral = match self.shape {
            ShapeKind::Hypocycloid => Some(p.spiral1),
            ShapeKind::Epicycloid => Some(p.spiral2),
            _ => None,
        };
        if let Some(s) = spiral {
            parts.push(format!("R:{} r:{} d:{}", s.big_r, s.r, s.d));
        }
        parts.push(format!("Dist: {:.0}", self.camera.distance()));

        parts.truncate(3);
        parts.join(" | ")
    }
}

/// A bounded list of snapshots in save order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapshotStore {
    snapshots: Vec<Snapshot>,
    next_id: u64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a snapshot and return its id.
    ///
    /// The name is `"<shape> #<n>"`, where `n` counts snapshots of the same
    /// shape including this one.
    pub fn save(
        &mut self,
        shape: ShapeKind,
        params: ParameterSet,
        camera: CameraPose,
    ) -> Result<u64, SnapshotError> {
        if self.snapshots.len() >= MAX_SNAPSHOTS {
            return Err(SnapshotError::Full { limit: MAX_SNAPSHOTS });
        }

        let n = self.snapshots.iter().filter(|s| s.shape == shape).count() + 1;
        let id = self.next_id;
        self.next_id += 1;

        self.snapshots.push(Snapshot {
            id,
            shape,
            name: format!("{} #{}", shape, n),
            params: params.sanitized(),
            camera,
        });
        log::debug!("saved snapshot {} ({}/{})", id, self.snapshots.len(), MAX_SNAPSHOTS);
        Ok(id)
    }

    pub fn get(&self, id: u64) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.id == id)
    }

    /// Remove a snapshot, returning it.
    pub fn delete(&mut self, id: u64) -> Result<Snapshot, SnapshotError> {
        let index = self
            .snapshots
            .iter()
            .position(|s| s.id == id)
            .ok_or(SnapshotError::NotFound(id))?;
        Ok(self.snapshots.remove(index))
    }

    /// All snapshots in save order.
    pub fn list(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// The most recently saved snapshot.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.snapshots.len() >= MAX_SNAPSHOTS
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a store, sanitizing every stored parameter set.
    ///
    /// Stores over the snapshot limit are rejected.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let mut store: SnapshotStore = serde_json::from_str(json)?;
        if store.snapshots.len() > MAX_SNAPSHOTS {
            return Err(SnapshotError::Full { limit: MAX_SNAPSHOTS });
        }
        for snapshot in &mut store.snapshots {
            snapshot.params = snapshot.params.sanitized();
        }
        let max_id = store.snapshots.iter().map(|s| s.id + 1).max().unwrap_or(0);
        store.next_id = store.next_id.max(max_id);
        Ok(store)
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|error| SnapshotError::Io {
            path: path.to_path_buf(),
            error,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|error| SnapshotError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_count_per_shape() {
        let mut store = SnapshotStore::new();
        let cam = CameraPose::default();
        store.save(ShapeKind::Torus, ParameterSet::default(), cam).unwrap();
        store.save(ShapeKind::Cube, ParameterSet::default(), cam).unwrap();
        let id = store.save(ShapeKind::Torus, ParameterSet::default(), cam).unwrap();
        assert_eq!(store.get(id).unwrap().name, "torus #2");
        assert_eq!(store.list()[1].name, "cube #1");
    }

    #[test]
    fn test_store_is_bounded() {
        let mut store = SnapshotStore::new();
        for _ in 0..MAX_SNAPSHOTS {
            store.save(ShapeKind::Wave, ParameterSet::default(), CameraPose::default()).unwrap();
        }
        assert!(store.is_full());
        let err = store
            .save(ShapeKind::Wave, ParameterSet::default(), CameraPose::default())
            .unwrap_err();
        assert!(matches!(err, SnapshotError::Full { limit: MAX_SNAPSHOTS }));
    }

    #[test]
    fn test_delete() {
        let mut store = SnapshotStore::new();
        let id = store.save(ShapeKind::Wave, ParameterSet::default(), CameraPose::default()).unwrap();
        assert_eq!(store.delete(id).unwrap().id, id);
        assert!(store.is_empty());
        assert!(matches!(store.delete(id), Err(SnapshotError::NotFound(_))));
    }

    #[test]
    fn test_ids_unique_after_delete() {
        let mut store = SnapshotStore::new();
        let a = store.save(ShapeKind::Wave, ParameterSet::default(), CameraPose::default()).unwrap();
        store.delete(a).unwrap();
        let b = store.save(ShapeKind::Wave, ParameterSet::default(), CameraPose::default()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_json_sanitizes_params() {
        let json = r#"{
            "snapshots": [
                { "id": 4, "shape": "cling", "name": "sphere #1",
                  "params": { "speed": 99.0, "density": 0.5 } }
            ],
            "nextId": 0
        }"#;
        let store = SnapshotStore::from_json(json).unwrap();
        let s = &store.list()[0];
        assert_eq!(s.shape, ShapeKind::Sphere);
        assert_eq!(s.params.speed, 10.0);
        assert_eq!(s.params.density, 0.5);
        assert_eq!(s.params.fibonacci_density, 1.0);
        assert_eq!(s.camera, CameraPose::default());

        let mut store = store;
        let id = store.save(ShapeKind::Wave, ParameterSet::default(), CameraPose::default()).unwrap();
        assert_eq!(id, 5);
    }

    #[test]
    fn test_json_rejects_unknown_shape() {
        let json = r#"{ "snapshots": [ { "id": 0, "shape": "eclipse", "name": "x" } ], "nextId": 1 }"#;
        assert!(matches!(SnapshotStore::from_json(json), Err(SnapshotError::Json(_))));
    }

    #[test]
    fn test_summary() {
        let mut store = SnapshotStore::new();
        let params = ParameterSet::default().with_speed(2.5);
        let id = store.save(ShapeKind::Hypocycloid, params, CameraPose::default()).unwrap();
        assert_eq!(store.get(id).unwrap().summary(), "Speed: 2.5 | R:120 r:30 d:50 | Dist: 350");

        let params = ParameterSet::default().with_density(1.5).with_rotation_speed(2.0);
        let id = store.save(ShapeKind::LinesSphere, params, CameraPose::default()).unwrap();
        assert_eq!(store.get(id).unwrap().summary(), "Speed: 1.0 | Density: 1.5 | Rotation: 2.0x");
    }
}
