//! Integration tests for the gallery controller and snapshot store.

use particle_forms::prelude::*;
use particle_forms::shapes::wireframe;
use particle_forms::snapshot::MAX_SNAPSHOTS;
use particle_forms::{LiveChange, SnapshotError};

fn gallery(shape: ShapeKind) -> Gallery {
    Gallery::new(GalleryConfig::new().with_shape(shape).with_seed(11))
}

// ============================================================================
// Resampling
// ============================================================================

#[test]
fn test_new_gallery_is_sampled_and_painted() {
    let g = gallery(ShapeKind::Torus);
    assert_eq!(g.len(), 3000);
    assert!(g.buffer().active().iter().all(|p| p.position == p.rest));
    assert!(g.buffer().active().iter().all(|p| p.color.max_element() > 0.0));
}

#[test]
fn test_select_shape_resamples() {
    let mut g = gallery(ShapeKind::Torus);
    let n = g.select_shape(ShapeKind::SphereLines);
    assert_eq!(g.shape(), ShapeKind::SphereLines);
    assert_eq!(n, wireframe::point_count(10, 16));
    assert_eq!(g.len(), n);
}

#[test]
fn test_density_change_resamples_only_when_used() {
    let mut g = gallery(ShapeKind::Oblate);
    let before = g.len();
    let diff = g.set_params(g.params().with_density(2.0));
    assert!(diff.needs_resample);
    assert!(g.len() > before);

    let mut g = gallery(ShapeKind::Torus);
    let before = g.len();
    let diff = g.set_params(g.params().with_density(2.0));
    assert!(!diff.needs_resample);
    assert_eq!(g.len(), before);
}

#[test]
fn test_line_length_is_live() {
    let mut g = gallery(ShapeKind::LinesSphere);
    let count = g.len();
    let diff = g.set_params(g.params().with_line_length(2.5).with_speed(0.0));

    assert!(!diff.needs_resample);
    assert!(diff.live.contains(&LiveChange::LineLength(2.5)));
    assert_eq!(g.len(), count);

    g.tick(0.016);
    let inner = g.buffer().active()[0].position.length();
    let outer = g.buffer().active()[1].position.length();
    assert!(outer > inner * 2.4);
}

#[test]
fn test_spiral_radii_refit_but_rotations_resample() {
    let mut g = gallery(ShapeKind::Hypocycloid);
    let before = g.len();
    let first = g.buffer().active()[5].rest;

    let mut spiral = g.params().spiral1;
    spiral.big_r = 150;
    let diff = g.set_params(g.params().with_spiral1(spiral).with_speed(0.0));
    assert!(!diff.needs_resample);
    assert!(diff.live.contains(&LiveChange::SpiralShape));
    assert_eq!(g.len(), before);

    g.tick(0.016);
    assert_ne!(g.buffer().active()[5].rest, first);

    spiral.rotations = 10;
    let diff = g.set_params(g.params().with_spiral1(spiral));
    assert!(diff.needs_resample);
    assert!(g.len() > before);
}

#[test]
fn test_set_params_sanitizes() {
    let mut g = gallery(ShapeKind::Wave);
    g.set_params(ParameterSet::default().with_speed(f32::NAN).with_density(50.0));
    assert_eq!(g.params().speed, 1.0);
    assert_eq!(g.params().density, 3.0);
    assert!(g.params().is_sanitized());
}

// ============================================================================
// Ticking
// ============================================================================

#[test]
fn test_tick_at_speed_zero_freezes_clock_and_shape() {
    let mut g = Gallery::new(
        GalleryConfig::new()
            .with_shape(ShapeKind::Jellyfish)
            .with_params(ParameterSet::default().with_speed(0.0)),
    );
    for _ in 0..30 {
        g.tick(1.0 / 60.0);
    }
    assert_eq!(g.clock().time(), 0.0);
    assert!(g.buffer().active().iter().all(|p| p.position == p.rest));
}

#[test]
fn test_tick_moves_shape() {
    let mut g = gallery(ShapeKind::Wave);
    g.set_params(g.params().with_speed(4.0));
    g.tick(0.5);
    assert!((g.clock().time() - 2.0).abs() < 1e-6);
    assert!(g.buffer().active().iter().any(|p| p.position != p.rest));

    g.rest_pose();
    assert!(g.buffer().active().iter().all(|p| p.position == p.rest));
}

// ============================================================================
// Snapshots
// ============================================================================

#[test]
fn test_snapshot_and_restore() {
    let mut g = gallery(ShapeKind::FibonacciDisc);
    let tuned = g.params().with_fibonacci_density(2.0).with_color(0.1, 0.2, 0.3);
    g.set_params(tuned);
    let saved = g.snapshot();

    g.restore_defaults();
    assert_eq!(*g.params(), ParameterSet::default());
    assert_eq!(g.len(), 1500);

    let n = g.restore(saved);
    assert_eq!(*g.params(), tuned);
    assert_eq!(n, 3000);
}

#[test]
fn test_capture_and_restore_snapshot() {
    let mut store = SnapshotStore::new();
    let mut g = gallery(ShapeKind::Hypocycloid);
    g.set_camera(CameraPose {
        position: Vec3::new(0.0, 100.0, 500.0),
        target: Vec3::ZERO,
    });
    g.set_params(g.params().with_speed(2.0));
    let id = g.capture(&mut store).unwrap();

    g.select_shape(ShapeKind::Cube);
    g.restore_defaults();

    let snapshot = store.get(id).unwrap().clone();
    assert_eq!(snapshot.name, "parametric_spiral_1 #1");
    g.restore_snapshot(&snapshot);

    assert_eq!(g.shape(), ShapeKind::Hypocycloid);
    assert_eq!(g.params().speed, 2.0);
    assert_eq!(g.camera().position, Vec3::new(0.0, 100.0, 500.0));
    assert_eq!(g.len(), 960);
}

#[test]
fn test_store_limit_surfaces_from_capture() {
    let mut store = SnapshotStore::new();
    let g = gallery(ShapeKind::Cube);
    for _ in 0..MAX_SNAPSHOTS {
        g.capture(&mut store).unwrap();
    }
    assert!(matches!(g.capture(&mut store), Err(SnapshotError::Full { .. })));
}

#[test]
fn test_store_json_round_trip() {
    let mut store = SnapshotStore::new();
    let g = gallery(ShapeKind::Jellyfish);
    g.capture(&mut store).unwrap();
    g.capture(&mut store).unwrap();

    let json = store.to_json().unwrap();
    let loaded = SnapshotStore::from_json(&json).unwrap();
    assert_eq!(loaded, store);
    assert_eq!(loaded.list()[1].name, "jellyfish #2");
}

#[test]
fn test_store_file_round_trip() {
    let path = std::env::temp_dir().join(format!("particle-forms-store-{}.json", std::process::id()));
    let mut store = SnapshotStore::new();
    gallery(ShapeKind::Torus).capture(&mut store).unwrap();

    store.to_file(&path).unwrap();
    let loaded = SnapshotStore::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, store);

    assert!(matches!(SnapshotStore::from_file(&path), Err(SnapshotError::Io { .. })));
}

// ============================================================================
// Config Files
// ============================================================================

#[test]
fn test_config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("particle-forms-config-{}.json", std::process::id()));
    let config = GalleryConfig::new()
        .with_shape(ShapeKind::ImmuneSystem)
        .with_params(ParameterSet::default().with_speed(3.0))
        .with_active(false);

    config.to_file(&path).unwrap();
    let loaded = GalleryConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, config);

    let g = Gallery::new(loaded);
    assert_eq!(g.shape(), ShapeKind::ImmuneSystem);
    assert!(!g.is_active());
}
