//! Shape kinds and the strategy registry.
//!
//! Every [`ShapeKind`] maps to a [`ShapeStrategy`]: a `sample` function that
//! fills the buffer with resting particles, an `advance` function that
//! deforms them for one tick, and an optional `refit` that re-derives rest
//! positions from live parameters without changing the particle count.
//!
//! | Id | Aliases | Sampling |
//! |----|---------|----------|
//! | `puncture`, `wave`, `stretch` | `flexibility` | regular XZ grid |
//! | `cube` | `retention` | six face grids |
//! | `icosahedron` | `stability` | barycentric face tessellation |
//! | `oblate` | `organic` | offset spiral on a spheroid |
//! | `sphere` | `cling` | outer + inner offset spiral |
//! | `fibonacci_sphere` | | outer + inner golden spiral |
//! | `fibonacci_disc`, `biconvex_disc`, `biconcave_disc` | | golden-angle disc |
//! | `torus`, `torus_5_sided` | | golden-angle torus |
//! | `parametric_spiral_1`, `parametric_spiral_2` | | hypo/epicycloid |
//! | `multi_sphere_25`, `multi_sphere_10` | | sphere of shell-packed spheres |
//! | `lines_sphere` | | nine shells of radial segments |
//! | `jellyfish` | `jellyfish_medusae` | bell rings, ribs and trunk |
//! | `sphere_lines` | | latitude / longitude polylines |
//! | `immune_system` | | ring of 2D cells |

use crate::arena::{Particle, ParticleBuffer, SampleWriter};
use crate::error::ShapeError;
use crate::params::ParameterSet;
use crate::shapes;
use crate::time::AnimationClock;
use crate::Vec3;
use std::fmt;
use std::str::FromStr;

/// Every shape the gallery can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeKind {
    Puncture,
    /// Undulating grid; the gallery's default shape.
    #[default]
    Wave,
    Stretch,
    Cube,
    Icosahedron,
    Oblate,
    Sphere,
    FibonacciSphere,
    FibonacciDisc,
    BiconvexDisc,
    BiconcaveDisc,
    Torus,
    PentagonalTorus,
    Hypocycloid,
    Epicycloid,
    MultiSphere25,
    MultiSphere10,
    LinesSphere,
    Jellyfish,
    SphereLines,
    ImmuneSystem,
}

impl ShapeKind {
    /// All kinds in gallery order.
    pub const ALL: [ShapeKind; 21] = [
        ShapeKind::Puncture,
        ShapeKind::Wave,
        ShapeKind::Stretch,
        ShapeKind::Sphere,
        ShapeKind::Cube,
        ShapeKind::Icosahedron,
        ShapeKind::Oblate,
        ShapeKind::FibonacciSphere,
        ShapeKind::FibonacciDisc,
        ShapeKind::BiconvexDisc,
        ShapeKind::BiconcaveDisc,
        ShapeKind::Torus,
        ShapeKind::PentagonalTorus,
        ShapeKind::Hypocycloid,
        ShapeKind::Epicycloid,
        ShapeKind::MultiSphere25,
        ShapeKind::MultiSphere10,
        ShapeKind::LinesSphere,
        ShapeKind::Jellyfish,
        ShapeKind::ImmuneSystem,
        ShapeKind::SphereLines,
    ];

    /// Canonical selector string.
    pub fn id(self) -> &'static str {
        match self {
            ShapeKind::Puncture => "puncture",
            ShapeKind::Wave => "wave",
            ShapeKind::Stretch => "stretch",
            ShapeKind::Cube => "cube",
            ShapeKind::Icosahedron => "icosahedron",
            ShapeKind::Oblate => "oblate",
            ShapeKind::Sphere => "sphere",
            ShapeKind::FibonacciSphere => "fibonacci_sphere",
            ShapeKind::FibonacciDisc => "fibonacci_disc",
            ShapeKind::BiconvexDisc => "biconvex_disc",
            ShapeKind::BiconcaveDisc => "biconcave_disc",
            ShapeKind::Torus => "torus",
            ShapeKind::PentagonalTorus => "torus_5_sided",
            ShapeKind::Hypocycloid => "parametric_spiral_1",
            ShapeKind::Epicycloid => "parametric_spiral_2",
            ShapeKind::MultiSphere25 => "multi_sphere_25",
            ShapeKind::MultiSphere10 => "multi_sphere_10",
            ShapeKind::LinesSphere => "lines_sphere",
            ShapeKind::Jellyfish => "jellyfish",
            ShapeKind::SphereLines => "sphere_lines",
            ShapeKind::ImmuneSystem => "immune_system",
        }
    }

    /// Human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            ShapeKind::Puncture => "Puncture",
            ShapeKind::Wave => "Flexibility",
            ShapeKind::Stretch => "Stretch",
            ShapeKind::Cube => "Retention",
            ShapeKind::Icosahedron => "Stability",
            ShapeKind::Oblate => "Organic",
            ShapeKind::Sphere => "Cling",
            ShapeKind::FibonacciSphere => "Fibonacci Sphere",
            ShapeKind::FibonacciDisc => "Fibonacci Disc",
            ShapeKind::BiconvexDisc => "Biconvex Disc",
            ShapeKind::BiconcaveDisc => "Biconcave Disc",
            ShapeKind::Torus => "Torus",
            ShapeKind::PentagonalTorus => "5-Sided Torus",
            ShapeKind::Hypocycloid => "Parametric Spiral 1",
            ShapeKind::Epicycloid => "Parametric Spiral 2",
            ShapeKind::MultiSphere25 => "Multi-Sphere 25x",
            ShapeKind::MultiSphere10 => "Multi-Sphere 10x",
            ShapeKind::LinesSphere => "Lines Sphere",
            ShapeKind::Jellyfish => "Jellyfish Medusae",
            ShapeKind::SphereLines => "Sphere Lines",
            ShapeKind::ImmuneSystem => "Immune System",
        }
    }

    /// Resolve a selector, degrading unknown ids to the default shape.
    ///
    /// An unknown id is a programming error: debug builds panic so it is
    /// caught early, release builds log it and fall back to [`ShapeKind::Wave`].
    pub fn resolve(id: &str) -> ShapeKind {
        match id.parse() {
            Ok(kind) => kind,
            Err(e) => {
                debug_assert!(false, "{}", e);
                log::error!("{}; falling back to '{}'", e, ShapeKind::default());
                ShapeKind::default()
            }
        }
    }

    /// The next kind in gallery order, wrapping around.
    pub fn next(self) -> ShapeKind {
        let i = self.position();
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// The previous kind in gallery order, wrapping around.
    pub fn prev(self) -> ShapeKind {
        let i = self.position();
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|&k| k == self).unwrap_or(0)
    }

    /// Whether a change of `old → new` parameters needs a resample of this shape.
    ///
    /// Only count-affecting fields trigger a resample; everything else is
    /// read live by `advance` or `refit`.
    pub fn needs_resample(self, old: &ParameterSet, new: &ParameterSet) -> bool {
        match self {
            ShapeKind::Oblate | ShapeKind::LinesSphere | ShapeKind::Jellyfish => {
                old.density != new.density
            }
            ShapeKind::Hypocycloid => {
                old.density != new.density || old.spiral1.rotations != new.spiral1.rotations
            }
            ShapeKind::Epicycloid => {
                old.density != new.density || old.spiral2.rotations != new.spiral2.rotations
            }
            ShapeKind::FibonacciSphere
            | ShapeKind::FibonacciDisc
            | ShapeKind::BiconvexDisc
            | ShapeKind::BiconcaveDisc
            | ShapeKind::Torus
            | ShapeKind::PentagonalTorus
            | ShapeKind::MultiSphere25
            | ShapeKind::MultiSphere10 => old.fibonacci_density != new.fibonacci_density,
            ShapeKind::SphereLines => {
                old.latitude_lines != new.latitude_lines
                    || old.longitude_lines != new.longitude_lines
            }
            ShapeKind::Puncture
            | ShapeKind::Wave
            | ShapeKind::Stretch
            | ShapeKind::Cube
            | ShapeKind::Icosahedron
            | ShapeKind::Sphere
            | ShapeKind::ImmuneSystem => false,
        }
    }

    /// The sample/advance pair implementing this kind.
    pub fn strategy(self) -> &'static ShapeStrategy {
        match self {
            ShapeKind::Puncture => &shapes::grid::PUNCTURE,
            ShapeKind::Wave => &shapes::grid::WAVE,
            ShapeKind::Stretch => &shapes::grid::STRETCH,
            ShapeKind::Cube => &shapes::solids::CUBE,
            ShapeKind::Icosahedron => &shapes::solids::ICOSAHEDRON,
            ShapeKind::Oblate => &shapes::spheres::OBLATE,
            ShapeKind::Sphere => &shapes::spheres::CLING,
            ShapeKind::FibonacciSphere => &shapes::spheres::FIBONACCI,
            ShapeKind::FibonacciDisc => &shapes::discs::FIBONACCI,
            ShapeKind::BiconvexDisc => &shapes::discs::BICONVEX,
            ShapeKind::BiconcaveDisc => &shapes::discs::BICONCAVE,
            ShapeKind::Torus => &shapes::torus::ROUND,
            ShapeKind::PentagonalTorus => &shapes::torus::PENTAGONAL,
            ShapeKind::Hypocycloid => &shapes::spirograph::HYPOCYCLOID,
            ShapeKind::Epicycloid => &shapes::spirograph::EPICYCLOID,
            ShapeKind::MultiSphere25 => &shapes::nested::MULTI_25,
            ShapeKind::MultiSphere10 => &shapes::nested::MULTI_10,
            ShapeKind::LinesSphere => &shapes::lines_sphere::LINES_SPHERE,
            ShapeKind::Jellyfish => &shapes::jellyfish::JELLYFISH,
            ShapeKind::SphereLines => &shapes::wireframe::SPHERE_LINES,
            ShapeKind::ImmuneSystem => &shapes::immune::IMMUNE,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        if let Some(kind) = ShapeKind::ALL.iter().copied().find(|k| k.id() == id) {
            return Ok(kind);
        }
        match id {
            "flexibility" => Ok(ShapeKind::Wave),
            "cling" => Ok(ShapeKind::Sphere),
            "retention" => Ok(ShapeKind::Cube),
            "stability" => Ok(ShapeKind::Icosahedron),
            "organic" => Ok(ShapeKind::Oblate),
            "jellyfish_medusae" => Ok(ShapeKind::Jellyfish),
            _ => Err(ShapeError::Unknown(id.to_string())),
        }
    }
}

impl serde::Serialize for ShapeKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> serde::Deserialize<'de> for ShapeKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        id.parse().map_err(serde::de::Error::custom)
    }
}

/// Inputs to a sampling pass.
#[derive(Debug, Clone, Copy)]
pub struct SampleContext<'a> {
    pub params: &'a ParameterSet,
    /// Seed for shapes that scatter particles randomly.
    pub seed: u64,
}

/// Inputs to one deformation tick.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Simulated seconds from the animation clock.
    pub time: f32,
    /// Simulated seconds scaled by the phase rate.
    pub phase: f32,
    pub params: &'a ParameterSet,
    /// Whether the shape is the foreground demo.
    pub active: bool,
    /// Undulation factor, `speed / 10`.
    pub factor: f32,
}

impl<'a> Frame<'a> {
    pub fn new(clock: &AnimationClock, params: &'a ParameterSet, active: bool) -> Self {
        Self {
            time: clock.time(),
            phase: clock.phase(),
            params,
            active,
            factor: params.undulation(),
        }
    }

    /// Phase time slowed by the undulation factor's tenfold scale.
    ///
    /// Laws written against `time × factor` use this, since the clock has
    /// already integrated the speed.
    #[inline]
    pub fn slow(&self) -> f32 {
        self.phase * 0.1
    }
}

pub type SampleFn = fn(&mut SampleWriter<'_>, &SampleContext<'_>);
pub type AdvanceFn = fn(&mut [Particle], &Frame<'_>);
pub type RefitFn = fn(&mut [Particle], &ParameterSet);
pub type ColorFn = fn(&Particle, &Frame<'_>) -> Vec3;

/// The functions implementing one shape kind.
pub struct ShapeStrategy {
    pub sample: SampleFn,
    pub advance: AdvanceFn,
    /// Re-derives rest positions from live parameters; runs before `advance`.
    pub refit: Option<RefitFn>,
    /// Per-particle color; `None` uses the shared amber gradient.
    pub color: Option<ColorFn>,
}

/// Fill `buffer` with the resting particles of `kind`.
///
/// Rows past the returned active count are blanked. Counts beyond capacity
/// are truncated with a warning.
pub fn sample(kind: ShapeKind, buffer: &mut ParticleBuffer, params: &ParameterSet, seed: u64) -> usize {
    let ctx = SampleContext { params, seed };
    let mut writer = SampleWriter::new(buffer);
    (kind.strategy().sample)(&mut writer, &ctx);
    let count = writer.finish(kind.id());
    log::debug!("sampled '{}': {} active of {}", kind, count, buffer.capacity());
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_roundtrip() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.id().parse::<ShapeKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.id());
        }
    }

    #[test]
    fn test_all_is_exhaustive_and_unique() {
        let mut ids: Vec<_> = ShapeKind::ALL.iter().map(|k| k.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), ShapeKind::ALL.len());
    }

    #[test]
    fn test_aliases() {
        assert_eq!("flexibility".parse(), Ok(ShapeKind::Wave));
        assert_eq!("cling".parse(), Ok(ShapeKind::Sphere));
        assert_eq!("jellyfish_medusae".parse(), Ok(ShapeKind::Jellyfish));
    }

    #[test]
    fn test_unknown_is_error() {
        assert_eq!(
            "eclipse".parse::<ShapeKind>(),
            Err(ShapeError::Unknown("eclipse".into()))
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "Unknown shape kind")]
    fn test_resolve_unknown_panics_in_debug() {
        ShapeKind::resolve("nope");
    }

    #[test]
    fn test_cycle() {
        let mut kind = ShapeKind::Puncture;
        for _ in 0..ShapeKind::ALL.len() {
            kind = kind.next();
        }
        assert_eq!(kind, ShapeKind::Puncture);
        assert_eq!(ShapeKind::Puncture.prev(), ShapeKind::SphereLines);
    }

    #[test]
    fn test_live_params_do_not_resample() {
        let old = ParameterSet::default();
        let new = old
            .with_speed(7.0)
            .with_color(0.1, 0.2, 0.3)
            .with_line_length(2.0)
            .with_rotation_speed(2.5);
        for kind in ShapeKind::ALL {
            assert!(!kind.needs_resample(&old, &new), "{}", kind);
        }
    }

    #[test]
    fn test_density_resamples() {
        let old = ParameterSet::default();
        assert!(ShapeKind::Oblate.needs_resample(&old, &old.with_density(2.0)));
        assert!(ShapeKind::Torus.needs_resample(&old, &old.with_fibonacci_density(2.0)));
        assert!(!ShapeKind::Torus.needs_resample(&old, &old.with_density(2.0)));
    }
}
