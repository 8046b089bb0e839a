//! Live, user-tunable parameters.
//!
//! [`ParameterSet`] is the single value the control surface hands to the
//! sampler and the deformation engine. It is plain data: every consumer
//! assumes it has been passed through [`ParameterSet::sanitized`] first, which
//! clamps each field into its documented range and replaces non-finite input
//! with the field default.
//!
//! | Field | Range | Default |
//! |-------|-------|---------|
//! | `speed` | 0 – 10 | 1.0 |
//! | `fibonacci_density` | 0.1 – 3.0 | 1.0 |
//! | `density` | 0.1 – 3.0 | 1.0 |
//! | `rotation_speed` | 0 – 3 | 1.0 |
//! | `line_length` | 0.1 – 3 | 1.0 |
//! | `hue`, `saturation`, `brightness` | 0 – 1 | 0.5, 0.8, 0.7 |
//! | `latitude_lines` | 1 – 30 | 10 |
//! | `longitude_lines` | 3 – 50 | 16 |
//!
//! Parameters serialize with camelCase keys and missing keys fall back to
//! defaults, so partial JSON is accepted:
//!
//! ```ignore
//! let params: ParameterSet = serde_json::from_str(r#"{"speed": 4.0}"#)?;
//! let params = params.sanitized();
//! ```

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const SPEED_RANGE: RangeInclusive<f32> = 0.0..=10.0;
pub const DENSITY_RANGE: RangeInclusive<f32> = 0.1..=3.0;
pub const ROTATION_RANGE: RangeInclusive<f32> = 0.0..=3.0;
pub const LINE_LENGTH_RANGE: RangeInclusive<f32> = 0.1..=3.0;
pub const UNIT_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const LATITUDE_RANGE: RangeInclusive<u32> = 1..=30;
pub const LONGITUDE_RANGE: RangeInclusive<u32> = 3..=50;

/// Coefficients of a spirograph curve.
///
/// `big_r` is the fixed circle, `r` the rolling circle, `d` the pen offset
/// from the rolling circle's centre. `rotations` is the number of full turns
/// of the parameter, and with the density it decides the point count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiralParams {
    #[serde(rename = "R")]
    pub big_r: u32,
    pub r: u32,
    pub d: u32,
    pub rotations: u32,
}

impl SpiralParams {
    /// Defaults of the inner-rolling (hypocycloid) spiral.
    pub const HYPOCYCLOID: Self = Self { big_r: 120, r: 30, d: 50, rotations: 8 };
    /// Defaults of the outer-rolling (epicycloid) spiral.
    pub const EPICYCLOID: Self = Self { big_r: 80, r: 25, d: 40, rotations: 6 };

    /// Clamp each coefficient into its range.
    pub fn sanitized(self) -> Self {
        Self {
            big_r: self.big_r.clamp(1, 500),
            r: self.r.clamp(1, 200),
            d: self.d.clamp(1, 300),
            rotations: self.rotations.clamp(1, 100),
        }
    }
}

/// Sliders of the immune-cell field.
///
/// All values are normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImmuneParams {
    /// Drives the trail fade and outline intensity.
    pub inflammaging: f32,
    /// Cell radius multiplier.
    pub dot_size: f32,
    /// Outline intensity.
    pub protection_score: f32,
    /// Base cell radius.
    pub immune_age: f32,
    /// Oscillation amplitude and cell padding.
    pub cellular_damage: f32,
}

impl Default for ImmuneParams {
    fn default() -> Self {
        Self {
            inflammaging: 0.3,
            dot_size: 0.5,
            protection_score: 0.8,
            immune_age: 0.5,
            cellular_damage: 0.4,
        }
    }
}

impl ImmuneParams {
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            inflammaging: clamp_or(self.inflammaging, UNIT_RANGE, d.inflammaging),
            dot_size: clamp_or(self.dot_size, UNIT_RANGE, d.dot_size),
            protection_score: clamp_or(self.protection_score, UNIT_RANGE, d.protection_score),
            immune_age: clamp_or(self.immune_age, UNIT_RANGE, d.immune_age),
            cellular_damage: clamp_or(self.cellular_damage, UNIT_RANGE, d.cellular_damage),
        }
    }

    /// Drawn cell radius: base radius from immune age scaled by dot size.
    pub fn cell_radius(&self) -> f32 {
        (0.5 + self.immune_age * 1.5) * (1.0 + self.dot_size * 2.0)
    }

    /// Outline intensity, capped at 1.
    pub fn intensity(&self) -> f32 {
        (0.15 + self.protection_score * 0.5 + self.inflammaging * 0.2).min(1.0)
    }
}

/// The live parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParameterSet {
    /// Animation speed. Also the clock rate; `0` freezes every shape at rest.
    pub speed: f32,
    /// Density of golden-angle sampled shapes.
    pub fibonacci_density: f32,
    /// Density of the remaining density-scaled shapes.
    pub density: f32,
    pub rotation_speed: f32,
    pub line_length: f32,
    /// Hue shift applied to the base gradient.
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
    pub latitude_lines: u32,
    pub longitude_lines: u32,
    pub spiral1: SpiralParams,
    pub spiral2: SpiralParams,
    pub immune: ImmuneParams,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            speed: 1.0,
            fibonacci_density: 1.0,
            density: 1.0,
            rotation_speed: 1.0,
            line_length: 1.0,
            hue: 0.5,
            saturation: 0.8,
            brightness: 0.7,
            latitude_lines: 10,
            longitude_lines: 16,
            spiral1: SpiralParams::HYPOCYCLOID,
            spiral2: SpiralParams::EPICYCLOID,
            immune: ImmuneParams::default(),
        }
    }
}

impl ParameterSet {
    /// Return a copy with every field inside its documented range.
    ///
    /// NaN and infinities are replaced by the field default; finite values
    /// outside the range are clamped to the nearest bound.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            speed: clamp_or(self.speed, SPEED_RANGE, d.speed),
            fibonacci_density: clamp_or(self.fibonacci_density, DENSITY_RANGE, d.fibonacci_density),
            density: clamp_or(self.density, DENSITY_RANGE, d.density),
            rotation_speed: clamp_or(self.rotation_speed, ROTATION_RANGE, d.rotation_speed),
            line_length: clamp_or(self.line_length, LINE_LENGTH_RANGE, d.line_length),
            hue: clamp_or(self.hue, UNIT_RANGE, d.hue),
            saturation: clamp_or(self.saturation, UNIT_RANGE, d.saturation),
            brightness: clamp_or(self.brightness, UNIT_RANGE, d.brightness),
            latitude_lines: self.latitude_lines.clamp(*LATITUDE_RANGE.start(), *LATITUDE_RANGE.end()),
            longitude_lines: self
                .longitude_lines
                .clamp(*LONGITUDE_RANGE.start(), *LONGITUDE_RANGE.end()),
            spiral1: self.spiral1.sanitized(),
            spiral2: self.spiral2.sanitized(),
            immune: self.immune.sanitized(),
        }
    }

    /// Whether every field is already inside its range.
    pub fn is_sanitized(&self) -> bool {
        *self == self.sanitized()
    }

    /// Normalized undulation amplitude, `speed / 10`.
    #[inline]
    pub fn undulation(&self) -> f32 {
        self.speed / 10.0
    }

    // ========== Builder-style setters ==========

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_fibonacci_density(mut self, density: f32) -> Self {
        self.fibonacci_density = density;
        self
    }

    pub fn with_line_length(mut self, line_length: f32) -> Self {
        self.line_length = line_length;
        self
    }

    pub fn with_rotation_speed(mut self, rotation_speed: f32) -> Self {
        self.rotation_speed = rotation_speed;
        self
    }

    pub fn with_color(mut self, hue: f32, saturation: f32, brightness: f32) -> Self {
        self.hue = hue;
        self.saturation = saturation;
        self.brightness = brightness;
        self
    }

    pub fn with_grid_lines(mut self, latitude: u32, longitude: u32) -> Self {
        self.latitude_lines = latitude;
        self.longitude_lines = longitude;
        self
    }

    pub fn with_spiral1(mut self, spiral: SpiralParams) -> Self {
        self.spiral1 = spiral;
        self
    }

    pub fn with_spiral2(mut self, spiral: SpiralParams) -> Self {
        self.spiral2 = spiral;
        self
    }

    pub fn with_immune(mut self, immune: ImmuneParams) -> Self {
        self.immune = immune;
        self
    }

    /// Short human-readable summary of the non-default settings.
    ///
    /// At most three parts joined by `" | "`, e.g. `"Speed: 2.5 | Density: 1.5"`.
    pub fn summary(&self) -> String {
        let d = Self::default();
        let mut parts = Vec::new();

        if self.speed != d.speed {
            parts.push(format!("Speed: {:.1}", self.speed));
        }
        if self.fibonacci_density != d.fibonacci_density {
            parts.push(format!("Fib Density: {:.1}", self.fibonacci_density));
        }
        if self.density != d.density {
            parts.push(format!("Density: {:.1}", self.density));
        }
        if self.rotation_speed != d.rotation_speed {
            parts.push(format!("Rotation: {:.1}", self.rotation_speed));
        }
        if self.line_length != d.line_length {
            parts.push(format!("Line Length: {:.1}", self.line_length));
        }
        if self.spiral1 != d.spiral1 {
            let s = self.spiral1;
            parts.push(format!("Spiral 1: R{} r{} d{}", s.big_r, s.r, s.d));
        }
        if self.spiral2 != d.spiral2 {
            let s = self.spiral2;
            parts.push(format!("Spiral 2: R{} r{} d{}", s.big_r, s.r, s.d));
        }

        if parts.is_empty() {
            return "Default settings".to_string();
        }
        parts.truncate(3);
        parts.join(" | ")
    }
}

fn clamp_or(value: f32, range: RangeInclusive<f32>, default: f32) -> f32 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sanitized() {
        assert!(ParameterSet::default().is_sanitized());
    }

    #[test]
    fn test_clamps_out_of_range() {
        let p = ParameterSet {
            speed: 25.0,
            density: -1.0,
            hue: 1.5,
            latitude_lines: 0,
            longitude_lines: 500,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(p.speed, 10.0);
        assert_eq!(p.density, 0.1);
        assert_eq!(p.hue, 1.0);
        assert_eq!(p.latitude_lines, 1);
        assert_eq!(p.longitude_lines, 50);
    }

    #[test]
    fn test_nan_falls_back_to_default() {
        let p = ParameterSet::default()
            .with_speed(f32::NAN)
            .with_fibonacci_density(f32::INFINITY)
            .sanitized();
        assert_eq!(p.speed, 1.0);
        assert_eq!(p.fibonacci_density, 1.0);
    }

    #[test]
    fn test_spiral_clamp() {
        let s = SpiralParams { big_r: 0, r: 900, d: 0, rotations: 1000 }.sanitized();
        assert_eq!(s, SpiralParams { big_r: 1, r: 200, d: 1, rotations: 100 });
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let p: ParameterSet = serde_json::from_str(r#"{"speed": 4.0, "spiral1": {"R": 100, "r": 20, "d": 30, "rotations": 5}}"#).unwrap();
        assert_eq!(p.speed, 4.0);
        assert_eq!(p.density, 1.0);
        assert_eq!(p.spiral1.big_r, 100);
        assert_eq!(p.spiral2, SpiralParams::EPICYCLOID);
    }

    #[test]
    fn test_summary() {
        assert_eq!(ParameterSet::default().summary(), "Default settings");

        let p = ParameterSet::default()
            .with_speed(2.5)
            .with_density(1.5)
            .with_rotation_speed(2.0)
            .with_line_length(2.0);
        assert_eq!(p.summary(), "Speed: 2.5 | Density: 1.5 | Rotation: 2.0");
    }
}
