//! Fixed-capacity particle storage.
//!
//! The buffer is allocated once, sized for the densest shape, and refilled in
//! place on every resample. Rows `0..len` form the active shape; every row at
//! or past `len` is kept at `size == 0` so the renderer draws it as a
//! degenerate point.
//!
//! ```ignore
//! let mut buffer = ParticleBuffer::with_capacity(DEFAULT_CAPACITY);
//! let mut writer = SampleWriter::new(&mut buffer);
//! writer.push(Vec3::ZERO, 12.0, ParticleMeta::default());
//! let count = writer.finish("demo");
//! assert_eq!(buffer.len(), count);
//! ```

use crate::Vec3;
use bytemuck::{Pod, Zeroable};

/// Capacity large enough for every shape at density 1.0.
///
/// The densest case is the lines sphere: nine shells of 1500 segments, two
/// rows per segment.
pub const DEFAULT_CAPACITY: usize = 27_000;

/// Structural role of a particle inside its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Part {
    /// Single-surface shapes (grids, solids, discs, tori, curves).
    #[default]
    Surface,
    /// Enclosing sphere of a nested-sphere shape.
    Outer,
    /// One of the nested spheres.
    Inner,
    /// Jellyfish dome ring photophore.
    Concentric,
    /// Jellyfish radial dome line.
    Reinforcement,
    /// Jellyfish manubrium.
    Trunk,
    /// Endpoint of a lines-sphere segment.
    Segment,
    /// Point on a latitude circle.
    Latitude,
    /// Point on a longitude meridian.
    Longitude,
    /// Immune cell.
    Cell,
}

/// Per-particle data cached at sampling time for the deformation laws.
///
/// The meaning of each slot depends on the shape: `group` is a ring, shell,
/// sphere or line index, `index` the position within it, `param` a curve
/// parameter or radius ratio, `anchor` a centre or direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParticleMeta {
    pub part: Part,
    pub group: u32,
    pub index: u32,
    pub phase: f32,
    pub param: f32,
    pub intensity: f32,
    pub tint: Vec3,
    pub anchor: Vec3,
}

impl ParticleMeta {
    pub fn new(part: Part) -> Self {
        Self { part, ..Default::default() }
    }

    pub fn group(mut self, group: u32) -> Self {
        self.group = group;
        self
    }

    pub fn index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    pub fn phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    pub fn param(mut self, param: f32) -> Self {
        self.param = param;
        self
    }

    pub fn anchor(mut self, anchor: Vec3) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn tint(mut self, tint: Vec3, intensity: f32) -> Self {
        self.tint = tint;
        self.intensity = intensity;
        self
    }
}

/// One row of the particle buffer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    /// Sampled resting position.
    pub rest: Vec3,
    /// Deformed position for the current tick.
    pub position: Vec3,
    /// Rendered size; `0` means invisible.
    pub size: f32,
    /// Size assigned at sampling time.
    pub base_size: f32,
    pub color: Vec3,
    pub meta: ParticleMeta,
}

impl Particle {
    /// A particle at rest at `position`.
    pub fn at_rest(position: Vec3, size: f32, meta: ParticleMeta) -> Self {
        Self {
            rest: position,
            position,
            size,
            base_size: size,
            color: Vec3::ZERO,
            meta,
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.size > 0.0
    }
}

/// Index-addressed storage with a fixed capacity and an active prefix.
///
/// Rows are never removed; shrinking `len` leaves stale rows in place to be
/// blanked by [`Arena::clear_tail`] or overwritten on the next fill.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    rows: Vec<T>,
    len: usize,
}

impl<T: Clone + Default> Arena<T> {
    /// Allocate `capacity` default rows with no active prefix.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: vec![T::default(); capacity],
            len: 0,
        }
    }

    /// Reset every row to its default and mark the arena empty.
    pub fn reset(&mut self) {
        self.rows.fill(T::default());
        self.len = 0;
    }

    /// Reset rows `len..capacity` to their default.
    pub fn clear_tail(&mut self) {
        let len = self.len;
        self.rows[len..].fill(T::default());
    }
}

impl<T> Arena<T> {
    #[inline]
    pub fn capacity(&self) -> usize {
        self.rows.len()
    }

    /// Number of active rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set the active count, clamped to capacity. Returns the applied count.
    pub fn set_len(&mut self, len: usize) -> usize {
        self.len = len.min(self.rows.len());
        self.len
    }

    /// The active prefix.
    #[inline]
    pub fn active(&self) -> &[T] {
        &self.rows[..self.len]
    }

    #[inline]
    pub fn active_mut(&mut self) -> &mut [T] {
        &mut self.rows[..self.len]
    }

    /// Rows past the active prefix.
    #[inline]
    pub fn inactive_mut(&mut self) -> &mut [T] {
        &mut self.rows[self.len..]
    }

    /// Every row, active or not.
    #[inline]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.rows.get(index)
    }
}

/// The particle arena fed to the renderer.
pub type ParticleBuffer = Arena<Particle>;

impl Arena<Particle> {
    /// Current positions of every row.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.rows.iter().map(|p| p.position)
    }

    /// Rendered sizes of every row.
    pub fn sizes(&self) -> impl Iterator<Item = f32> + '_ {
        self.rows.iter().map(|p| p.size)
    }

    /// Colors of every row.
    pub fn colors(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.rows.iter().map(|p| p.color)
    }

    /// Force every row past the active prefix to be invisible.
    pub fn hide_inactive(&mut self) {
        for p in self.inactive_mut() {
            p.size = 0.0;
            p.color = Vec3::ZERO;
        }
    }

    /// Write GPU rows for upload into `out`, reusing its allocation.
    pub fn write_gpu_rows(&self, out: &mut Vec<GpuParticle>) {
        out.clear();
        out.extend(self.rows.iter().map(GpuParticle::from));
    }
}

/// GPU layout of one particle: position, size, color.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuParticle {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    pub _padding: f32,
}

impl From<&Particle> for GpuParticle {
    fn from(p: &Particle) -> Self {
        Self {
            position: p.position.to_array(),
            size: p.size,
            color: p.color.to_array(),
            _padding: 0.0,
        }
    }
}

/// Sequential writer used by samplers to fill the buffer.
///
/// Rows beyond capacity are counted but dropped; [`finish`](Self::finish)
/// sets the active count, blanks the tail, and logs one warning if anything
/// was truncated.
pub struct SampleWriter<'a> {
    buffer: &'a mut ParticleBuffer,
    cursor: usize,
    dropped: usize,
}

impl<'a> SampleWriter<'a> {
    pub fn new(buffer: &'a mut ParticleBuffer) -> Self {
        Self {
            buffer,
            cursor: 0,
            dropped: 0,
        }
    }

    /// Rows still available.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.capacity() - self.cursor
    }

    /// Rows written so far.
    #[inline]
    pub fn written(&self) -> usize {
        self.cursor
    }

    /// Append one particle at rest. Returns `false` if it was dropped.
    pub fn push(&mut self, rest: Vec3, size: f32, meta: ParticleMeta) -> bool {
        if self.cursor >= self.buffer.capacity() {
            self.dropped += 1;
            return false;
        }
        self.buffer.rows[self.cursor] = Particle::at_rest(rest, size, meta);
        self.cursor += 1;
        true
    }

    /// Append both endpoints of a segment, or neither.
    pub fn push_segment(&mut self, a: Vec3, b: Vec3, size: f32, meta: ParticleMeta) -> bool {
        if self.remaining() < 2 {
            self.dropped += 2;
            return false;
        }
        self.push(a, size, meta);
        self.push(b, size, meta.index(meta.index + 1));
        true
    }

    /// Rows requested past capacity so far.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Record rows that were never generated because they would not fit.
    pub fn skip(&mut self, count: usize) {
        self.dropped += count;
    }

    /// Commit the written rows as the active prefix.
    pub fn finish(self, label: &str) -> usize {
        if self.dropped > 0 {
            log::warn!(
                "{}: {} particles requested, capacity {}; truncated {}",
                label,
                self.cursor + self.dropped,
                self.buffer.capacity(),
                self.dropped
            );
        }
        self.buffer.set_len(self.cursor);
        self.buffer.clear_tail();
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_starts_empty() {
        let arena: ParticleBuffer = Arena::with_capacity(16);
        assert_eq!(arena.capacity(), 16);
        assert_eq!(arena.len(), 0);
        assert!(arena.is_empty());
        assert!(arena.rows().iter().all(|p| p.size == 0.0));
    }

    #[test]
    fn test_set_len_clamps() {
        let mut arena: Arena<u32> = Arena::with_capacity(4);
        assert_eq!(arena.set_len(10), 4);
        assert_eq!(arena.active().len(), 4);
    }

    #[test]
    fn test_writer_truncates() {
        let mut buffer = ParticleBuffer::with_capacity(3);
        let mut writer = SampleWriter::new(&mut buffer);
        for i in 0..5 {
            writer.push(Vec3::splat(i as f32), 1.0, ParticleMeta::default());
        }
        assert_eq!(writer.finish("test"), 3);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.active()[2].rest, Vec3::splat(2.0));
    }

    #[test]
    fn test_writer_keeps_segments_whole() {
        let mut buffer = ParticleBuffer::with_capacity(3);
        let mut writer = SampleWriter::new(&mut buffer);
        assert!(writer.push_segment(Vec3::X, Vec3::Y, 1.0, ParticleMeta::default()));
        assert!(!writer.push_segment(Vec3::X, Vec3::Y, 1.0, ParticleMeta::default()));
        assert_eq!(writer.finish("test"), 2);
    }

    #[test]
    fn test_refill_blanks_stale_rows() {
        let mut buffer = ParticleBuffer::with_capacity(8);
        let mut writer = SampleWriter::new(&mut buffer);
        for _ in 0..8 {
            writer.push(Vec3::ONE, 5.0, ParticleMeta::default());
        }
        writer.finish("dense");

        let mut writer = SampleWriter::new(&mut buffer);
        writer.push(Vec3::ONE, 5.0, ParticleMeta::default());
        writer.finish("sparse");

        assert_eq!(buffer.len(), 1);
        assert!(buffer.rows()[1..].iter().all(|p| p.size == 0.0));
    }

    #[test]
    fn test_gpu_particle_layout() {
        assert_eq!(std::mem::size_of::<GpuParticle>(), 32);

        let p = Particle::at_rest(Vec3::new(1.0, 2.0, 3.0), 4.0, ParticleMeta::default());
        let gpu = GpuParticle::from(&p);
        assert_eq!(gpu.position, [1.0, 2.0, 3.0]);
        assert_eq!(gpu.size, 4.0);
    }
}
