use bytemuck::{Pod, Zeroable};
use particle_forms::GpuParticle;

pub const SHADER_SOURCE: &str = include_str!("shader.wgsl");

/// World units of quad half-width per unit of particle size.
pub const POINT_SCALE: f32 = 0.5;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub time: f32,
    pub point_scale: f32,
    pub _padding: [f32; 2],
}

const PARTICLE_ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32,
    2 => Float32x3,
];

/// One instance per particle row: position, size, color.
pub fn particle_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<GpuParticle>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &PARTICLE_ATTRIBUTES,
    }
}
