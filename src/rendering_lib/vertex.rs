// src/rendering_lib/vertex.rs

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use crate::animation_lib::surface::Color;

/// One tessellated vertex in screen pixels, as uploaded to the GPU.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn new(point: Vec2, color: Color) -> Self {
        Self { position: point.to_array(), color: color.to_f32_array() }
    }

    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
