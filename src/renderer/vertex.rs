//! Vertex types for 2D rendering
//!
//! Scene geometry is built in arena pixels (origin top-left, y down) and only
//! mapped to clip space by the pipeline right before upload, so the same
//! vertices serve any canvas size.

use bytemuck::{Pod, Zeroable};

/// 2D vertex in arena pixels with a straight-alpha RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Same color at another position (pixel to NDC mapping)
    pub const fn with_position(self, position: [f32; 2]) -> Self {
        Self {
            position,
            color: self.color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Fixed scene colors
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.06, 0.07, 0.12, 1.0];
    pub const SHINE: [f32; 4] = [1.0, 1.0, 1.0, 0.3];
    pub const SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.35];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_position_keeps_color() {
        let v = Vertex::new(120.0, 80.0, [0.2, 0.4, 0.6, 0.8]);
        let mapped = v.with_position([-0.5, 0.25]);
        assert_eq!(mapped.position, [-0.5, 0.25]);
        assert_eq!(mapped.color, v.color);
    }

    #[test]
    fn test_layout_matches_struct() {
        let desc = Vertex::desc();
        assert_eq!(desc.array_stride, 24);
        assert_eq!(desc.attributes[1].offset, 8);
    }
}
