//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::CellKind;

/// Simple 2D vertex with position and color
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

/// Colors for board elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    pub grid_line: [f32; 4],
    pub empty: [f32; 4],
    pub obstacle: [f32; 4],
    pub food: [f32; 4],
    pub snake_body: [f32; 4],
    pub snake_head: [f32; 4],
}

impl Palette {
    /// White board, green snake, red food, gray walls
    pub const CLASSIC: Palette = Palette {
        background: [0.12, 0.16, 0.22, 1.0],
        grid_line: [0.87, 0.87, 0.87, 1.0],
        empty: [1.0, 1.0, 1.0, 1.0],
        obstacle: [0.5, 0.5, 0.5, 1.0],
        food: [1.0, 0.0, 0.0, 1.0],
        snake_body: [0.0, 0.5, 0.0, 1.0],
        snake_head: [0.0, 0.35, 0.0, 1.0],
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        background: [0.0, 0.0, 0.0, 1.0],
        grid_line: [0.25, 0.25, 0.25, 1.0],
        empty: [0.0, 0.0, 0.0, 1.0],
        obstacle: [1.0, 1.0, 1.0, 1.0],
        food: [1.0, 0.85, 0.0, 1.0],
        snake_body: [0.0, 1.0, 0.4, 1.0],
        snake_head: [0.0, 1.0, 1.0, 1.0],
    };

    pub fn for_settings(high_contrast: bool) -> Self {
        if high_contrast {
            Self::HIGH_CONTRAST
        } else {
            Self::CLASSIC
        }
    }

    pub fn color(&self, kind: CellKind) -> [f32; 4] {
        match kind {
            CellKind::Empty => self.empty,
            CellKind::Obstacle => self.obstacle,
            CellKind::Food => self.food,
            CellKind::SnakeBody => self.snake_body,
            CellKind::SnakeHead => self.snake_head,
        }
    }
}
