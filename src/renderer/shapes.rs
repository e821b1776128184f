//! Board geometry: grid-to-pixel mapping and cell quads

use glam::Vec2;

use super::vertex::{Palette, Vertex};
use crate::sim::{Cell, GameState};

/// Pixel layout of a square board. Pixel space has its origin at the top
/// left with y growing downward, matching grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub grid_size: u32,
    pub cell_px: f32,
    pub gap_px: f32,
}

impl BoardLayout {
    pub fn new(grid_size: u32, cell_px: f32, gap_px: f32) -> Self {
        Self {
            grid_size,
            cell_px,
            gap_px,
        }
    }

    /// Side length of the whole board, gaps included
    pub fn board_px(&self) -> f32 {
        let n = self.grid_size as f32;
        n * self.cell_px + (n + 1.0) * self.gap_px
    }

    /// Top-left pixel of a cell
    pub fn cell_origin(&self, cell: Cell) -> Vec2 {
        let pitch = self.cell_px + self.gap_px;
        Vec2::new(
            self.gap_px + cell.x as f32 * pitch,
            self.gap_px + cell.y as f32 * pitch,
        )
    }
}

/// Two triangles covering an axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Every quad for one frame: the grid-line backdrop, then one quad per cell.
///
/// The board is small and fixed, so it is redrawn whole from a single
/// occupancy pass.
pub fn board_vertices(state: &GameState, layout: &BoardLayout, palette: &Palette) -> Vec<Vertex> {
    let n = state.grid_size as usize;
    let mut vertices = Vec::with_capacity((n * n + 1) * 6);

    let board = layout.board_px();
    vertices.extend(rect(Vec2::ZERO, Vec2::splat(board), palette.grid_line));

    let size = Vec2::splat(layout.cell_px);
    for (i, kind) in state.occupancy().into_iter().enumerate() {
        let cell = Cell::new((i % n) as i32, (i / n) as i32);
        vertices.extend(rect(layout.cell_origin(cell), size, palette.color(kind)));
    }

    vertices
}
