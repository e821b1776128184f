//! WebGPU rendering module
//!
//! Draws the board as flat-colored quads, one per cell.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, board_to_ndc};
pub use shapes::{BoardLayout, board_vertices};
pub use vertex::{Palette, Vertex};
