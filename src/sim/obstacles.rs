//! Obstacle layout generation
//!
//! Obstacles are short straight walls dropped at random. Segments may cross
//! or overlap each other; duplicate cells are harmless.

use super::cell::Cell;
use super::rng::RandomSource;

/// Shortest wall segment
pub const MIN_SEGMENT_LEN: u32 = 2;
/// Longest wall segment
pub const MAX_SEGMENT_LEN: u32 = 5;

/// Orientation of a wall segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Generate `segment_count` wall segments on a `grid_size` board.
///
/// Every emitted cell lies inside the grid. Callers must ensure
/// `grid_size >= MAX_SEGMENT_LEN`.
pub fn generate_obstacles<R: RandomSource + ?Sized>(
    grid_size: u32,
    segment_count: u32,
    rng: &mut R,
) -> Vec<Cell> {
    debug_assert!(grid_size >= MAX_SEGMENT_LEN);

    let mut cells = Vec::with_capacity((segment_count * MAX_SEGMENT_LEN) as usize);
    for _ in 0..segment_count {
        let orientation = if rng.coin() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let len = MIN_SEGMENT_LEN + rng.below(MAX_SEGMENT_LEN - MIN_SEGMENT_LEN + 1);
        // Row for a horizontal wall, column for a vertical one
        let lane = rng.below(grid_size) as i32;
        let start = rng.below(grid_size - len + 1) as i32;

        log::trace!(
            "Wall {:?} len={} lane={} start={}",
            orientation,
            len,
            lane,
            start
        );

        cells.extend((0..len as i32).map(|i| match orientation {
            Orientation::Horizontal => Cell::new(start + i, lane),
            Orientation::Vertical => Cell::new(lane, start + i),
        }));
    }
    cells
}
