//! Constants for grid geometry, scoring, and the presentation layer.
//!
//! The grid is fixed at 3x3. Cells are addressed as `(row, col)` pairs in
//! row-major order, both zero-indexed.

// =============================================================================
// Grid Geometry
// =============================================================================

/// Grid size (NxN).
pub const N: usize = 3;

/// Total number of cells on the grid.
pub const CELLS: usize = N * N;

/// The eight winning lines, in evaluation order: rows, columns, diagonals.
pub const LINES: [[(usize, usize); 3]; 8] = [
    // rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(2, 0), (1, 1), (0, 2)],
];

// =============================================================================
// Search Scores
// =============================================================================

/// Score of a terminal position won by player A (the maximizing side).
pub const SCORE_A_WINS: i8 = 1;

/// Score of a terminal position won by player B (the minimizing side).
pub const SCORE_B_WINS: i8 = -1;

/// Score of a drawn position.
pub const SCORE_DRAW: i8 = 0;

// =============================================================================
// Presentation Geometry
// =============================================================================

/// Window width and height in pixels.
pub const WIDTH: u32 = 600;

/// Side length of one cell in pixels.
pub const CELL_SIZE: u32 = WIDTH / N as u32;
