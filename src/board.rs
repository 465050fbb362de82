//! Board state: cell occupancy, win/draw detection and legal moves.
//!
//! The board is a small `Copy` value, so the search duplicates it freely
//! instead of undoing moves.

use std::fmt;

use crate::constants::{CELLS, LINES, N};
use crate::error::IllegalMove;

/// One of the two sides. `A` always moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Mark drawn for this side: `X` for A, `O` for B.
    pub fn mark(self) -> char {
        match self {
            Player::A => 'X',
            Player::B => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "A"),
            Player::B => write!(f, "B"),
        }
    }
}

/// A cell holds either nothing or one player's mark.
pub type Cell = Option<Player>;

/// A `(row, col)` coordinate known to lie on the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    row: usize,
    col: usize,
}

impl Move {
    /// Checked constructor; rejects coordinates outside `[0, 3)`.
    pub fn new(row: usize, col: usize) -> Result<Self, IllegalMove> {
        if row >= N || col >= N {
            return Err(IllegalMove::OutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    #[inline]
    pub fn row(self) -> usize {
        self.row
    }

    #[inline]
    pub fn col(self) -> usize {
        self.col
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Result of evaluating a board. Always recomputed from the cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    Win(Player),
    Draw,
}

impl Outcome {
    /// True for a win or a draw.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// The 3x3 grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; N]; N],
    filled: usize,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell contents. Panics if the coordinates are off the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// True iff the cell holds no mark. Panics if the coordinates are off the grid.
    #[inline]
    pub fn is_empty_cell(&self, row: usize, col: usize) -> bool {
        self.cells[row][col].is_none()
    }

    /// Places `player`'s mark. Does not check occupancy; callers must.
    pub fn place_mark(&mut self, row: usize, col: usize, player: Player) {
        self.cells[row][col] = Some(player);
        self.filled += 1;
    }

    /// Empty cells in row-major order. The order is part of the contract:
    /// the search keeps the first best move it sees.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(CELLS - self.filled);
        for row in 0..N {
            for col in 0..N {
                if self.is_empty_cell(row, col) {
                    moves.push(Move { row, col });
                }
            }
        }
        moves
    }

    /// Number of marks on the board.
    #[inline]
    pub fn filled_count(&self) -> usize {
        self.filled
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.filled == CELLS
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[[Cell; N]; N] {
        &self.cells
    }

    /// Checks rows, then columns, then diagonals, and reports the first
    /// completed line. Falls back to `Draw` on a full board.
    pub fn evaluate_outcome(&self) -> Outcome {
        for line in &LINES {
            let [a, b, c] = *line;
            if let Some(p) = self.get(a.0, a.1) {
                if self.get(b.0, b.1) == Some(p) && self.get(c.0, c.1) == Some(p) {
                    return Outcome::Win(p);
                }
            }
        }
        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for (col, cell) in row.iter().enumerate() {
                let ch = match cell {
                    Some(p) => p.mark(),
                    None => '.',
                };
                if col + 1 < N {
                    write!(f, "{ch} ")?;
                } else {
                    write!(f, "{ch}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
