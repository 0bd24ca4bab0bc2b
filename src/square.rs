//! Board coordinates.
//!
//! Row 0 is Black's back rank at the top, row 9 is Red's back rank at the
//! bottom. Columns run 0-8 left to right and never flip with the side to move.

use crate::constants::{
    Player, BLACK_PALACE_ROWS, BOARD_COLS, BOARD_ROWS, BOARD_SQUARES, PALACE_COLS,
    RED_PALACE_ROWS, RIVER_BLACK_EDGE, RIVER_RED_EDGE,
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square, returning `None` off the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_ROWS && (col as usize) < BOARD_COLS {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub const fn from_index_unchecked(index: usize) -> Self {
        Self {
            row: (index / BOARD_COLS) as u8,
            col: (index % BOARD_COLS) as u8,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_SQUARES {
            Some(Self::from_index_unchecked(index))
        } else {
            None
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    pub fn index(self) -> usize {
        self.row as usize * BOARD_COLS + self.col as usize
    }

    /// Shifts by a row and column delta, or `None` if that leaves the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(row as u8, col as u8)
    }

    /// Every square, top-left to bottom-right.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SQUARES).map(Self::from_index_unchecked)
    }

    pub fn in_palace(self, player: Player) -> bool {
        let rows = match player {
            Player::Red => RED_PALACE_ROWS,
            Player::Black => BLACK_PALACE_ROWS,
        };
        rows.contains(&self.row) && PALACE_COLS.contains(&self.col)
    }

    /// Whether the square lies on `player`'s side of the river.
    pub fn on_own_half(self, player: Player) -> bool {
        match player {
            Player::Red => self.row >= RIVER_RED_EDGE,
            Player::Black => self.row <= RIVER_BLACK_EDGE,
        }
    }

    pub fn has_crossed_river(self, player: Player) -> bool {
        !self.on_own_half(player)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::notation::square_to_notation(*self))
    }
}
