//! Defines the representation of a move.

use crate::square::Square;
use std::fmt;

/// A single move from one square to another.
///
/// Whether a move captures is a property of the position it is played in,
/// so it is not stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// Filler value for unused slots; never produced by move generation.
    pub(crate) const NULL: Move = Move {
        from: Square::from_index_unchecked(0),
        to: Square::from_index_unchecked(0),
    };

    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Returns the move in external notation, e.g. `h2e2`.
    pub fn to_notation(&self) -> String {
        crate::notation::move_to_notation(*self)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}
