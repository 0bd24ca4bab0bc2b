//! The board representation and its FEN serialization.

use crate::constants::{
    Piece, PieceKind, Player, BACK_RANK, BOARD_COLS, BOARD_ROWS, BOARD_SQUARES, CANNON_COLS,
    SOLDIER_COLS,
};
use crate::r#move::Move;
use crate::square::Square;
use std::fmt;
use std::ops::Deref;

/// FEN of the canonical starting layout with Red to move.
pub const STARTING_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1";

/// The 10x9 grid of optional pieces plus the side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; BOARD_SQUARES],
    pub player_to_move: Player,
}

impl Board {
    pub fn empty(player_to_move: Player) -> Self {
        Self {
            cells: [None; BOARD_SQUARES],
            player_to_move,
        }
    }

    /// The canonical starting layout: Black on rows 0-3, Red on rows 6-9.
    pub fn starting_position(player_to_move: Player) -> Self {
        let mut board = Self::empty(player_to_move);
        for player in [Player::Red, Player::Black] {
            let back = player.back_rank() as i8;
            let step = player.forward();
            let cannon_row = (back + 2 * step) as u8;
            let soldier_row = (back + 3 * step) as u8;

            for (col, &kind) in BACK_RANK.iter().enumerate() {
                board.put(back as u8, col as u8, Piece::new(kind, player));
            }
            for col in CANNON_COLS {
                board.put(cannon_row, col, Piece::new(PieceKind::Cannon, player));
            }
            for col in SOLDIER_COLS {
                board.put(soldier_row, col, Piece::new(PieceKind::Soldier, player));
            }
        }
        board
    }

    fn put(&mut self, row: u8, col: u8, piece: Piece) {
        self.cells[row as usize * BOARD_COLS + col as usize] = Some(piece);
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.cells[sq.index()].is_none()
    }

    /// Puts a piece on a square, returning whatever stood there.
    pub fn place(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.cells[sq.index()].replace(piece)
    }

    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()].take()
    }

    /// All occupied squares, top-left to bottom-right.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.map(|piece| (Square::from_index_unchecked(i), piece)))
    }

    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.player == player)
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn find_general(&self, player: Player) -> Option<Square> {
        self.pieces_of(player)
            .find(|(_, piece)| piece.is_general())
            .map(|(sq, _)| sq)
    }

    /// Both generals on one column with nothing between them.
    pub fn generals_facing(&self) -> bool {
        let (Some(red), Some(black)) = (
            self.find_general(Player::Red),
            self.find_general(Player::Black),
        ) else {
            return false;
        };
        if red.col() != black.col() {
            return false;
        }
        let (top, bottom) = if red.row() < black.row() {
            (red.row(), black.row())
        } else {
            (black.row(), red.row())
        };
        ((top + 1)..bottom)
            .all(|row| self.cells[row as usize * BOARD_COLS + red.col() as usize].is_none())
    }

    /// Moves the piece on `mv.from` to `mv.to` and returns the captured piece.
    /// The side to move is left alone.
    pub(crate) fn relocate(&mut self, mv: Move) -> Option<Piece> {
        let moving = self.cells[mv.from.index()].take();
        std::mem::replace(&mut self.cells[mv.to.index()], moving)
    }

    /// Exact inverse of [`Board::relocate`].
    pub(crate) fn restore(&mut self, mv: Move, captured: Option<Piece>) {
        let moving = std::mem::replace(&mut self.cells[mv.to.index()], captured);
        self.cells[mv.from.index()] = moving;
    }

    /// Plays a move and passes the turn. Returns the captured piece.
    pub fn make_move(&mut self, mv: Move) -> Option<Piece> {
        let captured = self.relocate(mv);
        self.player_to_move = self.player_to_move.opponent();
        captured
    }

    pub fn unmake_move(&mut self, mv: Move, captured: Option<Piece>, player_before: Player) {
        self.restore(mv, captured);
        self.player_to_move = player_before;
    }

    /// Plays `mv` on the board for as long as the returned guard lives.
    ///
    /// The move is taken back when the guard is dropped, including during
    /// unwinding, so the board always comes back unchanged.
    pub fn simulate(&mut self, mv: Move) -> SimulatedMove<'_> {
        let captured = self.relocate(mv);
        SimulatedMove {
            board: self,
            mv,
            captured,
        }
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(128);
        for r in 0..BOARD_ROWS {
            let mut empty_count = 0;
            for c in 0..BOARD_COLS {
                match self.cells[r * BOARD_COLS + c] {
                    None => empty_count += 1,
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if r < BOARD_ROWS - 1 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(self.player_to_move.fen_letter());

        // Castling, en passant and clocks have no meaning here; consumers
        // expect the fixed trailer.
        fen.push_str(" - - 0 1");

        fen
    }
}

/// Guard returned by [`Board::simulate`].
pub struct SimulatedMove<'a> {
    board: &'a mut Board,
    mv: Move,
    captured: Option<Piece>,
}

impl SimulatedMove<'_> {
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

impl Deref for SimulatedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for SimulatedMove<'_> {
    fn drop(&mut self) {
        self.board.restore(self.mv, self.captured);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "(Player: {})", self.player_to_move)?;
        writeln!(f, "  +-------------------+")?;
        for r in 0..BOARD_ROWS {
            write!(f, "{} | ", BOARD_ROWS - 1 - r)?;
            for c in 0..BOARD_COLS {
                let ch = self.cells[r * BOARD_COLS + c].map_or('.', Piece::to_fen_char);
                write!(f, "{} ", ch)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +-------------------+")?;
        writeln!(f, "    a b c d e f g h i")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn starting_position_serializes_to_reference_fen() {
        assert_eq!(Board::starting_position(Player::Red).to_fen(), STARTING_FEN);
        assert_eq!(
            Board::starting_position(Player::Black).to_fen(),
            "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR b - - 0 1"
        );
    }

    #[test]
    fn starting_position_has_thirty_two_pieces_and_two_generals() {
        let board = Board::starting_position(Player::Red);
        assert_eq!(board.piece_count(), 32);
        assert_eq!(board.find_general(Player::Red), Some(sq(9, 4)));
        assert_eq!(board.find_general(Player::Black), Some(sq(0, 4)));
        assert!(!board.generals_facing());
    }

    #[test]
    fn empty_ranks_collapse_to_counts() {
        let mut board = Board::empty(Player::Black);
        board.place(sq(0, 4), Piece::new(PieceKind::General, Player::Black));
        board.place(sq(9, 3), Piece::new(PieceKind::General, Player::Red));
        board.place(sq(4, 8), Piece::new(PieceKind::Soldier, Player::Red));
        assert_eq!(board.to_fen(), "4k4/9/9/9/8P/9/9/9/9/3K5 b - - 0 1");
    }

    #[test]
    fn facing_requires_open_file() {
        let mut board = Board::empty(Player::Red);
        board.place(sq(0, 4), Piece::new(PieceKind::General, Player::Black));
        board.place(sq(9, 4), Piece::new(PieceKind::General, Player::Red));
        assert!(board.generals_facing());

        board.place(sq(5, 4), Piece::new(PieceKind::Horse, Player::Black));
        assert!(!board.generals_facing());

        board.remove(sq(5, 4));
        board.remove(sq(9, 4));
        board.place(sq(9, 3), Piece::new(PieceKind::General, Player::Red));
        assert!(!board.generals_facing());
    }

    #[test]
    fn make_and_unmake_restore_the_board() {
        let mut board = Board::starting_position(Player::Red);
        let original = board.clone();
        // Red cannon h2 takes the black horse on h9.
        let mv = Move::new(sq(7, 7), sq(0, 7));
        let captured = board.make_move(mv);

        assert_eq!(captured, Some(Piece::new(PieceKind::Horse, Player::Black)));
        assert_eq!(board.player_to_move, Player::Black);
        assert_eq!(board.piece_count(), 31);

        board.unmake_move(mv, captured, Player::Red);
        assert_eq!(board, original);
    }

    #[test]
    fn simulation_is_reverted_when_the_guard_drops() {
        let mut board = Board::starting_position(Player::Red);
        let original = board.clone();
        let mv = Move::new(sq(7, 1), sq(0, 1));
        {
            let simulated = board.simulate(mv);
            assert_eq!(simulated.captured().map(|p| p.kind), Some(PieceKind::Horse));
            assert!(simulated.is_empty_at(sq(7, 1)));
            assert_eq!(simulated.player_to_move, Player::Red);
        }
        assert_eq!(board, original);
    }

    #[test]
    fn simulation_is_reverted_on_unwind() {
        let mut board = Board::starting_position(Player::Red);
        let original = board.clone();
        let mv = Move::new(sq(6, 4), sq(5, 4));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _simulated = board.simulate(mv);
            panic!("abort mid-simulation");
        }));
        assert!(result.is_err());
        assert_eq!(board, original);
    }

    #[test]
    fn display_labels_ranks_from_the_bottom() {
        let text = Board::starting_position(Player::Red).to_string();
        assert!(text.contains("9 | r n b a k a b n r |"));
        assert!(text.contains("0 | R N B A K A B N R |"));
        assert!(text.ends_with("    a b c d e f g h i\n"));
    }
}
