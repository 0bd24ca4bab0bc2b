//! Filters pseudo-legal moves down to legal ones.

use crate::board::Board;
use crate::move_gen::{generate_pseudo_legal_moves, is_in_check};
use crate::movelist::MoveList;
use crate::r#move::Move;

/// Whether `mv`, played by the side to move, leaves a legal position:
/// the generals are not facing and the mover is not in check.
pub fn is_move_legal(board: &mut Board, mv: Move) -> bool {
    let mover = board.player_to_move;
    let simulated = board.simulate(mv);
    !simulated.generals_facing() && !is_in_check(&simulated, mover)
}

/// All legal moves for the side to move.
///
/// The board is borrowed mutably for the simulations but is bit-identical
/// to its input when this returns.
pub fn generate_legal_moves(board: &mut Board) -> MoveList {
    let pseudo_legal = generate_pseudo_legal_moves(board, board.player_to_move);
    let mut legal = MoveList::new();
    for &mv in &pseudo_legal {
        if is_move_legal(board, mv) {
            legal.add(mv);
        }
    }
    log::trace!(
        "{} legal of {} pseudo-legal moves for {}",
        legal.len(),
        pseudo_legal.len(),
        board.player_to_move
    );
    legal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{Piece, PieceKind, Player};
    use crate::square::Square;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    fn red(kind: PieceKind) -> Piece {
        Piece::new(kind, Player::Red)
    }

    fn black(kind: PieceKind) -> Piece {
        Piece::new(kind, Player::Black)
    }

    #[test]
    fn starting_position_has_forty_four_legal_moves() {
        let mut board = Board::starting_position(Player::Red);
        let before = board.clone();
        assert_eq!(generate_legal_moves(&mut board).len(), 44);
        assert_eq!(board, before);
    }

    #[test]
    fn pinned_piece_cannot_open_the_file() {
        let mut board = Board::empty(Player::Red);
        board.place(sq(9, 4), red(PieceKind::General));
        board.place(sq(0, 3), black(PieceKind::General));
        board.place(sq(6, 4), red(PieceKind::Horse));
        board.place(sq(1, 4), black(PieceKind::Chariot));

        let legal = generate_legal_moves(&mut board);
        assert!(legal.iter().all(|mv| mv.from != sq(6, 4)));
    }

    #[test]
    fn moves_that_expose_facing_generals_are_rejected() {
        let mut board = Board::empty(Player::Red);
        board.place(sq(9, 4), red(PieceKind::General));
        board.place(sq(0, 4), black(PieceKind::General));
        board.place(sq(5, 4), red(PieceKind::Chariot));
        let legal = generate_legal_moves(&mut board);
        // The chariot may slide along the file but never leave it.
        assert!(legal
            .iter()
            .filter(|mv| mv.from == sq(5, 4))
            .all(|mv| mv.to.col() == 4));
        assert!(legal.contains(&Move::new(sq(5, 4), sq(1, 4))));
        assert!(legal.contains(&Move::new(sq(5, 4), sq(8, 4))));
        // The general may step sideways off the file.
        assert!(legal.contains(&Move::new(sq(9, 4), sq(9, 3))));
    }

    #[test]
    fn general_cannot_step_into_an_open_file_facing_the_other() {
        let mut board = Board::empty(Player::Red);
        board.place(sq(9, 3), red(PieceKind::General));
        board.place(sq(0, 4), black(PieceKind::General));
        let legal = generate_legal_moves(&mut board);
        assert!(!legal.contains(&Move::new(sq(9, 3), sq(9, 4))));
        assert!(legal.contains(&Move::new(sq(9, 3), sq(8, 3))));
    }

    #[test]
    fn checked_side_must_resolve_the_check() {
        let mut board = Board::empty(Player::Red);
        board.place(sq(9, 4), red(PieceKind::General));
        board.place(sq(0, 3), black(PieceKind::General));
        board.place(sq(4, 4), black(PieceKind::Chariot));
        board.place(sq(7, 0), red(PieceKind::Chariot));

        for mv in generate_legal_moves(&mut board).iter() {
            let mut after = board.clone();
            after.make_move(*mv);
            assert!(!is_in_check(&after, Player::Red), "{} leaves Red in check", mv);
        }
        let legal = generate_legal_moves(&mut board);
        assert!(legal.contains(&Move::new(sq(7, 0), sq(7, 4))));
        assert!(legal.contains(&Move::new(sq(9, 4), sq(9, 5))));
        assert!(!legal.contains(&Move::new(sq(9, 4), sq(8, 4))));
    }

    #[test]
    fn cannon_capture_depends_on_screen_count() {
        let mut board = Board::empty(Player::Red);
        board.place(sq(9, 3), red(PieceKind::General));
        board.place(sq(0, 5), black(PieceKind::General));
        board.place(sq(7, 1), red(PieceKind::Cannon));
        board.place(sq(0, 1), black(PieceKind::Chariot));
        let capture = Move::new(sq(7, 1), sq(0, 1));

        assert!(!generate_legal_moves(&mut board).contains(&capture));

        board.place(sq(4, 1), black(PieceKind::Soldier));
        assert!(generate_legal_moves(&mut board).contains(&capture));

        board.place(sq(2, 1), red(PieceKind::Horse));
        assert!(!generate_legal_moves(&mut board).contains(&capture));
    }
}
