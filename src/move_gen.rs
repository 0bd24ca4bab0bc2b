//! Movement rules for every piece kind, plus check detection built on them.
//!
//! Move enumeration and attack detection both go through [`movement_rule`],
//! so there is exactly one definition of how each piece moves.

use crate::board::Board;
use crate::constants::{Piece, PieceKind, Player, BOARD_SQUARES};
use crate::movelist::MoveList;
use crate::r#move::Move;
use crate::square::Square;
use once_cell::sync::Lazy;

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Per-square geometry, independent of occupancy.
pub struct RuleTables {
    pub orthogonal: Vec<Vec<Square>>,
    pub diagonal: Vec<Vec<Square>>,
    /// `(destination, eye)` pairs for elephant jumps.
    pub elephant: Vec<Vec<(Square, Square)>>,
    /// `(destination, leg)` pairs for horse jumps.
    pub horse: Vec<Vec<(Square, Square)>>,
    /// Squares in each orthogonal direction, nearest first. [square][direction]
    pub rays: Vec<[Vec<Square>; 4]>,
}

impl RuleTables {
    fn new() -> Self {
        let mut tables = RuleTables {
            orthogonal: Vec::with_capacity(BOARD_SQUARES),
            diagonal: Vec::with_capacity(BOARD_SQUARES),
            elephant: Vec::with_capacity(BOARD_SQUARES),
            horse: Vec::with_capacity(BOARD_SQUARES),
            rays: Vec::with_capacity(BOARD_SQUARES),
        };

        for sq in Square::all() {
            tables
                .orthogonal
                .push(ORTHOGONAL.iter().filter_map(|&(dr, dc)| sq.offset(dr, dc)).collect());
            tables
                .diagonal
                .push(DIAGONAL.iter().filter_map(|&(dr, dc)| sq.offset(dr, dc)).collect());

            tables.elephant.push(
                DIAGONAL
                    .iter()
                    .filter_map(|&(dr, dc)| Some((sq.offset(2 * dr, 2 * dc)?, sq.offset(dr, dc)?)))
                    .collect(),
            );

            // The leg is the orthogonal neighbour on the long side of the "L".
            let mut horse = Vec::with_capacity(8);
            for &(dr, dc) in &ORTHOGONAL {
                let Some(leg) = sq.offset(dr, dc) else { continue };
                let sides = if dr == 0 { [(-1, 0), (1, 0)] } else { [(0, -1), (0, 1)] };
                for (sr, sc) in sides {
                    if let Some(to) = sq.offset(2 * dr + sr, 2 * dc + sc) {
                        horse.push((to, leg));
                    }
                }
            }
            tables.horse.push(horse);

            tables.rays.push(ORTHOGONAL.map(|(dr, dc)| {
                let mut ray = Vec::new();
                let mut cur = sq;
                while let Some(next) = cur.offset(dr, dc) {
                    ray.push(next);
                    cur = next;
                }
                ray
            }));
        }

        tables
    }
}

// The global static instance of the rule tables, initialized lazily and only once.
pub static RULE_TABLES: Lazy<RuleTables> = Lazy::new(RuleTables::new);

/// Appends the pseudo-legal destinations of one piece.
pub type MovementRule = fn(&Board, Square, Player, &mut MoveList);

/// The single mapping from piece kind to its movement rule.
pub fn movement_rule(kind: PieceKind) -> MovementRule {
    match kind {
        PieceKind::General => general_moves,
        PieceKind::Advisor => advisor_moves,
        PieceKind::Elephant => elephant_moves,
        PieceKind::Horse => horse_moves,
        PieceKind::Chariot => chariot_moves,
        PieceKind::Cannon => cannon_moves,
        PieceKind::Soldier => soldier_moves,
    }
}

/// A destination is enterable if it is empty or holds an enemy piece.
#[inline]
fn can_enter(board: &Board, to: Square, player: Player) -> bool {
    board.piece_at(to).map_or(true, |p| p.player != player)
}

#[inline]
fn push_if_enterable(
    board: &Board,
    from: Square,
    to: Square,
    player: Player,
    moves: &mut MoveList,
) {
    if can_enter(board, to, player) {
        moves.add(Move::new(from, to));
    }
}

fn general_moves(board: &Board, from: Square, player: Player, moves: &mut MoveList) {
    // Facing the other general is handled as an illegal position, never as a capture.
    for &to in &RULE_TABLES.orthogonal[from.index()] {
        if to.in_palace(player) {
            push_if_enterable(board, from, to, player, moves);
        }
    }
}

fn advisor_moves(board: &Board, from: Square, player: Player, moves: &mut MoveList) {
    for &to in &RULE_TABLES.diagonal[from.index()] {
        if to.in_palace(player) {
            push_if_enterable(board, from, to, player, moves);
        }
    }
}

fn elephant_moves(board: &Board, from: Square, player: Player, moves: &mut MoveList) {
    for &(to, eye) in &RULE_TABLES.elephant[from.index()] {
        if to.on_own_half(player) && board.is_empty_at(eye) {
            push_if_enterable(board, from, to, player, moves);
        }
    }
}

fn horse_moves(board: &Board, from: Square, player: Player, moves: &mut MoveList) {
    for &(to, leg) in &RULE_TABLES.horse[from.index()] {
        if board.is_empty_at(leg) {
            push_if_enterable(board, from, to, player, moves);
        }
    }
}

fn chariot_moves(board: &Board, from: Square, player: Player, moves: &mut MoveList) {
    for ray in &RULE_TABLES.rays[from.index()] {
        for &to in ray {
            match board.piece_at(to) {
                None => moves.add(Move::new(from, to)),
                Some(blocker) => {
                    if blocker.player != player {
                        moves.add(Move::new(from, to));
                    }
                    break;
                }
            }
        }
    }
}

fn cannon_moves(board: &Board, from: Square, player: Player, moves: &mut MoveList) {
    for ray in &RULE_TABLES.rays[from.index()] {
        let mut screened = false;
        for &to in ray {
            match (board.piece_at(to), screened) {
                (None, false) => moves.add(Move::new(from, to)),
                (Some(_), false) => screened = true,
                (None, true) => {}
                (Some(target), true) => {
                    if target.player != player {
                        moves.add(Move::new(from, to));
                    }
                    break;
                }
            }
        }
    }
}

fn soldier_moves(board: &Board, from: Square, player: Player, moves: &mut MoveList) {
    if let Some(to) = from.offset(player.forward(), 0) {
        push_if_enterable(board, from, to, player, moves);
    }
    if from.has_crossed_river(player) {
        for d_col in [-1, 1] {
            if let Some(to) = from.offset(0, d_col) {
                push_if_enterable(board, from, to, player, moves);
            }
        }
    }
}

/// Pseudo-legal moves of the piece on `from`, ignoring self-check.
pub fn piece_moves(board: &Board, from: Square, piece: Piece, moves: &mut MoveList) {
    movement_rule(piece.kind)(board, from, piece.player, moves);
}

/// All pseudo-legal moves for `player`, ignoring self-check.
pub fn generate_pseudo_legal_moves(board: &Board, player: Player) -> MoveList {
    let mut moves = MoveList::new();
    for (from, piece) in board.pieces_of(player) {
        piece_moves(board, from, piece, &mut moves);
    }
    moves
}

/// Checks if a given square is reachable by any piece of `attacker` on the
/// board exactly as it stands.
pub fn is_square_attacked_by(board: &Board, sq: Square, attacker: Player) -> bool {
    let mut moves = MoveList::new();
    board.pieces_of(attacker).any(|(from, piece)| {
        moves.clear();
        piece_moves(board, from, piece, &mut moves);
        moves.iter().any(|mv| mv.to == sq)
    })
}

/// Whether `player`'s general is attacked. A side without a general is not in check.
pub fn is_in_check(board: &Board, player: Player) -> bool {
    match board.find_general(player) {
        Some(general) => is_square_attacked_by(board, general, player.opponent()),
        None => false,
    }
}
