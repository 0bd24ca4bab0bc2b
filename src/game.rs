//! Game lifecycle: apply, undo, reset and result derivation.

use crate::board::Board;
use crate::constants::{Piece, Player};
use crate::error::GameError;
use crate::legality::generate_legal_moves;
use crate::move_gen::is_in_check;
use crate::movelist::MoveList;
use crate::r#move::Move;
use crate::square::Square;
use std::fmt;

/// One played move, enough to take it back exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub mv: Move,
    pub captured: Option<Piece>,
    pub player_before: Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    GeneralCaptured,
    Checkmate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win { winner: Player, reason: WinReason },
    /// The side to move has no legal move but is not in check.
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Over(Outcome),
}

/// A legal destination of a single piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub to: Square,
    pub capture: bool,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    history: Vec<HistoryEntry>,
}

impl Game {
    /// A new game from the starting layout with `starting_side` to move.
    pub fn new(starting_side: Player) -> Self {
        Self {
            board: Board::starting_position(starting_side),
            history: Vec::new(),
        }
    }

    /// Starts from an arbitrary board with an empty history.
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            history: Vec::new(),
        }
    }

    pub fn reset(&mut self, starting_side: Player) {
        log::debug!("reset, {} to move", starting_side);
        *self = Self::new(starting_side);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Player {
        self.board.player_to_move
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|entry| entry.mv)
    }

    pub fn fen(&self) -> String {
        self.board.to_fen()
    }

    pub fn legal_moves(&self) -> MoveList {
        // Simulations run on a scratch copy so queries stay `&self`.
        let mut scratch = self.board.clone();
        generate_legal_moves(&mut scratch)
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    /// Legal destinations of the piece on `from`, flagged as captures or not.
    pub fn legal_moves_from(&self, from: Square) -> Vec<Target> {
        self.legal_moves()
            .iter()
            .filter(|mv| mv.from == from)
            .map(|mv| Target {
                to: mv.to,
                capture: !self.board.is_empty_at(mv.to),
            })
            .collect()
    }

    pub fn is_in_check(&self, player: Player) -> bool {
        is_in_check(&self.board, player)
    }

    pub fn has_general(&self, player: Player) -> bool {
        self.board.find_general(player).is_some()
    }

    /// Plays a legal move and returns the captured piece, if any.
    ///
    /// An illegal move, or any move once the game is over, is rejected and
    /// leaves the game untouched.
    pub fn apply_move(&mut self, mv: Move) -> Result<Option<Piece>, GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        if !self.is_legal(mv) {
            log::debug!("rejected illegal move {} for {}", mv, self.side_to_move());
            return Err(GameError::InvalidMove(mv));
        }

        let player_before = self.side_to_move();
        let captured = self.board.make_move(mv);
        self.history.push(HistoryEntry {
            mv,
            captured,
            player_before,
        });
        log::debug!(
            "{} played {}{}",
            player_before,
            mv,
            captured.map_or(String::new(), |p| format!(" capturing {}", p.kind.name()))
        );

        if let GameStatus::Over(outcome) = self.status() {
            log::info!("game over after {} plies: {}", self.history.len(), outcome);
        }
        Ok(captured)
    }

    /// Takes back the last move. Does nothing on an empty history.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        let entry = self.history.pop()?;
        self.board.unmake_move(entry.mv, entry.captured, entry.player_before);
        log::debug!("undid {}", entry.mv);
        Some(entry)
    }

    pub fn is_game_over(&self) -> bool {
        self.status() != GameStatus::InProgress
    }

    pub fn status(&self) -> GameStatus {
        let red = self.has_general(Player::Red);
        let black = self.has_general(Player::Black);
        match (red, black) {
            (true, false) => {
                return GameStatus::Over(Outcome::Win {
                    winner: Player::Red,
                    reason: WinReason::GeneralCaptured,
                })
            }
            (false, true) => {
                return GameStatus::Over(Outcome::Win {
                    winner: Player::Black,
                    reason: WinReason::GeneralCaptured,
                })
            }
            (false, false) => return GameStatus::Over(Outcome::Draw),
            (true, true) => {}
        }

        if !self.legal_moves().is_empty() {
            return GameStatus::InProgress;
        }
        let mover = self.side_to_move();
        if self.is_in_check(mover) {
            GameStatus::Over(Outcome::Win {
                winner: mover.opponent(),
                reason: WinReason::Checkmate,
            })
        } else {
            GameStatus::Over(Outcome::Draw)
        }
    }

    /// Human-readable status line.
    pub fn result_text(&self) -> String {
        self.status().to_string()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Player::Red)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win {
                winner,
                reason: WinReason::Checkmate,
            } => write!(f, "{} wins by checkmate", winner),
            Outcome::Win {
                winner,
                reason: WinReason::GeneralCaptured,
            } => write!(f, "{} wins, general captured", winner),
            Outcome::Draw => f.write_str("Draw, no legal moves"),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => f.write_str("In progress"),
            GameStatus::Over(outcome) => write!(f, "{}", outcome),
        }
    }
}
