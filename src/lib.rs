pub mod board;
pub mod collaborator;
pub mod config;
pub mod constants;
pub mod engine_bridge;
pub mod error;
pub mod game;
pub mod legality;
pub mod move_gen;
pub mod movelist;
pub mod r#move;
pub mod notation;
pub mod square;

pub use board::{Board, STARTING_FEN};
pub use constants::{Piece, PieceKind, Player};
pub use error::GameError;
pub use game::{Game, GameStatus, HistoryEntry, Outcome, WinReason};
pub use r#move::Move;
pub use square::Square;
