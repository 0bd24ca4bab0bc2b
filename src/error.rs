//! Error type shared by the rules core.

use crate::r#move::Move;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("illegal move: {0}")]
    InvalidMove(Move),
    #[error("game is already over")]
    GameOver,
    #[error("malformed notation: {0:?}")]
    MalformedNotation(String),
}
