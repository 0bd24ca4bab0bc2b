//! The contract with an external move-search engine, and what to do when it
//! gives no usable answer.

use crate::game::Game;
use crate::notation::move_from_notation;
use crate::r#move::Move;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::future::Future;

/// Something that proposes a move for a position.
///
/// Answers are in engine notation (`h2e2`); `None` means no move was offered.
/// Any time limit is the implementor's business.
pub trait SearchCollaborator {
    fn best_move(&mut self, fen: &str, depth: u32) -> impl Future<Output = Option<String>> + Send;
}

/// Never answers, so every request falls back to a random legal move.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEngine;

impl SearchCollaborator for NoEngine {
    async fn best_move(&mut self, _fen: &str, _depth: u32) -> Option<String> {
        None
    }
}

/// Builds the RNG used for fallback choices.
pub fn fallback_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Turns an engine reply into a move to play.
///
/// The reply is used if it parses and is legal right now; otherwise a legal
/// move is picked at random. Returns `None` only when there is no legal move.
pub fn resolve_reply<R: Rng + ?Sized>(
    game: &Game,
    reply: Option<&str>,
    rng: &mut R,
) -> Option<Move> {
    let legal = game.legal_moves();

    match reply.map(move_from_notation) {
        Some(Ok(mv)) if legal.contains(&mv) => return Some(mv),
        Some(Ok(mv)) => log::warn!("engine proposed illegal move {}, falling back", mv),
        Some(Err(e)) => log::warn!("engine reply unusable ({}), falling back", e),
        None => log::warn!("engine offered no move, falling back"),
    }

    legal.as_slice().choose(rng).copied()
}

/// Asks `collaborator` for a move in the current position and resolves the answer.
pub async fn request_move<C, R>(
    game: &Game,
    collaborator: &mut C,
    depth: u32,
    rng: &mut R,
) -> Option<Move>
where
    C: SearchCollaborator,
    R: Rng + ?Sized,
{
    let reply = collaborator.best_move(&game.fen(), depth).await;
    resolve_reply(game, reply.as_deref(), rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTING_FEN;
    use crate::constants::Player;

    struct Scripted {
        reply: Option<&'static str>,
        seen: Vec<(String, u32)>,
    }

    impl SearchCollaborator for Scripted {
        async fn best_move(&mut self, fen: &str, depth: u32) -> Option<String> {
            self.seen.push((fen.to_string(), depth));
            self.reply.map(str::to_string)
        }
    }

    #[tokio::test]
    async fn legal_reply_is_used_verbatim() {
        let game = Game::default();
        let mut engine = Scripted {
            reply: Some("h2e2"),
            seen: Vec::new(),
        };
        let mv = request_move(&game, &mut engine, 8, &mut fallback_rng(Some(1)))
            .await
            .unwrap();
        assert_eq!(mv.to_notation(), "h2e2");
        assert_eq!(engine.seen, vec![(STARTING_FEN.to_string(), 8)]);
    }

    #[test]
    fn unusable_replies_fall_back_to_a_legal_move() {
        let game = Game::default();
        let legal = game.legal_moves();
        let mut rng = fallback_rng(Some(42));
        // Missing, malformed, and well-formed but illegal (a black move with Red to play).
        for reply in [None, Some("(none)"), Some("zz99"), Some("h7e7")] {
            let mv = resolve_reply(&game, reply, &mut rng).unwrap();
            assert!(legal.contains(&mv), "{:?} gave {}", reply, mv);
        }
    }

    #[tokio::test]
    async fn seeded_fallback_is_reproducible() {
        let game = Game::default();
        let first = request_move(&game, &mut NoEngine, 6, &mut fallback_rng(Some(9))).await;
        let second = request_move(&game, &mut NoEngine, 6, &mut fallback_rng(Some(9))).await;
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn no_legal_moves_yields_none() {
        use crate::board::Board;
        use crate::constants::{Piece, PieceKind};
        use crate::square::Square;

        let sq = |r, c| Square::new(r, c).unwrap();
        let mut board = Board::empty(Player::Black);
        board.place(sq(0, 4), Piece::new(PieceKind::General, Player::Black));
        board.place(sq(9, 3), Piece::new(PieceKind::General, Player::Red));
        board.place(sq(0, 0), Piece::new(PieceKind::Chariot, Player::Red));
        board.place(sq(1, 8), Piece::new(PieceKind::Chariot, Player::Red));
        let game = Game::from_board(board);

        assert_eq!(resolve_reply(&game, Some("e9e8"), &mut fallback_rng(Some(3))), None);
    }
}
