//! Configuration for a game session.

use crate::constants::Player;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    HumanVsEngine,
    HumanVsHuman,
    EngineVsEngine,
}

#[derive(Debug, Clone)]
pub struct Config {
    // Search collaborator
    pub search_depth: u32,
    pub engine_timeout_ms: u64,
    /// UCI engine executable. Without one every engine turn falls back to a random legal move.
    pub engine_path: Option<PathBuf>,
    pub engine_threads: usize,
    pub engine_hash_mb: usize,

    // Session
    pub mode: Mode,
    pub starting_side: Player,
    pub human_side: Player,
    /// Seed for fallback move selection; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_depth: 6,
            engine_timeout_ms: 10_000,
            engine_path: None,
            engine_threads: 1,
            engine_hash_mb: 64,
            mode: Mode::HumanVsEngine,
            starting_side: Player::Red,
            human_side: Player::Red,
            seed: None,
        }
    }
}

impl Config {
    pub fn engine_timeout(&self) -> Duration {
        Duration::from_millis(self.engine_timeout_ms)
    }

    /// Whether the engine, not a person, plays `side`.
    pub fn is_engine_turn(&self, side: Player) -> bool {
        match self.mode {
            Mode::HumanVsEngine => side != self.human_side,
            Mode::HumanVsHuman => false,
            Mode::EngineVsEngine => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_turns_follow_mode() {
        let mut config = Config::default();
        assert!(!config.is_engine_turn(Player::Red));
        assert!(config.is_engine_turn(Player::Black));

        config.human_side = Player::Black;
        assert!(config.is_engine_turn(Player::Red));

        config.mode = Mode::HumanVsHuman;
        assert!(!config.is_engine_turn(Player::Red));

        config.mode = Mode::EngineVsEngine;
        assert!(config.is_engine_turn(Player::Black));
        assert_eq!(config.engine_timeout(), Duration::from_secs(10));
    }
}
