//! Random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used for diagnostics,
//! integration testing, and low-strength gameplay.

use rand::prelude::IndexedRandom;

use crate::chess_errors::ChessError;
use crate::engines::engine_trait::Engine;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Default)]
pub struct RandomEngine;

impl RandomEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_move(&mut self, game_state: &GameState) -> Result<Option<ChessMove>, ChessError> {
        let legal_moves = game_state.all_legal_moves();
        let mut rng = rand::rng();
        Ok(legal_moves.as_slice().choose(&mut rng).copied())
    }
}
