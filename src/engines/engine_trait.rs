//! Engine abstraction layer.
//!
//! Defines a single trait interface so different move-selection strategies
//! can be swapped at runtime behind a common surface.

use crate::chess_errors::ChessError;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::ChessMove;

pub trait Engine: Send {
    fn name(&self) -> &str;

    /// Reset any internal state before a fresh game.
    fn new_game(&mut self) {}

    /// Pick a move for the side on move. `Ok(None)` means the engine has no
    /// legal move to offer, which only happens in terminal positions.
    fn choose_move(&mut self, game_state: &GameState) -> Result<Option<ChessMove>, ChessError>;
}
