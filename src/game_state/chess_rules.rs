//! Canonical chess-rule constants.
//!
//! This module stores static rule-related literals such as the standard
//! starting position FEN used to initialize and validate game state setup.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-move clock value at which the fifty-move rule draws the game
/// (50 full moves without a pawn move or capture).
pub const HALFMOVE_DRAW_LIMIT: u16 = 100;

/// Occurrence count of a (board, side-to-move) signature that draws the
/// game by repetition.
pub const REPETITION_DRAW_COUNT: u32 = 3;
