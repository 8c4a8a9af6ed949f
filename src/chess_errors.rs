//! Errors used throughout the rules and notation engine.
//!
//! This module defines the canonical error type returned by game logic,
//! parsing utilities, and the move pipeline. `ChessError` is used as the
//! single error type across the crate to simplify propagation and matching.

use thiserror::Error;

/// Unified error type for the rules and notation engine.
///
/// Each variant carries a specific, human-readable reason describing the
/// first precondition that failed. A missing king is deliberately *not* a
/// variant: that signals a corrupted board and is a fatal invariant failure
/// rather than a recoverable, caller-facing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// A coordinate fell outside the `[0,7]` file/rank range.
    #[error("illegal position: {0}")]
    IllegalPosition(String),

    /// Malformed or semantically inconsistent FEN/SAN/long-algebraic/PGN
    /// text, including mismatched capture/check/checkmate markers and
    /// ambiguity strings that cannot be resolved.
    #[error("illegal notation: {0}")]
    IllegalNotation(String),

    /// A structurally well-formed move violates game rules when submitted
    /// to the mutating entry point (wrong turn, piece absent, unsafe move,
    /// game already over, history not at its latest entry).
    #[error("illegal move: {0}")]
    IllegalMove(String),
}

impl ChessError {
    pub(crate) fn illegal_position(reason: impl Into<String>) -> Self {
        ChessError::IllegalPosition(reason.into())
    }

    pub(crate) fn illegal_notation(reason: impl Into<String>) -> Self {
        ChessError::IllegalNotation(reason.into())
    }

    pub(crate) fn illegal_move(reason: impl Into<String>) -> Self {
        ChessError::IllegalMove(reason.into())
    }
}
