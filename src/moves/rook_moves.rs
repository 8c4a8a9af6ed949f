//! Rook movement rule and its castling-rights side effect.
//!
//! Straight-line moves with a clear path. Moving a rook off one of the four
//! corner home squares revokes the matching castling right; the comparison
//! is by square name, not piece identity, so a rook returning to its corner
//! never restores a right.

use crate::game_state::board::Board;
use crate::game_state::castling_rights::CastleSide;
use crate::game_state::chess_types::Color;
use crate::moves::chess_move::ChessMove;

pub fn is_rook_move_valid(chess_move: &ChessMove, board: &Board) -> bool {
    let d_file = chess_move.file_delta();
    let d_rank = chess_move.rank_delta();
    let straight = (d_file == 0) != (d_rank == 0);
    straight && board.path_is_clear(chess_move.from, chess_move.to)
}

/// Rook special-move hook: revoke the right belonging to the vacated corner
/// square, then clear en-passant eligibility like every non-double-push move.
pub fn rook_special_move_execution(chess_move: &ChessMove, board: &mut Board) {
    match chess_move.from.to_algebraic().as_str() {
        "a1" => board.castling_rights.revoke(Color::White, CastleSide::QueenSide),
        "h1" => board.castling_rights.revoke(Color::White, CastleSide::KingSide),
        "a8" => board.castling_rights.revoke(Color::Black, CastleSide::QueenSide),
        "h8" => board.castling_rights.revoke(Color::Black, CastleSide::KingSide),
        _ => {}
    }
    board.en_passant_target = None;
}
