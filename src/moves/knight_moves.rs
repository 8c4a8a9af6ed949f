//! Knight movement rule.
//!
//! Fixed (±1,±2)/(±2,±1) offsets with no path check; knights jump.

use crate::game_state::board::Board;
use crate::moves::chess_move::ChessMove;

pub fn is_knight_move_valid(chess_move: &ChessMove, _board: &Board) -> bool {
    let d_file = chess_move.file_delta().abs();
    let d_rank = chess_move.rank_delta().abs();
    (d_file == 1 && d_rank == 2) || (d_file == 2 && d_rank == 1)
}
