//! King movement rules, castling evaluation, and the king special-move hook.
//!
//! A one-step move in any direction is always valid for the king itself; a
//! two-file horizontal move is evaluated as a castle attempt. The hook
//! relocates the rook on a castle and revokes both of the mover's rights on
//! any king move.

use crate::chess_errors::ChessError;
use crate::game_state::board::Board;
use crate::game_state::castling_rights::CastleSide;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::moves::chess_move::ChessMove;
use crate::moves::position::Position;

/// File the king starts on.
const KING_HOME_FILE: u8 = 4;

pub fn is_king_move_valid(chess_move: &ChessMove, color: Color, board: &Board) -> bool {
    let d_file = chess_move.file_delta();
    let d_rank = chess_move.rank_delta();

    if d_file.abs() <= 1 && d_rank.abs() <= 1 && (d_file != 0 || d_rank != 0) {
        return true;
    }

    if d_rank == 0 && d_file.abs() == 2 {
        return is_castle_valid(chess_move, color, board);
    }

    false
}

/// Castle legality: king on its home square, the matching right still
/// granted, a clear path to the rook, and no check on the start, crossed,
/// or destination squares.
fn is_castle_valid(chess_move: &ChessMove, color: Color, board: &Board) -> bool {
    let rank = color.home_rank();
    if chess_move.from.file() != KING_HOME_FILE || chess_move.from.rank() != rank {
        return false;
    }

    let side = if chess_move.file_delta() > 0 {
        CastleSide::KingSide
    } else {
        CastleSide::QueenSide
    };
    if !board.castling_rights.is_granted(color, side) {
        return false;
    }

    // Two empty squares king-side, three queen-side.
    let between_files: &[u8] = match side {
        CastleSide::KingSide => &[5, 6],
        CastleSide::QueenSide => &[1, 2, 3],
    };
    for &file in between_files {
        let square = match Position::new(file, rank) {
            Ok(square) => square,
            Err(_) => return false,
        };
        if board.piece_at(square).is_some() {
            return false;
        }
    }

    let crossed_file = if chess_move.file_delta() > 0 { 5 } else { 3 };
    let enemy = color.opposite();
    for file in [KING_HOME_FILE, crossed_file, chess_move.to.file()] {
        let square = match Position::new(file, rank) {
            Ok(square) => square,
            Err(_) => return false,
        };
        if board.is_attacked(square, enemy) {
            return false;
        }
    }

    true
}

/// King special-move hook: relocate the rook on a castle, revoke both of
/// the mover's rights, and clear en-passant eligibility.
pub fn king_special_move_execution(
    chess_move: &ChessMove,
    board: &mut Board,
) -> Result<(), ChessError> {
    let king = board.piece_at(chess_move.from).ok_or_else(|| {
        ChessError::illegal_move("no king on the initial square during execution")
    })?;
    let color = king.color;
    let rank = chess_move.from.rank();

    if chess_move.rank_delta() == 0 && chess_move.file_delta().abs() == 2 {
        let (rook_from_file, rook_to_file) = if chess_move.file_delta() > 0 {
            (7, 5)
        } else {
            (0, 3)
        };
        let rook_from = Position::new(rook_from_file, rank)?;
        let rook_to = Position::new(rook_to_file, rank)?;

        match board.remove(rook_from) {
            Some(rook) if rook.kind == PieceKind::Rook && rook.color == color => {
                board.place(rook_to, rook);
            }
            _ => {
                return Err(ChessError::illegal_move(
                    "castling found no rook on its home square",
                ))
            }
        }
    }

    board.castling_rights.revoke_both(color);
    board.en_passant_target = None;
    Ok(())
}
