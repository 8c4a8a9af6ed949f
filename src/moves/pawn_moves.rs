//! Pawn movement rules and the pawn special-move hook.
//!
//! Covers single and double pushes, diagonal captures, en-passant capture,
//! and promotion. The hook is the only place that rewrites a piece's kind:
//! the promoted piece replaces the pawn on the source square just before
//! the generic board update relocates it to the destination.

use crate::chess_errors::ChessError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece};
use crate::moves::chess_move::ChessMove;
use crate::moves::position::Position;

/// Rank a pawn of this color starts from.
#[inline]
pub const fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

/// Back rank a pawn of this color promotes on.
#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// Whether this move, made by a pawn of `color`, lands on the back rank.
#[inline]
pub fn is_promotion_move(chess_move: &ChessMove, color: Color) -> bool {
    chess_move.to.rank() == promotion_rank(color)
}

/// Whether this move is an en-passant capture: one file aside, one rank
/// forward, empty destination that equals the board's en-passant target.
pub fn is_en_passant_capture(chess_move: &ChessMove, color: Color, board: &Board) -> bool {
    chess_move.file_delta().abs() == 1
        && chess_move.rank_delta() == color.forward()
        && board.piece_at(chess_move.to).is_none()
        && board.en_passant_target == Some(chess_move.to)
}

pub fn is_pawn_move_valid(chess_move: &ChessMove, color: Color, board: &Board) -> bool {
    let d_file = chess_move.file_delta();
    let d_rank = chess_move.rank_delta();
    let forward = color.forward();

    // Single push: same file, one rank forward, destination empty.
    if d_file == 0 && d_rank == forward {
        return board.piece_at(chess_move.to).is_none();
    }

    // Double push: only from the start rank, both squares empty.
    if d_file == 0 && d_rank == 2 * forward && chess_move.from.rank() == pawn_start_rank(color) {
        let crossed = match chess_move.from.offset(0, forward) {
            Some(square) => square,
            None => return false,
        };
        return board.piece_at(crossed).is_none() && board.piece_at(chess_move.to).is_none();
    }

    // Diagonal capture, or en passant onto the empty target square.
    if d_file.abs() == 1 && d_rank == forward {
        return match board.piece_at(chess_move.to) {
            Some(target) => target.color != color,
            None => board.en_passant_target == Some(chess_move.to),
        };
    }

    false
}

/// Pawn special-move hook, run before the generic relocation:
/// - en passant removes the bypassed enemy pawn;
/// - a double push arms the en-passant target, anything else clears it;
/// - promotion rewrites the source square with the promoted piece.
pub fn pawn_special_move_execution(
    chess_move: &ChessMove,
    board: &mut Board,
) -> Result<(), ChessError> {
    let pawn = board.piece_at(chess_move.from).ok_or_else(|| {
        ChessError::illegal_move("no pawn on the initial square during execution")
    })?;
    let color = pawn.color;

    if is_en_passant_capture(chess_move, color, board) {
        let captured_square = Position::new(chess_move.to.file(), chess_move.from.rank())?;
        if board.remove(captured_square).is_none() {
            return Err(ChessError::illegal_move(
                "en-passant capture found no pawn to remove",
            ));
        }
    }

    if chess_move.rank_delta() == 2 * color.forward() {
        board.en_passant_target = chess_move.from.offset(0, color.forward());
    } else {
        board.en_passant_target = None;
    }

    if is_promotion_move(chess_move, color) {
        let promotion = chess_move.promotion.ok_or_else(|| {
            ChessError::illegal_move("promotion piece required for a move to the back rank")
        })?;
        board.place(chess_move.from, Piece::new(promotion, color));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{is_en_passant_capture, is_pawn_move_valid};
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::moves::chess_move::ChessMove;
    use crate::moves::position::Position;
    use crate::utils::fen_parser::parse_fen;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn mv(from: &str, to: &str) -> ChessMove {
        ChessMove::new(
            Position::from_algebraic(from).expect("from should parse"),
            Position::from_algebraic(to).expect("to should parse"),
        )
    }

    #[test]
    fn pushes_require_empty_squares() {
        let game = parse_fen("4k3/8/8/8/4p3/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let board = game.board();

        assert!(is_pawn_move_valid(&mv("e2", "e3"), Color::White, board));
        // e4 is occupied, so the double push is blocked at its destination.
        assert!(!is_pawn_move_valid(&mv("e2", "e4"), Color::White, board));
        assert!(!is_pawn_move_valid(&mv("e2", "e5"), Color::White, board));
        assert!(is_pawn_move_valid(&mv("e4", "e3"), Color::Black, board));
    }

    #[test]
    fn double_push_only_from_the_start_rank() {
        let game = parse_fen("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(!is_pawn_move_valid(&mv("e3", "e5"), Color::White, game.board()));
    }

    #[test]
    fn diagonal_moves_need_an_enemy_or_the_en_passant_target() {
        let game = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let board = game.board();

        let ep = mv("e5", "d6");
        assert!(is_pawn_move_valid(&ep, Color::White, board));
        assert!(is_en_passant_capture(&ep, Color::White, board));
        // Plain diagonal onto an empty, non-target square is not a move.
        assert!(!is_pawn_move_valid(&mv("e5", "f6"), Color::White, board));
    }

    #[test]
    fn en_passant_removes_the_bypassed_pawn() {
        let mut game =
            parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let mv = long_algebraic_to_move("e5d6", &game).expect("LAN should parse");
        game.apply_move(mv).expect("en passant should apply");

        let d5 = Position::from_algebraic("d5").expect("d5 should parse");
        assert!(game.board().piece_at(d5).is_none());
        assert_eq!(
            game.board()
                .piece_at(Position::from_algebraic("d6").expect("d6 should parse"))
                .map(|p| p.kind),
            Some(PieceKind::Pawn)
        );
    }

    #[test]
    fn promotion_writes_the_promoted_piece_to_the_destination() {
        let mut game = parse_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mv = long_algebraic_to_move("a7a8q", &game).expect("LAN should parse");
        game.apply_move(mv).expect("promotion should apply");

        let a8 = Position::from_algebraic("a8").expect("a8 should parse");
        assert_eq!(game.board().piece_at(a8).map(|p| p.kind), Some(PieceKind::Queen));
    }

    #[test]
    fn en_passant_is_a_one_ply_opportunity() {
        let mut game =
            parse_fen("4k3/8/8/3pP3/8/8/8/4K2R w K d6 0 1").expect("FEN should parse");
        // Any non-double-push move clears the target.
        let rook_move = long_algebraic_to_move("h1h2", &game).expect("LAN should parse");
        game.apply_move(rook_move).expect("rook move should apply");
        assert_eq!(game.board().en_passant_target, None);
    }
}
