//! Queen movement rule.
//!
//! Straight or diagonal moves, delegating to the rook and bishop shapes so
//! the clear-path logic lives in one place per shape.

use crate::game_state::board::Board;
use crate::moves::bishop_moves::is_bishop_move_valid;
use crate::moves::chess_move::ChessMove;
use crate::moves::rook_moves::is_rook_move_valid;

pub fn is_queen_move_valid(chess_move: &ChessMove, board: &Board) -> bool {
    is_rook_move_valid(chess_move, board) || is_bishop_move_valid(chess_move, board)
}

#[cfg(test)]
mod tests {
    use super::is_queen_move_valid;
    use crate::moves::chess_move::ChessMove;
    use crate::moves::position::Position;
    use crate::utils::fen_parser::parse_fen;

    fn mv(from: &str, to: &str) -> ChessMove {
        ChessMove::new(
            Position::from_algebraic(from).expect("from should parse"),
            Position::from_algebraic(to).expect("to should parse"),
        )
    }

    #[test]
    fn queen_combines_rook_and_bishop_shapes() {
        let game = parse_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1").expect("FEN should parse");
        let board = game.board();

        assert!(is_queen_move_valid(&mv("a1", "a8"), board));
        assert!(is_queen_move_valid(&mv("a1", "d1"), board));
        assert!(is_queen_move_valid(&mv("a1", "h8"), board));
        assert!(!is_queen_move_valid(&mv("a1", "b3"), board));
    }
}
