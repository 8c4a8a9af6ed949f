//! Bishop movement rule.
//!
//! Diagonal moves with a clear path between source and destination.

use crate::game_state::board::Board;
use crate::moves::chess_move::ChessMove;

pub fn is_bishop_move_valid(chess_move: &ChessMove, board: &Board) -> bool {
    let d_file = chess_move.file_delta().abs();
    let d_rank = chess_move.rank_delta().abs();
    d_file == d_rank && d_file != 0 && board.path_is_clear(chess_move.from, chess_move.to)
}

#[cfg(test)]
mod tests {
    use super::is_bishop_move_valid;
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
    fn bishop_slides_diagonally_until_blocked() {
        let game = parse_fen("4k3/8/8/8/3p4/8/1B6/4K3 w - - 0 1").expect("FEN should parse");
        let board = game.board();

        assert!(is_bishop_move_valid(&mv("b2", "c3"), board));
        assert!(is_bishop_move_valid(&mv("b2", "d4"), board));
        // d4 pawn blocks the continuation.
        assert!(!is_bishop_move_valid(&mv("b2", "e5"), board));
        assert!(!is_bishop_move_valid(&mv("b2", "b4"), board));
    }
}
