//! GameState-to-FEN serializer.
//!
//! Emits the standard six-field record: run-length-encoded board ranks from
//! eight down to one, side to move, castling letters, en-passant square,
//! half-move clock, and full-move number.

use crate::game_state::board::Board;
use crate::game_state::game_state::GameState;
use crate::moves::position::Position;

/// The board field alone, also used as the repetition signature's body.
pub fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_run = 0u8;
        for file in 0..8u8 {
            let square = Position::new(file, rank).expect("grid indices are always on the board");
            match board.piece_at(square) {
                Some(piece) => {
                    if empty_run > 0 {
                        out.push(char::from(b'0' + empty_run));
                        empty_run = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            out.push(char::from(b'0' + empty_run));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}

pub fn generate_fen(game_state: &GameState) -> String {
    let board = game_state.board();
    let en_passant = board
        .en_passant_target
        .map(|square| square.to_algebraic())
        .unwrap_or_else(|| "-".to_owned());

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(board),
        game_state.turn().fen_char(),
        board.castling_rights.fen_field(),
        en_passant,
        game_state.halfmove_clock(),
        game_state.fullmove_number()
    )
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::game_state::GameState;

    #[test]
    fn starting_position_round_trips() {
        let game = GameState::new_game();
        assert_eq!(game.fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn arbitrary_positions_round_trip() {
        let fens = [
            "r3kb1r/pp2p1pp/3qb3/1PpPP3/4n3/1n1PBPPB/P1Q5/RN2K1NR w KQkq c6 0 16",
            "8/4R3/8/8/8/4R3/8/k1K5 w - - 1 1",
            "8/4kpp1/8/8/8/8/1PPK4/8 w - - 0 1",
        ];
        for fen in fens {
            let game = GameState::from_fen(fen).expect("FEN should parse");
            assert_eq!(game.fen(), fen);
        }
    }

    #[test]
    fn en_passant_target_appears_after_a_double_push() {
        let mut game = GameState::new_game();
        game.apply_long_algebraic("e2e4").expect("move should apply");
        assert_eq!(
            game.fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPPPPPP/RNBQKBNR b KQkq e3 0 1"
        );
    }
}
