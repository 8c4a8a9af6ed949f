//! FEN-to-GameState parser.
//!
//! Strict six-field split with semantic validation: exactly 8x8 board,
//! exactly one king per color, no pawns on the back ranks, the side not on
//! move may not already stand in check, claimed castling rights are
//! re-verified against piece placement, and the clocks must be plausible.

use crate::chess_errors::ChessError;
use crate::game_state::board::Board;
use crate::game_state::castling_rights::CastlingRights;
use crate::game_state::chess_rules::HALFMOVE_DRAW_LIMIT;
use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::game_state::game_state::GameState;
use crate::moves::position::Position;

pub fn parse_fen(fen: &str) -> Result<GameState, ChessError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts
        .next()
        .ok_or_else(|| ChessError::illegal_notation("missing board layout in FEN"))?;
    let side_part = parts
        .next()
        .ok_or_else(|| ChessError::illegal_notation("missing side-to-move in FEN"))?;
    let castling_part = parts
        .next()
        .ok_or_else(|| ChessError::illegal_notation("missing castling rights in FEN"))?;
    let en_passant_part = parts
        .next()
        .ok_or_else(|| ChessError::illegal_notation("missing en-passant square in FEN"))?;
    let halfmove_part = parts
        .next()
        .ok_or_else(|| ChessError::illegal_notation("missing halfmove clock in FEN"))?;
    let fullmove_part = parts
        .next()
        .ok_or_else(|| ChessError::illegal_notation("missing fullmove number in FEN"))?;

    if parts.next().is_some() {
        return Err(ChessError::illegal_notation("FEN has extra trailing fields"));
    }

    let mut board = parse_board(board_part)?;
    let turn = parse_side_to_move(side_part)?;

    validate_kings(&board)?;
    validate_pawn_ranks(&board)?;

    // An arriving position where the side that just moved is still in
    // check never came from legal play.
    if board.is_king_in_check(turn.opposite()) {
        return Err(ChessError::illegal_notation(format!(
            "the {:?} king is in check but it is not {:?}'s turn",
            turn.opposite(),
            turn.opposite()
        )));
    }

    let mut rights = CastlingRights::from_fen_field(castling_part)?;
    rights.verify_rights(&board);
    board.castling_rights = rights;

    board.en_passant_target = parse_en_passant_square(en_passant_part)?;

    let halfmove_clock = halfmove_part.parse::<u16>().map_err(|_| {
        ChessError::illegal_notation(format!("invalid halfmove clock: {halfmove_part}"))
    })?;
    if halfmove_clock > HALFMOVE_DRAW_LIMIT {
        return Err(ChessError::illegal_notation(format!(
            "halfmove clock {halfmove_clock} exceeds {HALFMOVE_DRAW_LIMIT}"
        )));
    }

    let fullmove_number = fullmove_part.parse::<u16>().map_err(|_| {
        ChessError::illegal_notation(format!("invalid fullmove number: {fullmove_part}"))
    })?;
    if fullmove_number == 0 {
        return Err(ChessError::illegal_notation(
            "fullmove number must be greater than zero",
        ));
    }

    Ok(GameState::from_parts(
        board,
        turn,
        halfmove_clock,
        fullmove_number,
    ))
}

fn parse_board(board_part: &str) -> Result<Board, ChessError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::illegal_notation(
            "board layout must contain 8 ranks",
        ));
    }

    let mut board = Board::empty();

    for (fen_rank_index, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_index as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::illegal_notation(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                // Bounded each iteration, so the accumulator cannot overflow
                // no matter how long a malformed digit run is.
                file += empty_count as u8;
                if file > 8 {
                    return Err(ChessError::illegal_notation("board rank has too many files"));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or_else(|| {
                ChessError::illegal_notation(format!(
                    "invalid piece character '{ch}' in board layout"
                ))
            })?;

            if file >= 8 {
                return Err(ChessError::illegal_notation("board rank has too many files"));
            }

            board.place(Position::new(file, rank)?, piece);
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::illegal_notation(
                "board rank does not sum to 8 files",
            ));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ChessError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessError::illegal_notation(format!(
            "invalid side-to-move field: {side_part}"
        ))),
    }
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Position>, ChessError> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    Ok(Some(Position::from_algebraic(en_passant_part)?))
}

fn validate_kings(board: &Board) -> Result<(), ChessError> {
    for color in [Color::White, Color::Black] {
        let kings = board
            .occupied_squares()
            .filter(|(_, piece)| *piece == Piece::new(PieceKind::King, color))
            .count();
        if kings != 1 {
            return Err(ChessError::illegal_notation(format!(
                "expected exactly one {color:?} king, found {kings}"
            )));
        }
    }
    Ok(())
}

fn validate_pawn_ranks(board: &Board) -> Result<(), ChessError> {
    let misplaced = board.occupied_squares().any(|(position, piece)| {
        piece.kind == PieceKind::Pawn && (position.rank() == 0 || position.rank() == 7)
    });
    if misplaced {
        return Err(ChessError::illegal_notation(
            "pawns may not occupy the first or eighth rank",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::Color;
    use crate::utils::render_game_state::render_game_state;

    #[test]
    fn parse_starting_fen_and_render_board() {
        let game = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        println!("\n{}", render_game_state(&game));

        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.fullmove_number(), 1);
        assert_eq!(game.halfmove_clock(), 0);
    }

    #[test]
    fn structural_violations_are_rejected() {
        let cases = [
            // Seven ranks.
            "rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            // Nine files in one rank.
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            // Bad piece character.
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPXPP/RNBQKBNR w KQkq - 0 1",
            // Missing fields.
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq",
            // Extra trailing field.
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra",
            // Bad side to move.
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            // Bad en passant square.
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1",
            // Halfmove clock beyond the fifty-move limit.
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 101 1",
            // Fullmove number of zero.
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0",
        ];

        for fen in cases {
            let err = parse_fen(fen).expect_err(fen);
            assert!(matches!(err, ChessError::IllegalNotation(_)), "{fen}");
        }
    }

    #[test]
    fn overlong_digit_runs_are_rejected_without_overflowing() {
        // Forty '8's in one rank would overflow a naive u8 accumulator and
        // wrap back to a value that looks like a complete rank.
        let fen = format!("k7/{}/8/8/8/8/8/K7 w - - 0 1", "8".repeat(40));
        let err = parse_fen(&fen).expect_err("over-long rank should fail");
        assert!(matches!(err, ChessError::IllegalNotation(_)));

        // A short run that still oversteps eight files fails the same way.
        assert!(parse_fen("k7/44444/8/8/8/8/8/K7 w - - 0 1").is_err());
    }

    #[test]
    fn semantic_violations_are_rejected() {
        // Two white kings.
        assert!(parse_fen("4k3/8/8/8/8/8/8/K3K3 w - - 0 1").is_err());
        // No black king.
        assert!(parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
        // Pawn on the eighth rank.
        assert!(parse_fen("P3k3/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
        // Black is in check although White is to move.
        assert!(parse_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 1").is_ok());
        assert!(parse_fen("4k3/4R3/8/8/8/8/8/4K3 w - - 0 1").is_err());
    }
}
