//! Long algebraic ("from-to[promotion]") move codec.
//!
//! Exactly four or five characters: source square, destination square, and
//! an optional promotion letter that must be present exactly when the move
//! would promote.

use crate::chess_errors::ChessError;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::ChessMove;
use crate::moves::pawn_moves::is_promotion_move;
use crate::moves::position::Position;

pub fn move_to_long_algebraic(chess_move: &ChessMove) -> String {
    let mut out = String::new();
    out.push_str(&chess_move.from.to_algebraic());
    out.push_str(&chess_move.to.to_algebraic());
    if let Some(promotion) = chess_move.promotion {
        if let Some(letter) = promotion.san_letter() {
            out.push(letter.to_ascii_lowercase());
        }
    }
    out
}

pub fn long_algebraic_to_move(
    text: &str,
    game_state: &GameState,
) -> Result<ChessMove, ChessError> {
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::illegal_notation(format!(
            "invalid long algebraic move: {text}"
        )));
    }

    let from = Position::from_algebraic(&text[0..2])?;
    let to = Position::from_algebraic(&text[2..4])?;

    let piece = game_state.board().piece_at(from).ok_or_else(|| {
        ChessError::illegal_notation(format!("no piece on the source square of {text}"))
    })?;

    let bare_move = ChessMove::new(from, to);
    let would_promote = piece.kind == PieceKind::Pawn && is_promotion_move(&bare_move, piece.color);

    match text.chars().nth(4) {
        Some(letter) => {
            if !would_promote {
                return Err(ChessError::illegal_notation(format!(
                    "superfluous promotion letter in {text}"
                )));
            }
            let promotion = PieceKind::from_san_letter(letter.to_ascii_uppercase())
                .filter(|kind| *kind != PieceKind::King)
                .ok_or_else(|| {
                    ChessError::illegal_notation(format!(
                        "invalid promotion letter '{letter}' in {text}"
                    ))
                })?;
            ChessMove::with_promotion(from, to, promotion)
        }
        None => {
            if would_promote {
                return Err(ChessError::illegal_notation(format!(
                    "missing promotion letter in {text}"
                )));
            }
            Ok(bare_move)
        }
    }
}
