//! Standard Algebraic Notation codec with disambiguation.
//!
//! Encoding requires the move to be currently legal and composes piece
//! letter, disambiguation, capture marker, destination, promotion suffix,
//! and a check or mate suffix derived by simulating the move. Decoding
//! resolves the ambiguity string against every same-kind candidate and then
//! insists the capture/check/checkmate markers agree with the move's actual
//! computed properties.

use crate::chess_errors::ChessError;
use crate::game_state::chess_types::{GameResult, Piece, PieceKind};
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::ChessMove;
use crate::moves::pawn_moves::is_en_passant_capture;
use crate::moves::position::Position;

const KING_SIDE_CASTLE: &str = "O-O";
const QUEEN_SIDE_CASTLE: &str = "O-O-O";

pub fn move_to_standard_algebraic(
    chess_move: &ChessMove,
    game_state: &GameState,
) -> Result<String, ChessError> {
    game_state.check_move_legal(chess_move)?;

    let piece = game_state
        .board()
        .piece_at(chess_move.from)
        .ok_or_else(|| ChessError::illegal_move("no piece on the initial square"))?;

    if piece.kind == PieceKind::King && chess_move.file_delta().abs() == 2 {
        let literal = if chess_move.file_delta() > 0 {
            KING_SIDE_CASTLE
        } else {
            QUEEN_SIDE_CASTLE
        };
        return Ok(literal.to_owned());
    }

    let is_capture = game_state.board().piece_at(chess_move.to).is_some()
        || is_en_passant_capture(chess_move, piece.color, game_state.board());

    let mut out = String::new();
    if let Some(letter) = piece.kind.san_letter() {
        out.push(letter);
    }
    out.push_str(&disambiguation(chess_move, piece, game_state, is_capture));
    if is_capture {
        out.push('x');
    }
    out.push_str(&chess_move.to.to_algebraic());
    if let Some(promotion) = chess_move.promotion {
        if let Some(letter) = promotion.san_letter() {
            out.push('=');
            out.push(letter);
        }
    }

    let (gives_check, gives_mate) = check_and_mate_after(chess_move, game_state)?;
    if gives_mate {
        out.push('#');
    } else if gives_check {
        out.push('+');
    }

    Ok(out)
}

/// Source-square qualifier needed to make the move unique.
///
/// Pawns show their file exactly on captures. Other pieces scan every
/// same-kind, same-color piece that could legally reach the destination:
/// a file-sharing conflict forces the rank, a rank-sharing (or neither-
/// sharing) conflict forces the file, and both together force the full
/// source square.
fn disambiguation(
    chess_move: &ChessMove,
    piece: Piece,
    game_state: &GameState,
    is_capture: bool,
) -> String {
    match piece.kind {
        PieceKind::Pawn => {
            if is_capture {
                chess_move.from.file_char().to_string()
            } else {
                String::new()
            }
        }
        // Only one king per color exists, so no qualifier can be needed.
        PieceKind::King => String::new(),
        _ => {
            let mut needs_rank = false;
            let mut needs_file = false;

            for (position, other) in game_state.board().occupied_squares() {
                if position == chess_move.from
                    || other.color != piece.color
                    || other.kind != piece.kind
                {
                    continue;
                }
                if !game_state.is_move_legal(&ChessMove::new(position, chess_move.to)) {
                    continue;
                }
                if position.file() == chess_move.from.file() {
                    needs_rank = true;
                } else {
                    needs_file = true;
                }
            }

            if needs_rank && needs_file {
                format!(
                    "{}{}",
                    chess_move.from.file_char(),
                    chess_move.from.rank_char()
                )
            } else if needs_rank {
                chess_move.from.rank_char().to_string()
            } else if needs_file {
                chess_move.from.file_char().to_string()
            } else {
                String::new()
            }
        }
    }
}

/// Whether the move gives check and/or checkmate, computed by simulating
/// it on a cloned game.
fn check_and_mate_after(
    chess_move: &ChessMove,
    game_state: &GameState,
) -> Result<(bool, bool), ChessError> {
    let mut simulation = game_state.clone();
    simulation.apply_move(*chess_move)?;
    let gives_mate = matches!(simulation.result(), GameResult::Checkmate { .. });
    let gives_check = simulation.board().is_king_in_check(simulation.turn());
    Ok((gives_check, gives_mate))
}

pub fn standard_algebraic_to_move(
    text: &str,
    game_state: &GameState,
) -> Result<ChessMove, ChessError> {
    let mut body = text.trim();
    if body.is_empty() || !body.is_ascii() {
        return Err(ChessError::illegal_notation(format!(
            "unparseable SAN move '{text}'"
        )));
    }

    // At most one trailing marker; "Qh4##" or "e4+#" is malformed, not a
    // doubly-marked move.
    let mut had_mate = false;
    let mut had_check = false;
    match body.chars().last() {
        Some('#') => {
            had_mate = true;
            body = &body[..body.len() - 1];
        }
        Some('+') => {
            had_check = true;
            body = &body[..body.len() - 1];
        }
        _ => {}
    }
    if body.ends_with(['+', '#']) {
        return Err(ChessError::illegal_notation(format!(
            "stacked check markers in '{text}'"
        )));
    }

    let mut had_capture = false;
    let chess_move = if body == KING_SIDE_CASTLE || body == QUEEN_SIDE_CASTLE {
        let rank = game_state.turn().home_rank();
        let to_file = if body == KING_SIDE_CASTLE { 6 } else { 2 };
        ChessMove::new(Position::new(4, rank)?, Position::new(to_file, rank)?)
    } else {
        resolve_piece_move(body, game_state, &mut had_capture)?
    };

    game_state
        .check_move_legal(&chess_move)
        .map_err(|err| ChessError::illegal_notation(format!("{text}: {err}")))?;

    let piece = game_state
        .board()
        .piece_at(chess_move.from)
        .ok_or_else(|| ChessError::illegal_notation(format!("{text}: no piece to move")))?;
    let actual_capture = game_state.board().piece_at(chess_move.to).is_some()
        || is_en_passant_capture(&chess_move, piece.color, game_state.board());
    if had_capture != actual_capture {
        return Err(ChessError::illegal_notation(format!(
            "capture marker of '{text}' does not match the move"
        )));
    }

    let (gives_check, gives_mate) = check_and_mate_after(&chess_move, game_state)
        .map_err(|err| ChessError::illegal_notation(format!("{text}: {err}")))?;

    // A '#' that is not actually mate always rejects. A '+' on a move that
    // turns out to be mate is accepted; the mate marker is validated
    // independently of the check marker.
    if had_mate && !gives_mate {
        return Err(ChessError::illegal_notation(format!(
            "checkmate marker of '{text}' does not match the move"
        )));
    }
    if (had_check || had_mate) != gives_check {
        return Err(ChessError::illegal_notation(format!(
            "check marker of '{text}' does not match the move"
        )));
    }

    Ok(chess_move)
}

/// Resolve a non-castling SAN body into a unique legal move.
fn resolve_piece_move(
    body: &str,
    game_state: &GameState,
    had_capture: &mut bool,
) -> Result<ChessMove, ChessError> {
    let mut rest = body;

    let promotion = match rest.rfind('=') {
        Some(index) => {
            let suffix = &rest[index + 1..];
            let mut letters = suffix.chars();
            let letter = letters.next().ok_or_else(|| {
                ChessError::illegal_notation(format!("missing promotion letter in '{body}'"))
            })?;
            if letters.next().is_some() {
                return Err(ChessError::illegal_notation(format!(
                    "invalid promotion suffix in '{body}'"
                )));
            }
            let kind = PieceKind::from_san_letter(letter.to_ascii_uppercase())
                .filter(|kind| *kind != PieceKind::King)
                .ok_or_else(|| {
                    ChessError::illegal_notation(format!(
                        "invalid promotion letter '{letter}' in '{body}'"
                    ))
                })?;
            rest = &rest[..index];
            Some(kind)
        }
        None => None,
    };

    if rest.len() < 2 {
        return Err(ChessError::illegal_notation(format!(
            "SAN move '{body}' is too short"
        )));
    }
    let destination = Position::from_algebraic(&rest[rest.len() - 2..])?;
    let mut head = &rest[..rest.len() - 2];

    let kind = match head.chars().next().and_then(PieceKind::from_san_letter) {
        Some(kind) => {
            head = &head[1..];
            kind
        }
        None => PieceKind::Pawn,
    };

    if promotion.is_some() && kind != PieceKind::Pawn {
        return Err(ChessError::illegal_notation(format!(
            "only pawns may promote in '{body}'"
        )));
    }

    let ambiguity: String = head
        .chars()
        .filter(|ch| {
            if *ch == 'x' {
                *had_capture = true;
                false
            } else {
                true
            }
        })
        .collect();

    let mut candidates = Vec::new();
    for (position, piece) in game_state.board().occupied_squares() {
        if piece.color != game_state.turn() || piece.kind != kind {
            continue;
        }
        let candidate = match promotion {
            Some(promotion) => ChessMove::with_promotion(position, destination, promotion)?,
            None => ChessMove::new(position, destination),
        };
        if game_state.is_move_legal(&candidate) {
            candidates.push(candidate);
        }
    }

    let resolved: Vec<ChessMove> = match ambiguity.len() {
        0 => candidates,
        1 => {
            let Some(marker) = ambiguity.chars().next() else {
                return Err(ChessError::illegal_notation(format!(
                    "unparseable SAN move '{body}'"
                )));
            };
            if marker.is_ascii_digit() {
                candidates
                    .into_iter()
                    .filter(|candidate| candidate.from.rank_char() == marker)
                    .collect()
            } else if ('a'..='h').contains(&marker) {
                candidates
                    .into_iter()
                    .filter(|candidate| candidate.from.file_char() == marker)
                    .collect()
            } else {
                return Err(ChessError::illegal_notation(format!(
                    "invalid disambiguation character '{marker}' in '{body}'"
                )));
            }
        }
        2 => {
            let source = Position::from_algebraic(&ambiguity)?;
            candidates
                .into_iter()
                .filter(|candidate| candidate.from == source)
                .collect()
        }
        _ => {
            return Err(ChessError::illegal_notation(format!(
                "unparseable SAN move '{body}'"
            )))
        }
    };

    match resolved.as_slice() {
        [single] => Ok(*single),
        [] => Err(ChessError::illegal_notation(format!(
            "'{body}' does not match any legal move"
        ))),
        _ => Err(ChessError::illegal_notation(format!(
            "'{body}' is ambiguous"
        ))),
    }
}
