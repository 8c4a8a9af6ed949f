//! PGN read/write utilities for game interchange.
//!
//! Serializes a game's headers and SAN movetext to PGN and parses PGN back
//! into a replayed `GameState`. The trailing result token is validated
//! against the replayed game: a decisive or drawn token must match the
//! computed result, and `*` (or no token at all) requires the game to still
//! be ongoing.

use std::collections::BTreeMap;

use chrono::Local;
use tracing::debug;

use crate::chess_errors::ChessError;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::game_state::GameState;
use crate::utils::standard_algebraic::move_to_standard_algebraic;

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub game: GameState,
    pub result_token: String,
}

pub fn write_pgn(game: &GameState) -> Result<String, ChessError> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Casual game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert(
        "Date".to_owned(),
        Local::now().format("%Y.%m.%d").to_string(),
    );
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), game.result().pgn_token().to_owned());

    if game.initial_fen() != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), game.initial_fen().to_owned());
    }

    write_pgn_with_headers(game, &headers)
}

pub fn write_pgn_with_headers(
    game: &GameState,
    headers: &BTreeMap<String, String>,
) -> Result<String, ChessError> {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    // Re-encode the movetext by replaying from the initial position, since
    // SAN disambiguation and suffixes depend on the position of each ply.
    let mut replayed = GameState::from_fen(game.initial_fen())?;
    let mut movetext_parts = Vec::<String>::with_capacity(game.history().len() + 1);
    for (ply, chess_move) in game.history().moves().iter().enumerate() {
        let san = move_to_standard_algebraic(chess_move, &replayed)?;
        if ply % 2 == 0 {
            movetext_parts.push(format!("{}. {}", (ply / 2) + 1, san));
        } else {
            movetext_parts.push(san);
        }
        replayed.apply_move(*chess_move)?;
    }

    movetext_parts.push(game.result().pgn_token().to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    Ok(out)
}

pub fn read_pgn(pgn: &str) -> Result<PgnGame, ChessError> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<String>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (key, value) = parse_header_line(trimmed)?;
            headers.insert(key, value);
        } else {
            movetext_lines.push(trimmed.to_owned());
        }
    }

    let mut game = if headers.get("SetUp").map(String::as_str) == Some("1") {
        let fen = headers.get("FEN").ok_or_else(|| {
            ChessError::illegal_notation("PGN SetUp=1 is present but the FEN header is missing")
        })?;
        GameState::from_fen(fen)?
    } else {
        GameState::new_game()
    };

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    let mut result_token: Option<String> = None;

    for token in movetext.split_whitespace() {
        if result_token.is_some() {
            return Err(ChessError::illegal_notation(format!(
                "movetext continues after the result token: {token}"
            )));
        }

        let Some(cleaned) = strip_move_number_prefix(token) else {
            continue;
        };
        let cleaned = cleaned.trim_end_matches(['!', '?']);

        if is_result_token(cleaned) {
            result_token = Some(cleaned.to_owned());
            continue;
        }

        game.apply_standard_algebraic(cleaned)?;
    }

    let result_token = validate_result_token(result_token, &game)?;

    debug!(
        plies = game.history().len(),
        result = %result_token,
        "imported PGN game"
    );

    Ok(PgnGame {
        headers,
        game,
        result_token,
    })
}

/// A decisive or drawn token must match the replayed result; `*` (or a
/// missing token) requires the game to still be ongoing.
fn validate_result_token(
    token: Option<String>,
    game: &GameState,
) -> Result<String, ChessError> {
    let computed = game.result().pgn_token();
    match token {
        Some(token) => {
            if token != computed {
                return Err(ChessError::illegal_notation(format!(
                    "result token '{token}' does not match the replayed result '{computed}'"
                )));
            }
            Ok(token)
        }
        None => {
            if computed != "*" {
                return Err(ChessError::illegal_notation(format!(
                    "movetext ends without the terminal result token '{computed}'"
                )));
            }
            Ok("*".to_owned())
        }
    }
}

fn parse_header_line(line: &str) -> Result<(String, String), ChessError> {
    if !line.starts_with('[') || !line.ends_with(']') {
        return Err(ChessError::illegal_notation(format!(
            "invalid PGN header line: {line}"
        )));
    }
    let inner = &line[1..line.len() - 1];
    let mut parts = inner.splitn(2, ' ');
    let key = parts
        .next()
        .ok_or_else(|| ChessError::illegal_notation(format!("invalid PGN header key: {line}")))?
        .trim();
    let value_raw = parts
        .next()
        .ok_or_else(|| ChessError::illegal_notation(format!("invalid PGN header value: {line}")))?
        .trim();

    if !value_raw.starts_with('"') || !value_raw.ends_with('"') || value_raw.len() < 2 {
        return Err(ChessError::illegal_notation(format!(
            "invalid quoted PGN header value: {line}"
        )));
    }
    let value = value_raw[1..value_raw.len() - 1].replace("\\\"", "\"");
    Ok((key.to_owned(), value))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

/// Drop a leading "1." / "3..." move-number prefix, returning what remains
/// (tokens like "1.e4" keep their move). `None` means the whole token was a
/// move number.
fn strip_move_number_prefix(token: &str) -> Option<&str> {
    let digits = token.chars().take_while(|ch| ch.is_ascii_digit()).count();
    if digits == 0 {
        return Some(token);
    }
    let after_digits = &token[digits..];
    let dots = after_digits.chars().take_while(|ch| *ch == '.').count();
    if dots == 0 {
        // Bare digits are a result fragment or garbage, not a move number.
        return Some(token);
    }
    let rest = &after_digits[dots..];
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::{read_pgn, write_pgn, write_pgn_with_headers};
    use std::collections::BTreeMap;

    use crate::game_state::chess_types::{Color, GameResult};
    use crate::game_state::game_state::GameState;

    fn play(game: &mut GameState, moves: &[&str]) {
        for lan in moves {
            game.apply_long_algebraic(lan)
                .unwrap_or_else(|err| panic!("{lan} should apply: {err}"));
        }
    }

    #[test]
    fn pgn_round_trips_an_ongoing_game() {
        let mut game = GameState::new_game();
        play(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6"]);

        let pgn = write_pgn(&game).expect("PGN should write");
        assert!(pgn.contains("1. e4 e5 2. Nf3 Nc6 *"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.game.fen(), game.fen());
        assert_eq!(parsed.result_token, "*");
    }

    #[test]
    fn pgn_round_trips_a_checkmate_with_its_result_token() {
        let mut game = GameState::new_game();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

        let pgn = write_pgn(&game).expect("PGN should write");
        assert!(pgn.contains("1. f3 e5 2. g4 Qh4# 0-1"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(
            parsed.game.result(),
            GameResult::Checkmate {
                winner: Color::Black
            }
        );
        assert_eq!(parsed.result_token, "0-1");
    }

    #[test]
    fn pgn_round_trips_a_custom_fen_setup() {
        let mut game =
            GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        play(&mut game, &["e2e4"]);

        let mut headers = BTreeMap::<String, String>::new();
        headers.insert("Event".to_owned(), "Custom".to_owned());
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), game.initial_fen().to_owned());

        let pgn = write_pgn_with_headers(&game, &headers).expect("PGN should write");
        let parsed = read_pgn(&pgn).expect("PGN should parse");

        assert_eq!(parsed.game.initial_fen(), game.initial_fen());
        assert_eq!(parsed.game.fen(), game.fen());
    }

    #[test]
    fn comments_variations_and_glued_move_numbers_are_tolerated() {
        let pgn = "[Event \"Annotated\"]\n\n1.e4 {a comment} e5 (1... c5 2. Nf3) 2.Nf3 Nc6 *\n";
        let parsed = read_pgn(pgn).expect("PGN should parse");
        assert_eq!(parsed.game.history().len(), 4);
    }

    #[test]
    fn mismatched_result_tokens_are_rejected() {
        // The game is ongoing, so a decisive token cannot stand.
        assert!(read_pgn("1. e4 e5 1-0\n").is_err());

        // Fool's mate must carry its 0-1 token, not "*" and not nothing.
        assert!(read_pgn("1. f3 e5 2. g4 Qh4# *\n").is_err());
        assert!(read_pgn("1. f3 e5 2. g4 Qh4#\n").is_err());
        assert!(read_pgn("1. f3 e5 2. g4 Qh4# 0-1\n").is_ok());

        // Nothing may follow the result token.
        assert!(read_pgn("1. e4 * e5\n").is_err());
    }

    #[test]
    fn illegal_movetext_is_rejected() {
        assert!(read_pgn("1. e5 *\n").is_err());
        assert!(read_pgn("[SetUp \"1\"]\n\n1. e4 *\n").is_err());
    }
}
