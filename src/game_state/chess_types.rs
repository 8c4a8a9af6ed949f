//! Core piece and result types shared across the engine.
//!
//! Colors, piece kinds, and the terminal-result enum live here so board,
//! move, and notation modules can agree on a single vocabulary.

use serde::{Deserialize, Serialize};

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// FEN side-to-move field character.
    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Pawn forward direction along the rank axis.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank on which this color's pieces start (kings, rooks).
    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

/// Piece kind; color is represented separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Uppercase SAN letter; pawns have no letter in SAN.
    pub const fn san_letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }

    pub fn from_san_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece as stored on the board. Position is implied by where the
/// board stores it; a piece never holds position state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    /// FEN board-field character: uppercase for White, lowercase for Black.
    pub fn fen_char(self) -> char {
        let ch = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else if ch.is_ascii_lowercase() {
            Color::Black
        } else {
            return None;
        };

        let kind = match ch.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };

        Some(Piece { kind, color })
    }
}

/// Terminal state of a game. Transitions are one-directional: once the
/// result leaves `Ongoing`, no further moves may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    Resignation { winner: Color },
    WinOnTime { winner: Color },
    DrawByAgreement,
}

impl GameResult {
    #[inline]
    pub const fn is_ongoing(self) -> bool {
        matches!(self, GameResult::Ongoing)
    }

    /// PGN result token; "*" marks a game still in progress.
    pub const fn pgn_token(self) -> &'static str {
        match self {
            GameResult::Ongoing => "*",
            GameResult::Checkmate { winner }
            | GameResult::Resignation { winner }
            | GameResult::WinOnTime { winner } => match winner {
                Color::White => "1-0",
                Color::Black => "0-1",
            },
            GameResult::Stalemate
            | GameResult::FiftyMoveRule
            | GameResult::ThreefoldRepetition
            | GameResult::DrawByAgreement => "1/2-1/2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, GameResult, Piece, PieceKind};

    #[test]
    fn fen_characters_round_trip() {
        let white_knight = Piece::new(PieceKind::Knight, Color::White);
        assert_eq!(white_knight.fen_char(), 'N');
        assert_eq!(Piece::from_fen_char('N'), Some(white_knight));

        let black_pawn = Piece::new(PieceKind::Pawn, Color::Black);
        assert_eq!(black_pawn.fen_char(), 'p');
        assert_eq!(Piece::from_fen_char('p'), Some(black_pawn));

        assert_eq!(Piece::from_fen_char('x'), None);
    }

    #[test]
    fn result_tokens_match_winner() {
        assert_eq!(GameResult::Ongoing.pgn_token(), "*");
        assert_eq!(
            GameResult::Checkmate {
                winner: Color::White
            }
            .pgn_token(),
            "1-0"
        );
        assert_eq!(
            GameResult::Resignation {
                winner: Color::Black
            }
            .pgn_token(),
            "0-1"
        );
        assert_eq!(GameResult::Stalemate.pgn_token(), "1/2-1/2");
    }
}
