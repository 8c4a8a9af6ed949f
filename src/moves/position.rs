//! Board coordinates and algebraic square conversions.
//!
//! Converts between human-readable square names (e.g., `e4`) and the
//! validated `(file, rank)` value type reused by FEN/SAN/PGN components.

use serde::{Deserialize, Serialize};

use crate::chess_errors::ChessError;

/// A validated square on the 8x8 board.
///
/// Both coordinates are guaranteed to lie in `0..=7`; construction with an
/// out-of-range coordinate fails with `ChessError::IllegalPosition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    file: u8,
    rank: u8,
}

impl Position {
    pub fn new(file: u8, rank: u8) -> Result<Self, ChessError> {
        if file > 7 || rank > 7 {
            return Err(ChessError::illegal_position(format!(
                "file {file} / rank {rank} outside the 0..=7 board range"
            )));
        }
        Ok(Position { file, rank })
    }

    /// Parse a square name such as "e4" into a position.
    pub fn from_algebraic(square: &str) -> Result<Self, ChessError> {
        let bytes = square.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::illegal_notation(format!(
                "invalid algebraic square: {square}"
            )));
        }

        let file = bytes[0];
        let rank = bytes[1];

        if !(b'a'..=b'h').contains(&file) {
            return Err(ChessError::illegal_notation(format!(
                "invalid algebraic file: {}",
                file as char
            )));
        }
        if !(b'1'..=b'8').contains(&rank) {
            return Err(ChessError::illegal_notation(format!(
                "invalid algebraic rank: {}",
                rank as char
            )));
        }

        Ok(Position {
            file: file - b'a',
            rank: rank - b'1',
        })
    }

    /// Render the square name, "a1" through "h8".
    pub fn to_algebraic(self) -> String {
        let file_char = char::from(b'a' + self.file);
        let rank_char = char::from(b'1' + self.rank);
        format!("{file_char}{rank_char}")
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    pub fn file_char(self) -> char {
        char::from(b'a' + self.file)
    }

    #[inline]
    pub fn rank_char(self) -> char {
        char::from(b'1' + self.rank)
    }

    /// The 180-degree rotated square, used for board-perspective flipping.
    #[inline]
    pub const fn inverse(self) -> Self {
        Position {
            file: 7 - self.file,
            rank: 7 - self.rank,
        }
    }

    /// Offset by a file/rank delta, returning `None` when the result would
    /// leave the board.
    pub(crate) fn offset(self, d_file: i8, d_rank: i8) -> Option<Self> {
        let file = self.file as i8 + d_file;
        let rank = self.rank as i8 + d_rank;
        if (0..=7).contains(&file) && (0..=7).contains(&rank) {
            Some(Position {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::chess_errors::ChessError;

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(
            Position::from_algebraic("a1").expect("a1 should parse"),
            Position::new(0, 0).expect("0,0 should construct")
        );
        assert_eq!(
            Position::from_algebraic("h8").expect("h8 should parse"),
            Position::new(7, 7).expect("7,7 should construct")
        );
        assert_eq!(
            Position::from_algebraic("e4")
                .expect("e4 should parse")
                .to_algebraic(),
            "e4"
        );
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let err = Position::new(8, 0).expect_err("file 8 should fail");
        assert!(matches!(err, ChessError::IllegalPosition(_)));
        assert!(Position::from_algebraic("i1").is_err());
        assert!(Position::from_algebraic("a9").is_err());
        assert!(Position::from_algebraic("e44").is_err());
    }

    #[test]
    fn inverse_rotates_the_board() {
        let a1 = Position::from_algebraic("a1").expect("a1 should parse");
        assert_eq!(a1.inverse().to_algebraic(), "h8");
        let e4 = Position::from_algebraic("e4").expect("e4 should parse");
        assert_eq!(e4.inverse().to_algebraic(), "d5");
    }
}
