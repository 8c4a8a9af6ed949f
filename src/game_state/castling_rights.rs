//! Castling-rights record and its FEN round trip.
//!
//! Four independent booleans, white/black crossed with king/queen side.
//! During live play rights only ever move from granted to revoked; when a
//! board is reconstructed from FEN the claimed rights are re-verified
//! against actual king and rook placement.

use serde::{Deserialize, Serialize};

use crate::chess_errors::ChessError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::moves::position::Position;

/// Which wing a castle targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub const fn all() -> Self {
        CastlingRights {
            white_king_side: true,
            white_queen_side: true,
            black_king_side: true,
            black_queen_side: true,
        }
    }

    pub const fn none() -> Self {
        CastlingRights {
            white_king_side: false,
            white_queen_side: false,
            black_king_side: false,
            black_queen_side: false,
        }
    }

    pub fn is_granted(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => self.white_king_side,
            (Color::White, CastleSide::QueenSide) => self.white_queen_side,
            (Color::Black, CastleSide::KingSide) => self.black_king_side,
            (Color::Black, CastleSide::QueenSide) => self.black_queen_side,
        }
    }

    /// Revocation is one-directional; there is no way to re-grant a right.
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => self.white_king_side = false,
            (Color::White, CastleSide::QueenSide) => self.white_queen_side = false,
            (Color::Black, CastleSide::KingSide) => self.black_king_side = false,
            (Color::Black, CastleSide::QueenSide) => self.black_queen_side = false,
        }
    }

    pub fn revoke_both(&mut self, color: Color) {
        self.revoke(color, CastleSide::KingSide);
        self.revoke(color, CastleSide::QueenSide);
    }

    /// FEN castling field, letters in the fixed order `KQkq`, or "-".
    pub fn fen_field(&self) -> String {
        let mut out = String::new();
        if self.white_king_side {
            out.push('K');
        }
        if self.white_queen_side {
            out.push('Q');
        }
        if self.black_king_side {
            out.push('k');
        }
        if self.black_queen_side {
            out.push('q');
        }
        if out.is_empty() {
            out.push('-');
        }
        out
    }

    pub fn from_fen_field(field: &str) -> Result<Self, ChessError> {
        let mut rights = CastlingRights::none();
        if field == "-" {
            return Ok(rights);
        }
        if field.is_empty() {
            return Err(ChessError::illegal_notation(
                "empty castling rights field in FEN",
            ));
        }

        for ch in field.chars() {
            match ch {
                'K' => rights.white_king_side = true,
                'Q' => rights.white_queen_side = true,
                'k' => rights.black_king_side = true,
                'q' => rights.black_queen_side = true,
                _ => {
                    return Err(ChessError::illegal_notation(format!(
                        "invalid castling rights character: {ch}"
                    )))
                }
            }
        }

        Ok(rights)
    }

    /// Revoke any claimed right whose king is off its home square or whose
    /// corresponding rook is absent from its home square. Used when rights
    /// arrive from external notation rather than live play.
    pub fn verify_rights(&mut self, board: &Board) {
        for color in [Color::White, Color::Black] {
            let rank = color.home_rank();
            let king_home = Position::new(4, rank).expect("king home square is on the board");
            let king_at_home = board.piece_at(king_home) == Some(Piece::new(PieceKind::King, color));

            for (side, rook_file) in [(CastleSide::KingSide, 7u8), (CastleSide::QueenSide, 0u8)] {
                if !self.is_granted(color, side) {
                    continue;
                }
                let rook_home =
                    Position::new(rook_file, rank).expect("rook home square is on the board");
                let rook_at_home =
                    board.piece_at(rook_home) == Some(Piece::new(PieceKind::Rook, color));
                if !king_at_home || !rook_at_home {
                    self.revoke(color, side);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CastleSide, CastlingRights};
    use crate::game_state::chess_types::Color;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn fen_field_uses_fixed_letter_order() {
        assert_eq!(CastlingRights::all().fen_field(), "KQkq");
        assert_eq!(CastlingRights::none().fen_field(), "-");

        let mut rights = CastlingRights::all();
        rights.revoke(Color::White, CastleSide::QueenSide);
        rights.revoke(Color::Black, CastleSide::KingSide);
        assert_eq!(rights.fen_field(), "Kq");

        let parsed = CastlingRights::from_fen_field("Kq").expect("field should parse");
        assert_eq!(parsed, rights);
        assert!(CastlingRights::from_fen_field("Kx").is_err());
    }

    #[test]
    fn verify_rights_revokes_unbacked_claims() {
        // White king has left e1; the FEN still claims KQ.
        let game = parse_fen("r3k2r/8/8/8/8/8/8/R2K3R w KQkq - 0 1")
            .expect("FEN with displaced king should parse");
        let rights = game.board().castling_rights;
        assert!(!rights.white_king_side);
        assert!(!rights.white_queen_side);
        assert!(rights.black_king_side);
        assert!(rights.black_queen_side);
    }

    #[test]
    fn verify_rights_requires_the_matching_rook() {
        let game = parse_fen("r3k3/8/8/8/8/8/8/4K2R w KQkq - 0 1")
            .expect("FEN with missing rooks should parse");
        let rights = game.board().castling_rights;
        assert!(rights.white_king_side);
        assert!(!rights.white_queen_side);
        assert!(!rights.black_king_side);
        assert!(rights.black_queen_side);
    }
}
