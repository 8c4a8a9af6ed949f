//! The move value type submitted to the game pipeline.
//!
//! A `ChessMove` is an immutable `(from, to, promotion)` triple with
//! structural equality; it carries no board knowledge of its own.

use serde::{Deserialize, Serialize};

use crate::chess_errors::ChessError;
use crate::game_state::chess_types::PieceKind;
use crate::moves::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessMove {
    pub from: Position,
    pub to: Position,
    pub promotion: Option<PieceKind>,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Position, to: Position) -> Self {
        ChessMove {
            from,
            to,
            promotion: None,
        }
    }

    /// Construct a promoting move. Only queen, rook, bishop, and knight are
    /// valid promotion targets; king and pawn fail.
    pub fn with_promotion(
        from: Position,
        to: Position,
        promotion: PieceKind,
    ) -> Result<Self, ChessError> {
        match promotion {
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight => {
                Ok(ChessMove {
                    from,
                    to,
                    promotion: Some(promotion),
                })
            }
            PieceKind::King | PieceKind::Pawn => Err(ChessError::illegal_move(format!(
                "{promotion:?} is not a valid promotion target"
            ))),
        }
    }

    /// Signed file delta from source to destination.
    #[inline]
    pub(crate) fn file_delta(&self) -> i8 {
        self.to.file() as i8 - self.from.file() as i8
    }

    /// Signed rank delta from source to destination.
    #[inline]
    pub(crate) fn rank_delta(&self) -> i8 {
        self.to.rank() as i8 - self.from.rank() as i8
    }
}

#[cfg(test)]
mod tests {
    use super::ChessMove;
    use crate::game_state::chess_types::PieceKind;
    use crate::moves::position::Position;

    fn square(name: &str) -> Position {
        Position::from_algebraic(name).expect("square should parse")
    }

    #[test]
    fn equality_is_structural() {
        let a = ChessMove::new(square("e2"), square("e4"));
        let b = ChessMove::new(square("e2"), square("e4"));
        assert_eq!(a, b);

        let promoted = ChessMove::with_promotion(square("e7"), square("e8"), PieceKind::Queen)
            .expect("queen promotion should construct");
        assert_ne!(a, promoted);
    }

    #[test]
    fn king_and_pawn_promotions_are_rejected() {
        assert!(ChessMove::with_promotion(square("e7"), square("e8"), PieceKind::King).is_err());
        assert!(ChessMove::with_promotion(square("e7"), square("e8"), PieceKind::Pawn).is_err());
        assert!(ChessMove::with_promotion(square("e7"), square("e8"), PieceKind::Knight).is_ok());
    }
}
