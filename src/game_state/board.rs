//! 8x8 board grid, attack scanning, and move execution.
//!
//! The board owns the piece grid, the en-passant target, and the castling
//! rights record; it knows nothing about turns, clocks, or history. All
//! mutation during play funnels through `execute_move`, which dispatches to
//! the piece-specific special-move hooks before the generic relocation.

use crate::chess_errors::ChessError;
use crate::game_state::castling_rights::CastlingRights;
use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::moves::bishop_moves::is_bishop_move_valid;
use crate::moves::chess_move::ChessMove;
use crate::moves::king_moves::{is_king_move_valid, king_special_move_execution};
use crate::moves::knight_moves::is_knight_move_valid;
use crate::moves::pawn_moves::{is_pawn_move_valid, pawn_special_move_execution};
use crate::moves::position::Position;
use crate::moves::queen_moves::is_queen_move_valid;
use crate::moves::rook_moves::{is_rook_move_valid, rook_special_move_execution};

/// Mutable board grid plus the board-level special-move state. Cloning is a
/// cheap fixed-size copy, which is what makes simulation-by-deep-copy viable
/// as the safety check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    // Indexed [rank][file].
    squares: [[Option<Piece>; 8]; 8],
    pub en_passant_target: Option<Position>,
    pub castling_rights: CastlingRights,
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
            en_passant_target: None,
            castling_rights: CastlingRights::none(),
        }
    }

    #[inline]
    pub fn piece_at(&self, position: Position) -> Option<Piece> {
        self.squares[position.rank() as usize][position.file() as usize]
    }

    #[inline]
    pub fn place(&mut self, position: Position, piece: Piece) {
        self.squares[position.rank() as usize][position.file() as usize] = Some(piece);
    }

    #[inline]
    pub fn remove(&mut self, position: Position) -> Option<Piece> {
        self.squares[position.rank() as usize][position.file() as usize].take()
    }

    /// Iterate every occupied square.
    pub fn occupied_squares(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(rank, row)| {
            row.iter().enumerate().filter_map(move |(file, piece)| {
                piece.map(|piece| {
                    let position = Position::new(file as u8, rank as u8)
                        .expect("grid indices are always on the board");
                    (position, piece)
                })
            })
        })
    }

    /// Locate the king of `color`.
    ///
    /// # Panics
    ///
    /// Panics when no king of that color exists: the board is corrupted and
    /// continuing would only produce nonsense answers.
    pub fn king_position(&self, color: Color) -> Position {
        self.occupied_squares()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(position, _)| position)
            .unwrap_or_else(|| panic!("board invariant violated: no {color:?} king on the board"))
    }

    /// Whether every square strictly between two aligned squares is empty.
    pub fn path_is_clear(&self, from: Position, to: Position) -> bool {
        let d_file = (to.file() as i8 - from.file() as i8).signum();
        let d_rank = (to.rank() as i8 - from.rank() as i8).signum();

        let mut current = from;
        loop {
            current = match current.offset(d_file, d_rank) {
                Some(square) => square,
                None => return false,
            };
            if current == to {
                return true;
            }
            if self.piece_at(current).is_some() {
                return false;
            }
        }
    }

    /// Generic rule applied before any piece-specific check: the destination
    /// must not hold a piece of the mover's own color.
    pub fn passes_generic_rules(&self, piece: Piece, chess_move: &ChessMove) -> bool {
        match self.piece_at(chess_move.to) {
            Some(target) => target.color != piece.color,
            None => true,
        }
    }

    /// Piece-kind dispatch for the movement rules.
    pub fn is_piece_specific_move_valid(&self, piece: Piece, chess_move: &ChessMove) -> bool {
        match piece.kind {
            PieceKind::Pawn => is_pawn_move_valid(chess_move, piece.color, self),
            PieceKind::Knight => is_knight_move_valid(chess_move, self),
            PieceKind::Bishop => is_bishop_move_valid(chess_move, self),
            PieceKind::Rook => is_rook_move_valid(chess_move, self),
            PieceKind::Queen => is_queen_move_valid(chess_move, self),
            PieceKind::King => is_king_move_valid(chess_move, piece.color, self),
        }
    }

    /// Legality of a move for a piece in isolation: generic capture rule
    /// plus the piece-specific rule. Says nothing about check safety or
    /// turn correctness.
    pub fn is_piece_move_valid(&self, piece: Piece, chess_move: &ChessMove) -> bool {
        self.passes_generic_rules(piece, chess_move)
            && self.is_piece_specific_move_valid(piece, chess_move)
    }

    /// Whether any piece of `attacker` color has a piece-specific-valid move
    /// onto `target`. Deliberately a full board scan over the movement
    /// rules themselves; this scan is the semantic definition of "attacked"
    /// and of check.
    pub fn is_attacked(&self, target: Position, attacker: Color) -> bool {
        self.occupied_squares().any(|(position, piece)| {
            piece.color == attacker
                && position != target
                && self.is_piece_specific_move_valid(piece, &ChessMove::new(position, target))
        })
    }

    /// Whether the king of `color` currently stands in check.
    pub fn is_king_in_check(&self, color: Color) -> bool {
        self.is_attacked(self.king_position(color), color.opposite())
    }

    /// Sole board mutation entry point for play and simulation: run the
    /// mover's special-move hook, then relocate the piece. Validation is
    /// the caller's job; a move that cannot be executed reports an error
    /// without any guarantee about partial hook effects, which is why
    /// callers simulate on a clone.
    pub fn execute_move(&mut self, chess_move: &ChessMove) -> Result<(), ChessError> {
        let piece = self
            .piece_at(chess_move.from)
            .ok_or_else(|| ChessError::illegal_move("no piece on the initial square"))?;

        match piece.kind {
            PieceKind::Pawn => pawn_special_move_execution(chess_move, self)?,
            PieceKind::King => king_special_move_execution(chess_move, self)?,
            PieceKind::Rook => rook_special_move_execution(chess_move, self),
            // Any other move implicitly ends en-passant eligibility.
            _ => self.en_passant_target = None,
        }

        if let Some(piece) = self.remove(chess_move.from) {
            self.place(chess_move.to, piece);
        }
        Ok(())
    }
}
