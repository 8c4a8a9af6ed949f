//! Central game model and the sole mutation entry point for legal play.
//!
//! `GameState` owns a board plus the game-level concepts the board does
//! not: side to move, clocks, terminal result, repetition counts, and the
//! move history. Every mutating path funnels through `apply_move`, which
//! re-derives legality, executes on the board, and recomputes the result.

use std::collections::HashMap;

use tracing::debug;

use crate::chess_errors::ChessError;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{
    HALFMOVE_DRAW_LIMIT, REPETITION_DRAW_COUNT, STARTING_POSITION_FEN,
};
use crate::game_state::chess_types::{Color, GameResult, PieceKind};
use crate::game_state::move_history::MoveHistory;
use crate::moves::chess_move::ChessMove;
use crate::moves::pawn_moves::{is_en_passant_capture, is_promotion_move, promotion_rank};
use crate::moves::position::Position;
use crate::utils::fen_generator::{generate_board_field, generate_fen};
use crate::utils::fen_parser::parse_fen;
use crate::utils::long_algebraic::long_algebraic_to_move;
use crate::utils::standard_algebraic::standard_algebraic_to_move;

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    turn: Color,
    halfmove_clock: u16,
    fullmove_number: u16,
    result: GameResult,
    position_counts: HashMap<String, u32>,
    history: MoveHistory,
    initial_fen: String,
}

impl GameState {
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        parse_fen(fen)
    }

    /// Assemble a state from parsed parts, seeding the repetition map with
    /// the starting signature and computing the position's result. Only the
    /// FEN parser builds states this way.
    pub(crate) fn from_parts(
        board: Board,
        turn: Color,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Self {
        let mut state = GameState {
            board,
            turn,
            halfmove_clock,
            fullmove_number,
            result: GameResult::Ongoing,
            position_counts: HashMap::new(),
            history: MoveHistory::new(),
            initial_fen: String::new(),
        };
        let signature = state.position_signature();
        state.position_counts.insert(signature, 1);
        state.initial_fen = generate_fen(&state);
        state.result = state.compute_result();
        state
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn result(&self) -> GameResult {
        self.result
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// FEN of the position the game started from.
    #[inline]
    pub fn initial_fen(&self) -> &str {
        &self.initial_fen
    }

    pub fn fen(&self) -> String {
        generate_fen(self)
    }

    /// Repetition signature of the current position: board layout plus the
    /// side to move.
    pub fn position_signature(&self) -> String {
        format!("{} {}", generate_board_field(&self.board), self.turn.fen_char())
    }

    /// Read-only legality probe; never raises.
    pub fn is_move_legal(&self, chess_move: &ChessMove) -> bool {
        self.check_move_legal(chess_move).is_ok()
    }

    /// The ordered legality pipeline, reporting the first failing
    /// precondition.
    pub fn check_move_legal(&self, chess_move: &ChessMove) -> Result<(), ChessError> {
        if !self.result.is_ongoing() {
            return Err(ChessError::illegal_move("the game is already over"));
        }

        let piece = self
            .board
            .piece_at(chess_move.from)
            .ok_or_else(|| ChessError::illegal_move("no piece on the initial square"))?;

        if !self.history.is_at_latest() {
            return Err(ChessError::illegal_move(
                "cannot play while the history cursor is behind the latest move",
            ));
        }

        if piece.color != self.turn {
            return Err(ChessError::illegal_move(format!(
                "it is not {:?}'s turn to move",
                piece.color
            )));
        }

        if !self.board.is_piece_move_valid(piece, chess_move) {
            return Err(ChessError::illegal_move(format!(
                "{:?} cannot make that move",
                piece.kind
            )));
        }
        self.check_promotion_field(piece.kind, piece.color, chess_move)?;

        if !self.is_move_safe(chess_move) {
            return Err(ChessError::illegal_move(
                "the move would leave the own king in check",
            ));
        }

        Ok(())
    }

    /// The promotion field must be present exactly when a pawn reaches the
    /// back rank, and only pawns may carry one.
    fn check_promotion_field(
        &self,
        kind: PieceKind,
        color: Color,
        chess_move: &ChessMove,
    ) -> Result<(), ChessError> {
        match kind {
            PieceKind::Pawn => {
                let promoting = is_promotion_move(chess_move, color);
                if promoting && chess_move.promotion.is_none() {
                    Err(ChessError::illegal_move(
                        "a pawn move to the back rank requires a promotion piece",
                    ))
                } else if !promoting && chess_move.promotion.is_some() {
                    Err(ChessError::illegal_move(
                        "promotion piece given for a move that does not promote",
                    ))
                } else {
                    Ok(())
                }
            }
            _ if chess_move.promotion.is_some() => {
                Err(ChessError::illegal_move("only pawns may promote"))
            }
            _ => Ok(()),
        }
    }

    /// Simulate the move on a deep-copied board and verify the mover's own
    /// king is not in check afterwards. Total and side-effect free; any
    /// execution fault counts as unsafe.
    pub fn is_move_safe(&self, chess_move: &ChessMove) -> bool {
        let Some(piece) = self.board.piece_at(chess_move.from) else {
            return false;
        };
        let mut simulation = self.board.clone();
        if simulation.execute_move(chess_move).is_err() {
            return false;
        }
        !simulation.is_king_in_check(piece.color)
    }

    /// Sole mutating entry point: re-derive legality, update clocks,
    /// execute on the board, flip the turn, record repetition and history,
    /// recompute the result. Validates fully before committing anything.
    pub fn apply_move(&mut self, chess_move: ChessMove) -> Result<(), ChessError> {
        self.check_move_legal(&chess_move)?;

        let piece = self
            .board
            .piece_at(chess_move.from)
            .ok_or_else(|| ChessError::illegal_move("no piece on the initial square"))?;
        let is_capture = self.board.piece_at(chess_move.to).is_some()
            || is_en_passant_capture(&chess_move, piece.color, &self.board);

        // Execute against a scratch copy first so a failure cannot leave
        // clocks or counters half-updated.
        let mut next_board = self.board.clone();
        next_board.execute_move(&chess_move)?;

        if self.turn == Color::Black {
            self.fullmove_number += 1;
        }
        if piece.kind == PieceKind::Pawn || is_capture {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        self.board = next_board;
        self.turn = self.turn.opposite();

        let signature = self.position_signature();
        *self.position_counts.entry(signature).or_insert(0) += 1;
        self.history.push(chess_move);
        self.result = self.compute_result();

        debug!(
            from = %chess_move.from.to_algebraic(),
            to = %chess_move.to.to_algebraic(),
            result = ?self.result,
            "applied move"
        );
        Ok(())
    }

    /// All legal moves for the piece standing on `from`, trying promotion
    /// to queen where a pawn would reach the back rank.
    pub fn get_legal_moves(&self, from: Position) -> Vec<ChessMove> {
        let piece = match self.board.piece_at(from) {
            Some(piece) => piece,
            None => return Vec::new(),
        };

        let mut legal = Vec::new();
        for rank in 0..8u8 {
            for file in 0..8u8 {
                let to = match Position::new(file, rank) {
                    Ok(to) => to,
                    Err(_) => continue,
                };
                let candidate = if piece.kind == PieceKind::Pawn
                    && to.rank() == promotion_rank(piece.color)
                {
                    match ChessMove::with_promotion(from, to, PieceKind::Queen) {
                        Ok(candidate) => candidate,
                        Err(_) => continue,
                    }
                } else {
                    ChessMove::new(from, to)
                };
                if self.is_move_legal(&candidate) {
                    legal.push(candidate);
                }
            }
        }
        legal
    }

    /// Every legal move for the side on move.
    pub fn all_legal_moves(&self) -> Vec<ChessMove> {
        self.board
            .occupied_squares()
            .filter(|(_, piece)| piece.color == self.turn)
            .flat_map(|(position, _)| self.get_legal_moves(position))
            .collect()
    }

    fn has_any_legal_reply(&self) -> bool {
        self.board
            .occupied_squares()
            .filter(|(_, piece)| piece.color == self.turn)
            .any(|(position, _)| !self.get_legal_moves(position).is_empty())
    }

    /// Result of the current position, checked in the mandated order:
    /// checkmate, stalemate, fifty-move rule, threefold repetition.
    fn compute_result(&self) -> GameResult {
        let any_replies = self.has_any_legal_reply();
        if !any_replies {
            return if self.board.is_king_in_check(self.turn) {
                GameResult::Checkmate {
                    winner: self.turn.opposite(),
                }
            } else {
                GameResult::Stalemate
            };
        }

        if self.halfmove_clock >= HALFMOVE_DRAW_LIMIT {
            return GameResult::FiftyMoveRule;
        }

        let signature = self.position_signature();
        let occurrences = self
            .position_counts
            .get(&signature)
            .copied()
            .unwrap_or(0);
        if occurrences >= REPETITION_DRAW_COUNT {
            return GameResult::ThreefoldRepetition;
        }

        GameResult::Ongoing
    }

    fn require_ongoing(&self) -> Result<(), ChessError> {
        if self.result.is_ongoing() {
            Ok(())
        } else {
            Err(ChessError::illegal_move("the game is already over"))
        }
    }

    pub fn resign(&mut self, color: Color) -> Result<(), ChessError> {
        self.require_ongoing()?;
        self.result = GameResult::Resignation {
            winner: color.opposite(),
        };
        debug!(result = ?self.result, "game resigned");
        Ok(())
    }

    pub fn win_on_time(&mut self, winner: Color) -> Result<(), ChessError> {
        self.require_ongoing()?;
        self.result = GameResult::WinOnTime { winner };
        debug!(result = ?self.result, "flag fell");
        Ok(())
    }

    pub fn agree_draw(&mut self) -> Result<(), ChessError> {
        self.require_ongoing()?;
        self.result = GameResult::DrawByAgreement;
        debug!("draw agreed");
        Ok(())
    }

    /// Step the history cursor one move toward the initial position.
    pub fn step_back(&mut self) -> Result<(), ChessError> {
        let cursor = self
            .history
            .rewound_cursor()
            .ok_or_else(|| ChessError::illegal_move("already at the initial position"))?;
        self.load_game_state_at(cursor)
    }

    /// Step the history cursor one move toward the latest move.
    pub fn step_forward(&mut self) -> Result<(), ChessError> {
        let cursor = self
            .history
            .advanced_cursor()
            .ok_or_else(|| ChessError::illegal_move("already at the latest move"))?;
        self.load_game_state_at(cursor)
    }

    /// Reconstruct the game at a history cursor (`None` is the initial
    /// position) by replaying every move up to and including it from the
    /// initial position. Replay keeps every derived detail honest at the
    /// cost of O(n) work per jump.
    pub fn load_game_state_at(&mut self, cursor: Option<usize>) -> Result<(), ChessError> {
        if let Some(index) = cursor {
            if index >= self.history.len() {
                return Err(ChessError::illegal_move(format!(
                    "history index {index} is out of range"
                )));
            }
        }

        let mut replayed = parse_fen(&self.initial_fen)?;
        if let Some(index) = cursor {
            for chess_move in &self.history.moves()[..=index] {
                replayed.apply_move(*chess_move)?;
            }
        }

        self.board = replayed.board;
        self.turn = replayed.turn;
        self.halfmove_clock = replayed.halfmove_clock;
        self.fullmove_number = replayed.fullmove_number;
        self.result = replayed.result;
        self.position_counts = replayed.position_counts;
        self.history.set_cursor(cursor);
        Ok(())
    }

    /// Parse and apply a long-algebraic move ("e2e4", "a7a8q").
    pub fn apply_long_algebraic(&mut self, text: &str) -> Result<ChessMove, ChessError> {
        let chess_move = long_algebraic_to_move(text, self)?;
        self.apply_move(chess_move)?;
        Ok(chess_move)
    }

    /// Parse and apply a SAN move ("Nf3", "bxc6", "O-O").
    pub fn apply_standard_algebraic(&mut self, text: &str) -> Result<ChessMove, ChessError> {
        let chess_move = standard_algebraic_to_move(text, self)?;
        self.apply_move(chess_move)?;
        Ok(chess_move)
    }

    /// String-based legality probe; never raises.
    pub fn is_long_algebraic_legal(&self, text: &str) -> bool {
        long_algebraic_to_move(text, self)
            .map(|chess_move| self.is_move_legal(&chess_move))
            .unwrap_or(false)
    }

    /// SAN legality probe; decoding already re-checks the whole pipeline.
    pub fn is_standard_algebraic_legal(&self, text: &str) -> bool {
        standard_algebraic_to_move(text, self).is_ok()
    }
}
