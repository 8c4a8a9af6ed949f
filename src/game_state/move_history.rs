//! Ordered move log with an undo/redo cursor.
//!
//! The cursor names the last replayed move; `None` is the initial position.
//! Appending while the cursor sits behind the end discards the abandoned
//! future, the classic truncation-on-branch behavior of undo stacks. Time
//! travel itself is driven by `GameState`, which replays from the initial
//! position rather than keeping snapshots.

use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<ChessMove>,
    cursor: Option<usize>,
}

impl MoveHistory {
    pub fn new() -> Self {
        MoveHistory {
            moves: Vec::new(),
            cursor: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn moves(&self) -> &[ChessMove] {
        &self.moves
    }

    /// Index of the last replayed move; `None` means the initial position.
    #[inline]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Whether the cursor sits at the newest recorded move.
    pub fn is_at_latest(&self) -> bool {
        match self.cursor {
            None => self.moves.is_empty(),
            Some(index) => index + 1 == self.moves.len(),
        }
    }

    /// Append a move at the cursor, discarding any future tail first.
    pub fn push(&mut self, chess_move: ChessMove) {
        let keep = match self.cursor {
            None => 0,
            Some(index) => index + 1,
        };
        self.moves.truncate(keep);
        self.moves.push(chess_move);
        self.cursor = Some(self.moves.len() - 1);
    }

    /// Move the cursor one step toward the initial position. Returns the
    /// new cursor, or `None` when already at the initial position.
    pub(crate) fn rewound_cursor(&self) -> Option<Option<usize>> {
        match self.cursor {
            None => None,
            Some(0) => Some(None),
            Some(index) => Some(Some(index - 1)),
        }
    }

    /// Move the cursor one step toward the newest move. Returns the new
    /// cursor, or `None` when already at the latest entry.
    pub(crate) fn advanced_cursor(&self) -> Option<Option<usize>> {
        if self.is_at_latest() {
            return None;
        }
        match self.cursor {
            None => Some(Some(0)),
            Some(index) => Some(Some(index + 1)),
        }
    }

    pub(crate) fn set_cursor(&mut self, cursor: Option<usize>) {
        debug_assert!(cursor.map_or(true, |index| index < self.moves.len()));
        self.cursor = cursor;
    }
}

#[cfg(test)]
mod tests {
    use super::MoveHistory;
    use crate::moves::chess_move::ChessMove;
    use crate::moves::position::Position;

    fn mv(from: &str, to: &str) -> ChessMove {
        ChessMove::new(
            Position::from_algebraic(from).expect("from should parse"),
            Position::from_algebraic(to).expect("to should parse"),
        )
    }

    #[test]
    fn push_tracks_the_cursor() {
        let mut history = MoveHistory::new();
        assert!(history.is_at_latest());

        history.push(mv("e2", "e4"));
        history.push(mv("e7", "e5"));
        assert_eq!(history.cursor(), Some(1));
        assert!(history.is_at_latest());
    }

    #[test]
    fn pushing_while_rewound_discards_the_future() {
        let mut history = MoveHistory::new();
        history.push(mv("e2", "e4"));
        history.push(mv("e7", "e5"));
        history.push(mv("g1", "f3"));

        history.set_cursor(Some(0));
        assert!(!history.is_at_latest());

        history.push(mv("d7", "d5"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.moves()[1], mv("d7", "d5"));
        assert!(history.is_at_latest());
    }

    #[test]
    fn pushing_from_the_initial_cursor_replaces_everything() {
        let mut history = MoveHistory::new();
        history.push(mv("e2", "e4"));
        history.push(mv("e7", "e5"));

        history.set_cursor(None);
        history.push(mv("d2", "d4"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.moves()[0], mv("d2", "d4"));
    }

    #[test]
    fn cursor_stepping_stops_at_both_ends() {
        let mut history = MoveHistory::new();
        assert_eq!(history.rewound_cursor(), None);
        assert_eq!(history.advanced_cursor(), None);

        history.push(mv("e2", "e4"));
        assert_eq!(history.rewound_cursor(), Some(None));

        history.set_cursor(None);
        assert_eq!(history.advanced_cursor(), Some(Some(0)));
        history.set_cursor(Some(0));
        assert_eq!(history.advanced_cursor(), None);
    }
}
