use crate::{
    IllegalMoveError, InvalidBoardSelectionError, MalformedSnapshotError,
    core::{Coord, Move, Outcome, Side, SuperBoard},
};

use super::snapshot::GameSnapshot;

/// A game in progress: the live board plus turn bookkeeping.
///
/// The player (`O`) moves first. Every accepted move redirects play: the
/// move's cell coordinates become the next active sub-board. When the
/// designated sub-board is won or full, the mover first selects any playable
/// sub-board with [`Game::select_board`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: SuperBoard,
    active: Coord,
    to_move: Side,
    last_move: Option<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a fresh game: empty board, active sub-board (0, 0), player to move.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: SuperBoard::EMPTY,
            active: Coord::ALL[0],
            to_move: Side::Player,
            last_move: None,
        }
    }

    /// Restores a game from a snapshot after structural validation.
    pub fn restore(snapshot: GameSnapshot) -> Result<Self, MalformedSnapshotError> {
        let GameSnapshot {
            board,
            active,
            last_move,
            to_move,
        } = snapshot;

        if let Some(mv) = last_move
            && board.cell(mv).side() != Some(to_move.opponent())
        {
            return Err(MalformedSnapshotError::InconsistentLastMove {
                mv,
                expected: to_move.opponent(),
            });
        }

        Ok(Self {
            board,
            active,
            to_move,
            last_move,
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            active: self.active,
            last_move: self.last_move,
            to_move: self.to_move,
        }
    }

    #[must_use]
    pub fn board(&self) -> &SuperBoard {
        &self.board
    }

    /// Mutable access to the live board for in-place hypothetical exploration.
    ///
    /// Callers must leave the board exactly as they found it; use
    /// [`SuperBoard::place`] so every mark is undone on drop.
    pub fn board_mut(&mut self) -> &mut SuperBoard {
        &mut self.board
    }

    /// The sub-board the side to move must play in.
    #[must_use]
    pub fn active(&self) -> Coord {
        self.active
    }

    #[must_use]
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    /// Returns `true` if the designated sub-board is won or full and the mover
    /// must pick another one before playing.
    #[must_use]
    pub fn needs_board_selection(&self) -> bool {
        self.outcome().is_in_progress() && !self.board.sub_board(self.active).is_playable()
    }

    /// Overrides the active sub-board when the designated one is unplayable.
    pub fn select_board(&mut self, row: usize, col: usize) -> Result<Coord, InvalidBoardSelectionError> {
        let at = Coord::new(row, col).map_err(InvalidBoardSelectionError::OutOfRange)?;
        if !self.needs_board_selection() {
            return Err(InvalidBoardSelectionError::DesignatedPlayable {
                designated: self.active,
            });
        }
        if !self.board.sub_board(at).is_playable() {
            return Err(InvalidBoardSelectionError::Unplayable { board: at });
        }
        self.active = at;
        Ok(at)
    }

    /// Checks whether the side to move may play cell `(row, col)` of the
    /// active sub-board, returning the full move if so.
    pub fn check_move(&self, row: usize, col: usize) -> Result<Move, IllegalMoveError> {
        let cell = Coord::new(row, col).map_err(IllegalMoveError::OutOfRange)?;
        if !self.outcome().is_in_progress() {
            return Err(IllegalMoveError::GameOver);
        }
        if !self.board.sub_board(self.active).is_playable() {
            return Err(IllegalMoveError::BoardUnplayable { board: self.active });
        }
        let mv = Move::new(self.active, cell);
        if !self.board.cell(mv).is_empty() {
            return Err(IllegalMoveError::CellOccupied { mv });
        }
        Ok(mv)
    }

    /// Plays cell `(row, col)` of the active sub-board for the side to move.
    ///
    /// Returns the new active-board pointer (the cell's coordinates).
    pub fn play(&mut self, row: usize, col: usize) -> Result<Coord, IllegalMoveError> {
        let mv = self.check_move(row, col)?;
        self.board.set_cell(mv, self.to_move);
        self.last_move = Some(mv);
        self.active = mv.cell;
        self.to_move = self.to_move.opponent();
        Ok(self.active)
    }
}
