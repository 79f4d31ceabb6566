//! Board model and game state for Ultimate Tic-Tac-Toe.
//!
//! The board is a 3×3 grid of 3×3 sub-boards. A move's cell coordinates
//! decide which sub-board the opponent must play in next; a sub-board that is
//! already won or full cannot be played, and the mover then picks any playable
//! one instead. Three won sub-boards in a line win the game.
//!
//! - [`core`]: cells, coordinates, [`SubBoard`], [`SuperBoard`], [`Outcome`]
//! - [`engine`]: [`Game`] (turn bookkeeping and legality) and [`GameSnapshot`]

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A move rejected by [`Game::check_move`] or [`Game::play`].
///
/// Not fatal: the caller reports it and asks for another move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum IllegalMoveError {
    #[display("{_0}")]
    OutOfRange(CoordOutOfRangeError),
    #[display("the game is already over")]
    GameOver,
    #[display("sub-board {board} is already won or full")]
    BoardUnplayable { board: Coord },
    #[display("cell {mv} is already occupied")]
    CellOccupied { mv: Move },
}

/// An alternate sub-board choice rejected by [`Game::select_board`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidBoardSelectionError {
    #[display("{_0}")]
    OutOfRange(CoordOutOfRangeError),
    #[display("sub-board {board} is already won or full")]
    Unplayable { board: Coord },
    #[display("sub-board {designated} is still playable and must be used")]
    DesignatedPlayable { designated: Coord },
}

/// Snapshot data that fails structural validation in [`Game::restore`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MalformedSnapshotError {
    #[display("last move {mv} does not hold a mark of {expected}")]
    InconsistentLastMove { mv: Move, expected: Side },
}
