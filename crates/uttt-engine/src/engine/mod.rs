//! Game state on top of the board model.
//!
//! - [`Game`] - the live game: board, active-board pointer, side to move, last move
//! - [`GameSnapshot`] - restorable, serializable copy of a [`Game`]
//!
//! # Game Flow
//!
//! 1. Create a [`Game`] (or restore one from a [`GameSnapshot`])
//! 2. If [`Game::needs_board_selection`], the mover picks any playable sub-board
//!    with [`Game::select_board`]
//! 3. The mover plays a cell of the active sub-board with [`Game::play`]; the
//!    cell's coordinates become the next active sub-board
//! 4. Repeat until [`Game::outcome`] is no longer in progress
//!
//! # Example
//!
//! ```
//! use uttt_engine::{Coord, Game, Outcome};
//!
//! let mut game = Game::new();
//! let next = game.play(1, 2).unwrap();
//! assert_eq!(next, Coord::new(1, 2).unwrap());
//! assert_eq!(game.outcome(), Outcome::InProgress);
//!
//! // The opponent must now play in sub-board (1, 2).
//! assert!(game.play(0, 0).is_ok());
//! ```

pub use self::{game::*, snapshot::*};

mod game;
mod snapshot;
