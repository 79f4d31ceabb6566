//! Move search and advice for Ultimate Tic-Tac-Toe.
//!
//! This crate layers three components over the board model in `uttt-engine`:
//!
//! 1. **Board Evaluation** ([`board_evaluator`]) - Static material score used at
//!    the search horizon.
//!
//! 2. **Search** ([`search`]) - Depth-bounded minimax with alpha-beta pruning and
//!    depth-weighted terminal scores.
//!
//! 3. **Move Advice** ([`move_advisor`]) - Scores every candidate in the active
//!    sub-board, penalizes moves that hand the opponent an immediate sub-board
//!    win ([`danger`]), and normalizes the result for presentation.
//!
//! # Architecture
//!
//! ```text
//! Move Advice (rank candidates)
//!     ↓ uses                ↓ uses
//! Search (minimax)      Danger (one-ply look-ahead)
//!     ↓ uses
//! Board Evaluation (material)
//! ```
//!
//! # Board Ownership
//!
//! Nothing here copies the board. Every component borrows the caller's live
//! [`SuperBoard`](uttt_engine::SuperBoard) mutably, places hypothetical marks
//! through guards, and hands it back unchanged. The whole crate is
//! single-threaded and synchronous.

pub mod board_evaluator;
pub mod danger;
pub mod move_advisor;
pub mod search;

pub use self::{
    move_advisor::{Advice, CandidateReport, MoveAdvisor, RawScore, advise_with, best_move_with_details},
    search::{ActiveBoard, SearchError, SearchPreset, Searcher},
};
