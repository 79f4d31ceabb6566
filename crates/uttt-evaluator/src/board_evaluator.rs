//! Static evaluation of non-terminal positions.
//!
//! The search engine falls back to [`evaluate`] when its depth budget runs out
//! before the game is decided.
//!
//! # Design: Material Count
//!
//! The score is pure material: each player mark counts `+1`, each opponent
//! mark `-1`, summed over all nine sub-boards.
//!
//! **Limitations:**
//!
//! - No positional weighting (center and corner cells count the same as edges)
//! - Won sub-boards are worth no more than the marks inside them
//! - Scores are not on the same scale as terminal scores (`±(10 - depth)`), so
//!   a material-rich leaf can outrank a distant forced win

use uttt_engine::{Cell, SubBoard, SuperBoard};

/// Scores `board` from the player's point of view (higher is better for `O`).
#[must_use]
pub fn evaluate(board: &SuperBoard) -> i32 {
    board.sub_boards().map(|(_, sub)| material(sub)).sum()
}

fn material(sub: &SubBoard) -> i32 {
    sub.cells()
        .map(|(_, cell)| match cell {
            Cell::Player => 1,
            Cell::Opponent => -1,
            Cell::Empty => 0,
        })
        .sum()
}
