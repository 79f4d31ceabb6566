use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uttt_engine::GameSnapshot;

/// A game written by the `save` command of an interactive session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedGame {
    /// Timestamp when the game was saved (ISO 8601 format)
    pub saved_at: DateTime<Utc>,
    /// Board, active sub-board, last move and side to move
    pub game: GameSnapshot,
}
