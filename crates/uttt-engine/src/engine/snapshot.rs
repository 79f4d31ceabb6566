use serde::{Deserialize, Serialize};

use crate::core::{Coord, Move, Side, SuperBoard};

/// Everything needed to resume a [`Game`](super::Game).
///
/// Storage format and medium are up to the caller; the engine only requires
/// the data to be structurally valid, which [`Game::restore`](super::Game::restore)
/// checks.
///
/// # Example
///
/// ```
/// use uttt_engine::{Game, GameSnapshot};
///
/// let mut game = Game::new();
/// game.play(0, 1).unwrap();
///
/// let snapshot: GameSnapshot = game.snapshot();
/// let restored = Game::restore(snapshot).unwrap();
/// assert_eq!(restored, game);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Full board contents
    pub board: SuperBoard,
    /// Active-board pointer
    pub active: Coord,
    /// Last move played, if any
    pub last_move: Option<Move>,
    /// Side to move; files without this field resume with the player to move
    #[serde(default = "player_to_move")]
    pub to_move: Side,
}

fn player_to_move() -> Side {
    Side::Player
}
