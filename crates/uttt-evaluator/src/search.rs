//! Depth-bounded minimax search with alpha-beta pruning.
//!
//! The player (`O`) is the maximizing side and the opponent (`X`) the
//! minimizing side. Scores are from the player's point of view.
//!
//! # Node Evaluation
//!
//! Each call evaluates one node in this order:
//!
//! 1. **Depth limit** - at `depth >= max_depth`, return [`evaluate`] (heuristic leaf)
//! 2. **Opponent macro win** - return `-WIN_SCORE + depth`
//! 3. **Player macro win** - return `WIN_SCORE - depth`
//! 4. **No playable sub-board** - return `0` (draw)
//! 5. **Immediate macro win** - if any candidate move wins its sub-board and
//!    thereby the game for the mover, return the mover's terminal score at this
//!    depth without recursing
//! 6. **Recursion** - try every candidate in row-major order, recursing into the
//!    sub-board addressed by the candidate's cell with the other side to move
//!
//! Depth weighting makes faster wins score higher and faster losses lower.
//! Among equal scores the first candidate examined wins (row-major order).
//!
//! # Hypothetical Moves
//!
//! Candidates are explored on the caller's board in place: each mark is
//! placed through [`SuperBoard::place`] and removed when its guard drops, so
//! the board is restored on every exit path.
//!
//! # Usage
//!
//! ```
//! use uttt_engine::{Coord, SuperBoard};
//! use uttt_evaluator::search::{ActiveBoard, SearchPreset, Searcher};
//!
//! let mut board = SuperBoard::new();
//! let mut searcher = Searcher::with_preset(SearchPreset::Quick);
//! let active = ActiveBoard::Fixed(Coord::new(1, 1).unwrap());
//! let score = searcher
//!     .search(&mut board, active, true, 0, i32::MIN, i32::MAX)
//!     .unwrap();
//! assert_eq!(board, SuperBoard::new());
//! # let _ = score;
//! ```

use arrayvec::ArrayVec;
use uttt_engine::{Coord, Move, Side, SuperBoard};

use crate::board_evaluator::evaluate;

/// Magnitude of a terminal score at depth zero.
pub const WIN_SCORE: i32 = 10;

/// The two supported search depths.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, derive_more::Display)]
pub enum SearchPreset {
    /// Depth 3: used to rank every candidate move
    #[default]
    Quick,
    /// Depth 5
    Deep,
}

impl SearchPreset {
    #[must_use]
    pub const fn max_depth(self) -> i32 {
        match self {
            SearchPreset::Quick => 3,
            SearchPreset::Deep => 5,
        }
    }
}

/// Where the side to move may play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveBoard {
    /// Only in this sub-board.
    Fixed(Coord),
    /// In any playable sub-board (the designated one is won or full).
    Free,
}

impl ActiveBoard {
    /// Resolves the sub-board the next mover is sent to by a move on `cell`.
    #[must_use]
    pub fn redirected(board: &SuperBoard, cell: Coord) -> Self {
        if board.sub_board(cell).is_playable() {
            ActiveBoard::Fixed(cell)
        } else {
            ActiveBoard::Free
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SearchError {
    #[display("cannot search sub-board {board}: it is already won or full")]
    UnplayableBoard { board: Coord },
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited (every call, including leaves)
    pub nodes: u64,
    /// Heuristic leaves evaluated at the depth limit
    pub leaves: u64,
    /// Alpha-beta cutoffs
    pub cutoffs: u64,
}

/// Enumerates the moves available to the side to move, in row-major order.
///
/// For [`ActiveBoard::Free`], sub-boards are visited row-major and cells
/// row-major within each sub-board.
#[must_use]
pub fn legal_moves(board: &SuperBoard, active: ActiveBoard) -> ArrayVec<Move, 81> {
    let mut moves = ArrayVec::<Move, 81>::new();
    let mut push_board = |at: Coord| {
        let sub = board.sub_board(at);
        if sub.is_playable() {
            moves.extend(sub.empty_cells().map(|cell| Move::new(at, cell)));
        }
    };
    match active {
        ActiveBoard::Fixed(at) => push_board(at),
        ActiveBoard::Free => Coord::ALL.into_iter().for_each(push_board),
    }
    moves
}

/// Alpha-beta searcher with a fixed depth limit.
#[derive(Debug, Clone)]
pub struct Searcher {
    max_depth: i32,
    stats: SearchStats,
}

impl Searcher {
    #[must_use]
    pub fn new(max_depth: i32) -> Self {
        Self {
            max_depth,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn with_preset(preset: SearchPreset) -> Self {
        Self::new(preset.max_depth())
    }

    #[must_use]
    pub fn max_depth(&self) -> i32 {
        self.max_depth
    }

    /// Counters accumulated since this searcher was created.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Scores the position for the side to move (`maximizing` → player).
    ///
    /// `board` is explored in place and returned unchanged. Fails when
    /// `active` names a sub-board that is already won or full.
    pub fn search(
        &mut self,
        board: &mut SuperBoard,
        active: ActiveBoard,
        maximizing: bool,
        depth: i32,
        alpha: i32,
        beta: i32,
    ) -> Result<i32, SearchError> {
        if let ActiveBoard::Fixed(at) = active
            && !board.sub_board(at).is_playable()
        {
            return Err(SearchError::UnplayableBoard { board: at });
        }
        Ok(self.alpha_beta(board, active, maximizing, depth, alpha, beta))
    }

    /// Unchecked [`Searcher::search`]: `active` must be `Free` or a playable board.
    pub(crate) fn alpha_beta(
        &mut self,
        board: &mut SuperBoard,
        active: ActiveBoard,
        maximizing: bool,
        depth: i32,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.stats.nodes += 1;

        if depth >= self.max_depth {
            self.stats.leaves += 1;
            return evaluate(board);
        }
        if let Some(score) = terminal_score(board, depth) {
            return score;
        }

        let side = if maximizing {
            Side::Player
        } else {
            Side::Opponent
        };
        let moves = legal_moves(board, active);

        if moves
            .iter()
            .any(|&mv| completes_macro_win(board, mv, side))
        {
            return win_score(side, depth);
        }

        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for mv in moves {
            let score = {
                let mut placed = board.place(mv, side);
                let next = ActiveBoard::redirected(&placed, mv.cell);
                self.alpha_beta(&mut placed, next, !maximizing, depth + 1, alpha, beta)
            };

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }
        best
    }
}

/// Score of `side` holding the macro win, discovered at `depth`.
#[must_use]
pub const fn win_score(side: Side, depth: i32) -> i32 {
    match side {
        Side::Player => WIN_SCORE - depth,
        Side::Opponent => -WIN_SCORE + depth,
    }
}

fn terminal_score(board: &SuperBoard, depth: i32) -> Option<i32> {
    if board.is_macro_winner(Side::Opponent) {
        return Some(win_score(Side::Opponent, depth));
    }
    if board.is_macro_winner(Side::Player) {
        return Some(win_score(Side::Player, depth));
    }
    if board.is_exhausted() {
        return Some(0);
    }
    None
}

fn completes_macro_win(board: &mut SuperBoard, mv: Move, side: Side) -> bool {
    let placed = board.place(mv, side);
    placed.sub_board(mv.board).is_won_by(side) && placed.is_macro_winner(side)
}
