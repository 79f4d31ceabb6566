//! Move advice: ranking every candidate in the active sub-board.
//!
//! # How It Works
//!
//! 1. **Immediate win** - if the player can win the active sub-board outright,
//!    that move alone is returned with a [`RawScore::CertainWin`] score
//! 2. **Score each candidate** - place the player's mark, measure the danger of
//!    the sub-board it sends the opponent to ([`danger_likelihood`]) and search
//!    the resulting position with the opponent to move
//! 3. **Penalize danger** - `adjusted = raw - danger / 100 * 10`
//! 4. **Select best** - the highest adjusted score; ties go to the first
//!    candidate in row-major order
//! 5. **Normalize** - adjusted scores are mapped linearly onto `0..=100`
//!    (uniform `100 / n` when every score ties)
//!
//! # Design: Fixed Danger Weight
//!
//! The danger penalty weight ([`DANGER_PENALTY_WEIGHT`]) trades a full
//! 100% danger against ten points of search score, the same magnitude as a
//! terminal win at depth zero.
//!
//! **Limitations:**
//!
//! - Danger only looks one reply ahead and only at sub-board wins
//! - Normalized scores are a ranking aid, not calibrated probabilities
//!
//! # Usage
//!
//! ```
//! use uttt_engine::Game;
//! use uttt_evaluator::move_advisor::best_move_with_details;
//!
//! let mut game = Game::new();
//! let active = game.active();
//! let advice = best_move_with_details(game.board_mut(), active);
//! assert!(advice.best_move().is_some());
//! assert_eq!(advice.len(), 9);
//! ```

use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use uttt_engine::{Coord, Move, Side, SuperBoard};

use crate::{
    danger::danger_likelihood,
    search::{ActiveBoard, SearchPreset, Searcher},
};

/// Search points given up for a 100% danger likelihood.
pub const DANGER_PENALTY_WEIGHT: f64 = 10.0;

/// Raw score of a candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum RawScore {
    /// The move wins its sub-board outright; no search was run.
    #[display("inf")]
    CertainWin,
    /// Minimax score of the position after the move, opponent to move.
    #[display("{_0}")]
    Searched(i32),
}

/// Evaluation details for one candidate cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateReport {
    pub raw: RawScore,
    /// Raw score minus the danger penalty (`inf` for a certain win).
    pub adjusted: f64,
    /// Adjusted score mapped onto `0..=100`.
    pub normalized: f64,
    /// Opponent's immediate win likelihood in percent.
    pub danger: f64,
}

/// Result of advising on one position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Advice {
    best_move: Option<Move>,
    candidates: BTreeMap<Coord, CandidateReport>,
}

impl Advice {
    fn certain_win(mv: Move) -> Self {
        let report = CandidateReport {
            raw: RawScore::CertainWin,
            adjusted: f64::INFINITY,
            normalized: 100.0,
            danger: 0.0,
        };
        Self {
            best_move: Some(mv),
            candidates: BTreeMap::from([(mv.cell, report)]),
        }
    }

    /// The recommended move, or `None` when no candidate exists.
    #[must_use]
    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }

    #[must_use]
    pub fn candidate(&self, cell: Coord) -> Option<&CandidateReport> {
        self.candidates.get(&cell)
    }

    /// Iterates over candidates keyed by cell, in row-major order.
    pub fn candidates(&self) -> impl Iterator<Item = (Coord, &CandidateReport)> + '_ {
        self.candidates.iter().map(|(&cell, report)| (cell, report))
    }

    pub fn raw_scores(&self) -> impl Iterator<Item = (Coord, RawScore)> + '_ {
        self.candidates().map(|(cell, report)| (cell, report.raw))
    }

    pub fn normalized_scores(&self) -> impl Iterator<Item = (Coord, f64)> + '_ {
        self.candidates().map(|(cell, report)| (cell, report.normalized))
    }

    pub fn dangers(&self) -> impl Iterator<Item = (Coord, f64)> + '_ {
        self.candidates().map(|(cell, report)| (cell, report.danger))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Ranks the player's candidate moves with a fixed search depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveAdvisor {
    preset: SearchPreset,
}

impl MoveAdvisor {
    #[must_use]
    pub fn new(preset: SearchPreset) -> Self {
        Self { preset }
    }

    #[must_use]
    pub fn preset(&self) -> SearchPreset {
        self.preset
    }

    /// Advises the player on sub-board `active` of `board`.
    ///
    /// Candidates are explored on `board` in place; it is unchanged on return.
    /// A won or full `active` sub-board yields an empty [`Advice`].
    #[must_use]
    pub fn advise(&self, board: &mut SuperBoard, active: Coord) -> Advice {
        let sub = board.sub_board(active);
        if !sub.is_playable() {
            return Advice::default();
        }
        let cells: ArrayVec<Coord, 9> = sub.empty_cells().collect();

        if let Some(mv) = cells
            .iter()
            .map(|&cell| Move::new(active, cell))
            .find(|&mv| wins_sub_board(board, mv))
        {
            log::debug!("move {mv} wins sub-board {active} outright");
            return Advice::certain_win(mv);
        }

        let mut searcher = Searcher::with_preset(self.preset);
        let mut scored = ArrayVec::<(Coord, i32, f64, f64), 9>::new();
        let mut best: Option<(Move, f64)> = None;

        for cell in cells {
            let mv = Move::new(active, cell);
            let mut placed = board.place(mv, Side::Player);
            let danger = danger_likelihood(&mut placed, cell);
            let next = ActiveBoard::redirected(&placed, cell);
            let raw = searcher.alpha_beta(&mut placed, next, false, 0, i32::MIN, i32::MAX);
            let adjusted = f64::from(raw) - danger / 100.0 * DANGER_PENALTY_WEIGHT;
            log::debug!("candidate {mv}: raw {raw}, danger {danger:.2}%, adjusted {adjusted:.3}");

            if best.is_none_or(|(_, best_score)| adjusted > best_score) {
                best = Some((mv, adjusted));
            }
            scored.push((cell, raw, adjusted, danger));
        }

        let stats = searcher.stats();
        log::debug!(
            "advised {} candidates at depth {}: {} nodes, {} leaves, {} cutoffs",
            scored.len(),
            searcher.max_depth(),
            stats.nodes,
            stats.leaves,
            stats.cutoffs
        );

        let normalized = normalize(scored.iter().map(|&(_, _, adjusted, _)| adjusted));
        let candidates = scored
            .iter()
            .zip(normalized)
            .map(|(&(cell, raw, adjusted, danger), normalized)| {
                let report = CandidateReport {
                    raw: RawScore::Searched(raw),
                    adjusted,
                    normalized,
                    danger,
                };
                (cell, report)
            })
            .collect();

        Advice {
            best_move: best.map(|(mv, _)| mv),
            candidates,
        }
    }
}

/// Advises with the [`SearchPreset::Quick`] depth.
#[must_use]
pub fn best_move_with_details(board: &mut SuperBoard, active: Coord) -> Advice {
    advise_with(board, active, SearchPreset::Quick)
}

#[must_use]
pub fn advise_with(board: &mut SuperBoard, active: Coord, preset: SearchPreset) -> Advice {
    MoveAdvisor::new(preset).advise(board, active)
}

fn wins_sub_board(board: &mut SuperBoard, mv: Move) -> bool {
    let placed = board.place(mv, Side::Player);
    placed.sub_board(mv.board).is_won_by(Side::Player)
}

/// Maps scores linearly onto `0..=100` (minimum → 0, maximum → 100).
#[expect(clippy::cast_precision_loss)]
fn normalize(scores: impl Iterator<Item = f64> + Clone) -> ArrayVec<f64, 9> {
    let (min, max, count) = scores
        .clone()
        .fold((f64::INFINITY, f64::NEG_INFINITY, 0_usize), |(min, max, n), s| {
            (min.min(s), max.max(s), n + 1)
        });
    if max > min {
        scores.map(|s| (s - min) / (max - min) * 100.0).collect()
    } else {
        scores.map(|_| 100.0 / count as f64).collect()
    }
}
