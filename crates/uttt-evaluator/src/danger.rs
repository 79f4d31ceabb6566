//! One-ply look-ahead on the sub-board a candidate move sends the opponent to.

use arrayvec::ArrayVec;
use uttt_engine::{Coord, Move, Side, SuperBoard};

/// Percentage (`0.0..=100.0`) of the opponent's replies in sub-board `target`
/// that immediately win it.
///
/// `target` is the candidate move's cell, i.e. the sub-board the opponent is
/// redirected into. A won or full target scores `0` since no play continues
/// there.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn danger_likelihood(board: &mut SuperBoard, target: Coord) -> f64 {
    let sub = board.sub_board(target);
    if !sub.is_playable() {
        return 0.0;
    }

    let replies: ArrayVec<Coord, 9> = sub.empty_cells().collect();
    let winning = replies
        .iter()
        .filter(|&&cell| {
            let mv = Move::new(target, cell);
            let placed = board.place(mv, Side::Opponent);
            placed.sub_board(target).is_won_by(Side::Opponent)
        })
        .count();

    winning as f64 / replies.len() as f64 * 100.0
}
