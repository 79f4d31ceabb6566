use super::{
    cell::{Cell, Side},
    coord::{Coord, any_line},
};

/// One 3×3 grid of cells nested inside the [`SuperBoard`](super::SuperBoard).
///
/// A sub-board is *won* by a side holding three in a row (row, column or
/// diagonal) and *full* when no empty cell remains. The two predicates are
/// independent: a won sub-board may still have empty cells, and the fullness
/// test does not special-case a win. Callers must treat a won sub-board as
/// closed regardless of its remaining empty cells (see [`SubBoard::is_playable`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubBoard {
    cells: [Cell; 9],
}

impl SubBoard {
    pub const EMPTY: Self = Self {
        cells: [Cell::Empty; 9],
    };

    #[must_use]
    pub fn cell(&self, at: Coord) -> Cell {
        self.cells[at.index()]
    }

    pub(crate) fn set_cell(&mut self, at: Coord, cell: Cell) {
        self.cells[at.index()] = cell;
    }

    /// Iterates over `(coord, cell)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        Coord::ALL.into_iter().map(|at| (at, self.cell(at)))
    }

    /// Iterates over the empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(at, _)| at)
    }

    /// Returns `true` if `side` holds any full row, column or diagonal.
    #[must_use]
    pub fn is_won_by(&self, side: Side) -> bool {
        let mark = Cell::from(side);
        any_line(|at| self.cell(at) == mark)
    }

    /// Returns the winning side, if any.
    ///
    /// Checks `Player` first; in legal play at most one side can hold a line
    /// because a won sub-board accepts no further moves.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        [Side::Player, Side::Opponent]
            .into_iter()
            .find(|&side| self.is_won_by(side))
    }

    /// Returns `true` if no empty cell remains.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Returns `true` if a move may still be played here: not won and not full.
    #[must_use]
    pub fn is_playable(&self) -> bool {
        !self.is_full() && self.winner().is_none()
    }

    /// Counts the cells holding `side`'s mark.
    #[must_use]
    pub fn count(&self, side: Side) -> usize {
        let mark = Cell::from(side);
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }
}
