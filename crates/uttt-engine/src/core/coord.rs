use std::fmt;

use serde::{Deserialize, Serialize};

/// Side length of a sub-board, and of the super-board measured in sub-boards.
pub const GRID_SIZE: usize = 3;

/// The eight winning lines of a 3×3 grid: three rows, three columns, two diagonals.
pub(crate) const LINES: [[Coord; 3]; 8] = {
    const fn c(row: u8, col: u8) -> Coord {
        Coord { row, col }
    }
    [
        [c(0, 0), c(0, 1), c(0, 2)],
        [c(1, 0), c(1, 1), c(1, 2)],
        [c(2, 0), c(2, 1), c(2, 2)],
        [c(0, 0), c(1, 0), c(2, 0)],
        [c(0, 1), c(1, 1), c(2, 1)],
        [c(0, 2), c(1, 2), c(2, 2)],
        [c(0, 0), c(1, 1), c(2, 2)],
        [c(0, 2), c(1, 1), c(2, 0)],
    ]
};

/// Returns `true` if every coordinate of at least one line satisfies `pred`.
pub(crate) fn any_line(mut pred: impl FnMut(Coord) -> bool) -> bool {
    LINES
        .iter()
        .any(|line| line.iter().all(|&coord| pred(coord)))
}

/// A `(row, col)` coordinate on a 3×3 grid.
///
/// The same type addresses a sub-board inside the super-board and a cell inside
/// a sub-board. The derived ordering is row-major, which is also the order in
/// which [`Coord::ALL`] enumerates coordinates.
///
/// Serialized as a two-element array `[row, col]`; values outside `0..3` are
/// rejected on deserialization.
///
/// # Example
///
/// ```
/// use uttt_engine::Coord;
///
/// let center = Coord::new(1, 1).unwrap();
/// assert_eq!(center.index(), 4);
/// assert!(Coord::new(3, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[u8; 2]", into = "[u8; 2]")]
pub struct Coord {
    row: u8,
    col: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("coordinate ({row}, {col}) is outside the 3x3 grid")]
pub struct CoordOutOfRangeError {
    row: usize,
    col: usize,
}

impl Coord {
    /// All nine coordinates in row-major order.
    pub const ALL: [Self; 9] = [
        Self::at(0, 0),
        Self::at(0, 1),
        Self::at(0, 2),
        Self::at(1, 0),
        Self::at(1, 1),
        Self::at(1, 2),
        Self::at(2, 0),
        Self::at(2, 1),
        Self::at(2, 2),
    ];

    const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn new(row: usize, col: usize) -> Result<Self, CoordOutOfRangeError> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return Err(CoordOutOfRangeError { row, col });
        }
        Ok(Self::ALL[row * GRID_SIZE + col])
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.row as usize
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major index in `0..9`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row() * GRID_SIZE + self.col()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl TryFrom<[u8; 2]> for Coord {
    type Error = CoordOutOfRangeError;

    fn try_from([row, col]: [u8; 2]) -> Result<Self, Self::Error> {
        Self::new(usize::from(row), usize::from(col))
    }
}

impl From<Coord> for [u8; 2] {
    fn from(coord: Coord) -> Self {
        [coord.row, coord.col]
    }
}

/// A move: which sub-board (`board`) and which cell inside it (`cell`).
///
/// Equivalent to the `(big_row, big_col, small_row, small_col)` tuple and
/// serialized as exactly that four-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[u8; 4]", into = "[u8; 4]")]
pub struct Move {
    pub board: Coord,
    pub cell: Coord,
}

impl Move {
    #[must_use]
    pub const fn new(board: Coord, cell: Coord) -> Self {
        Self { board, cell }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.board.row, self.board.col, self.cell.row, self.cell.col
        )
    }
}

impl TryFrom<[u8; 4]> for Move {
    type Error = CoordOutOfRangeError;

    fn try_from([big_row, big_col, small_row, small_col]: [u8; 4]) -> Result<Self, Self::Error> {
        Ok(Self {
            board: Coord::try_from([big_row, big_col])?,
            cell: Coord::try_from([small_row, small_col])?,
        })
    }
}

impl From<Move> for [u8; 4] {
    fn from(mv: Move) -> Self {
        [mv.board.row, mv.board.col, mv.cell.row, mv.cell.col]
    }
}
