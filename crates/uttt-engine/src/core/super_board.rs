use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use super::{
    cell::{Cell, Side},
    coord::{Coord, GRID_SIZE, Move, any_line},
    sub_board::SubBoard,
};

/// Number of cells along one edge of the whole super-board.
pub const CELLS_PER_SIDE: usize = GRID_SIZE * GRID_SIZE;

/// Final (or current) state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Outcome {
    #[display("in progress")]
    InProgress,
    #[display("player wins")]
    PlayerWin,
    #[display("opponent wins")]
    OpponentWin,
    #[display("draw")]
    Draw,
}

/// The overall 3×3 grid of [`SubBoard`]s.
///
/// # Macro win
///
/// A side holds the macro win when three sub-boards forming a line are each won
/// by that side. A sub-board without a winner contributes no mark, even if full.
///
/// # Hypothetical moves
///
/// Search explores moves on the live board instead of copying it. Use
/// [`SuperBoard::place`] to get a [`PlacedMark`] guard: the cell is restored to
/// empty when the guard is dropped, on every exit path.
///
/// # Serialization
///
/// Serialized as nine strings of nine characters each (`O`, `X`, `.`), one per
/// row of the full 9×9 grid, top to bottom.
///
/// # Example
///
/// ```
/// use uttt_engine::{Coord, Move, Side, SuperBoard};
///
/// let mut board = SuperBoard::new();
/// let mv = Move::new(Coord::new(1, 1).unwrap(), Coord::new(0, 2).unwrap());
/// {
///     let placed = board.place(mv, Side::Player);
///     assert!(!placed.cell(mv).is_empty());
/// }
/// assert!(board.cell(mv).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuperBoard {
    boards: [SubBoard; 9],
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridParseError {
    #[display("expected 9 rows, got {found}")]
    RowCount { found: usize },
    #[display("row {row}: expected 9 cells, got {found}")]
    RowLength { row: usize, found: usize },
    #[display("row {row}: invalid cell character {ch:?}")]
    InvalidCell { row: usize, ch: char },
}

impl SuperBoard {
    pub const EMPTY: Self = Self {
        boards: [SubBoard::EMPTY; 9],
    };

    #[must_use]
    pub fn new() -> Self {
        Self::EMPTY
    }

    #[must_use]
    pub fn sub_board(&self, at: Coord) -> &SubBoard {
        &self.boards[at.index()]
    }

    /// Iterates over `(coord, sub_board)` pairs in row-major order.
    pub fn sub_boards(&self) -> impl Iterator<Item = (Coord, &SubBoard)> + '_ {
        Coord::ALL.into_iter().map(|at| (at, self.sub_board(at)))
    }

    /// Iterates over the coordinates of sub-boards that are neither won nor full.
    pub fn playable_boards(&self) -> impl Iterator<Item = Coord> + '_ {
        self.sub_boards()
            .filter(|(_, sub)| sub.is_playable())
            .map(|(at, _)| at)
    }

    #[must_use]
    pub fn cell(&self, mv: Move) -> Cell {
        self.sub_board(mv.board).cell(mv.cell)
    }

    /// Writes `side`'s mark into the cell addressed by `mv`.
    ///
    /// No legality check is performed; the caller validates `mv` first.
    pub fn set_cell(&mut self, mv: Move, side: Side) {
        self.boards[mv.board.index()].set_cell(mv.cell, side.into());
    }

    /// Restores the cell addressed by `mv` to empty.
    pub fn clear_cell(&mut self, mv: Move) {
        self.boards[mv.board.index()].set_cell(mv.cell, Cell::Empty);
    }

    /// Places `side`'s mark at `mv` until the returned guard is dropped.
    ///
    /// The target cell must be empty.
    pub fn place(&mut self, mv: Move, side: Side) -> PlacedMark<'_> {
        debug_assert!(self.cell(mv).is_empty(), "placing on occupied cell {mv}");
        self.set_cell(mv, side);
        PlacedMark { board: self, mv }
    }

    /// Returns `true` if `side` has won three sub-boards in a line.
    #[must_use]
    pub fn is_macro_winner(&self, side: Side) -> bool {
        any_line(|at| self.sub_board(at).is_won_by(side))
    }

    /// Returns `true` if every sub-board is full.
    ///
    /// A won sub-board with empty cells is not full; legality of further play is
    /// decided by [`SubBoard::is_playable`], not by this test.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.boards.iter().all(SubBoard::is_full)
    }

    /// Returns `true` if no sub-board is playable (each one is won or full).
    ///
    /// A full super-board is always exhausted.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.playable_boards().next().is_none()
    }

    /// Derives the game outcome from the board alone.
    ///
    /// The opponent's macro win is checked first, matching the order used by
    /// the search engine.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.is_macro_winner(Side::Opponent) {
            Outcome::OpponentWin
        } else if self.is_macro_winner(Side::Player) {
            Outcome::PlayerWin
        } else if self.is_exhausted() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    /// Iterates over the nine rows of the full grid as cells, top to bottom.
    pub fn grid_rows(&self) -> impl Iterator<Item = [Cell; CELLS_PER_SIDE]> + '_ {
        (0..CELLS_PER_SIDE).map(|y| {
            let mut row = [Cell::Empty; CELLS_PER_SIDE];
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = self.cell(grid_move(y, x));
            }
            row
        })
    }

    /// Parses a board from rows of cell characters.
    ///
    /// Each row must contain exactly nine of `O`, `X`, `.` once `|` separators
    /// and whitespace are removed.
    pub fn from_rows<I, S>(rows: I) -> Result<Self, GridParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut board = Self::EMPTY;
        let mut count = 0;
        for (y, line) in rows.into_iter().enumerate() {
            count += 1;
            if y >= CELLS_PER_SIDE {
                continue;
            }
            let mut x = 0;
            for ch in line.as_ref().chars() {
                if ch == '|' || ch.is_whitespace() {
                    continue;
                }
                let cell = Cell::from_char(ch).ok_or(GridParseError::InvalidCell { row: y, ch })?;
                if x < CELLS_PER_SIDE {
                    let mv = grid_move(y, x);
                    board.boards[mv.board.index()].set_cell(mv.cell, cell);
                }
                x += 1;
            }
            if x != CELLS_PER_SIDE {
                return Err(GridParseError::RowLength { row: y, found: x });
            }
        }
        if count != CELLS_PER_SIDE {
            return Err(GridParseError::RowCount { found: count });
        }
        Ok(board)
    }

    /// Creates a `SuperBoard` from ASCII art for testing.
    ///
    /// `O` is a player mark, `X` an opponent mark, `.` an empty cell. Blank
    /// lines and separator lines made of `-`/`+` are skipped.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let rows = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.chars().all(|ch| matches!(ch, '-' | '+')));
        match Self::from_rows(rows) {
            Ok(board) => board,
            Err(e) => panic!("invalid board art: {e}"),
        }
    }
}

/// Maps a cell of the full 9×9 grid to the move addressing it.
fn grid_move(y: usize, x: usize) -> Move {
    Move::new(
        Coord::ALL[(y / GRID_SIZE) * GRID_SIZE + x / GRID_SIZE],
        Coord::ALL[(y % GRID_SIZE) * GRID_SIZE + x % GRID_SIZE],
    )
}

impl Serialize for SuperBoard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: ["O..X.....", ".........", ...]
        let rows: Vec<String> = self
            .grid_rows()
            .map(|row| row.iter().map(|cell| cell.as_char()).collect())
            .collect();
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SuperBoard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        Self::from_rows(&rows).map_err(serde::de::Error::custom)
    }
}

/// A mark placed by [`SuperBoard::place`], removed again when dropped.
///
/// Dereferences to the board so the placed position can be inspected or
/// explored further (including placing more marks).
#[derive(Debug)]
pub struct PlacedMark<'a> {
    board: &'a mut SuperBoard,
    mv: Move,
}

impl PlacedMark<'_> {
    #[must_use]
    pub fn mv(&self) -> Move {
        self.mv
    }
}

impl Deref for PlacedMark<'_> {
    type Target = SuperBoard;

    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl DerefMut for PlacedMark<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.board
    }
}

impl Drop for PlacedMark<'_> {
    fn drop(&mut self) {
        self.board.clear_cell(self.mv);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(big_row: usize, big_col: usize, small_row: usize, small_col: usize) -> Move {
        Move::new(
            Coord::new(big_row, big_col).unwrap(),
            Coord::new(small_row, small_col).unwrap(),
        )
    }

    #[test]
    fn test_initial_board() {
        let board = SuperBoard::new();
        assert_eq!(board, SuperBoard::EMPTY);
        assert!(!board.is_full());
        assert!(!board.is_exhausted());
        assert_eq!(board.playable_boards().count(), 9);
        assert_eq!(board.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_set_and_clear_cell() {
        let mut board = SuperBoard::new();
        let m = mv(2, 1, 0, 2);

        board.set_cell(m, Side::Opponent);
        assert_eq!(board.cell(m), Cell::Opponent);
        assert_eq!(board.sub_board(m.board).count(Side::Opponent), 1);

        board.clear_cell(m);
        assert_eq!(board, SuperBoard::EMPTY);
    }

    #[test]
    fn test_placed_mark_restores_on_drop() {
        let mut board = SuperBoard::new();
        let first = mv(0, 0, 1, 1);
        let second = mv(1, 1, 0, 0);
        {
            let mut placed = board.place(first, Side::Player);
            assert_eq!(placed.cell(first), Cell::Player);
            {
                let nested = placed.place(second, Side::Opponent);
                assert_eq!(nested.cell(first), Cell::Player);
                assert_eq!(nested.cell(second), Cell::Opponent);
            }
            assert!(placed.cell(second).is_empty());
        }
        assert_eq!(board, SuperBoard::EMPTY);
    }

    #[test]
    fn test_placed_mark_restores_on_early_return() {
        fn probe(board: &mut SuperBoard, m: Move) -> bool {
            let placed = board.place(m, Side::Player);
            if placed.sub_board(m.board).count(Side::Player) == 1 {
                return true;
            }
            false
        }

        let mut board = SuperBoard::new();
        assert!(probe(&mut board, mv(1, 2, 2, 0)));
        assert_eq!(board, SuperBoard::EMPTY);
    }

    #[test]
    fn test_from_ascii_layout() {
        let board = SuperBoard::from_ascii(
            r"
            O . . | . . . | . . X
            . . . | . . . | . . .
            . . . | . . . | . . .
            ------+-------+------
            . . . | . X . | . . .
            . . . | . . . | . . .
            . . . | . . . | . . .
            ------+-------+------
            . . . | . . . | . . .
            . . . | . . . | . . .
            . . . | . . . | . . O
            ",
        );
        assert_eq!(board.cell(mv(0, 0, 0, 0)), Cell::Player);
        assert_eq!(board.cell(mv(0, 2, 0, 2)), Cell::Opponent);
        assert_eq!(board.cell(mv(1, 1, 0, 1)), Cell::Opponent);
        assert_eq!(board.cell(mv(2, 2, 2, 2)), Cell::Player);
        let total: usize = board
            .sub_boards()
            .map(|(_, sub)| sub.count(Side::Player) + sub.count(Side::Opponent))
            .sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_macro_win_requires_line_of_won_boards() {
        let board = SuperBoard::from_ascii(
            r"
            OOO ... ...
            ... OOO ...
            ... ... OOO
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ",
        );
        assert!(board.is_macro_winner(Side::Player));
        assert!(!board.is_macro_winner(Side::Opponent));
        assert_eq!(board.outcome(), Outcome::PlayerWin);

        let two_boards = SuperBoard::from_ascii(
            r"
            XXX ... ...
            ... XXX ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ",
        );
        assert!(!two_boards.is_macro_winner(Side::Opponent));
        assert_eq!(two_boards.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_macro_win_ignores_mixed_line() {
        // Top row of sub-boards: won by O, won by X, won by O.
        let board = SuperBoard::from_ascii(
            r"
            OOO XXX OOO
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ",
        );
        assert!(!board.is_macro_winner(Side::Player));
        assert!(!board.is_macro_winner(Side::Opponent));
    }

    #[test]
    fn test_full_board_without_macro_winner_is_draw() {
        // Every sub-board is the same drawn pattern.
        let board = SuperBoard::from_ascii(
            r"
            OXO OXO OXO
            OXX OXX OXX
            XOO XOO XOO
            OXO OXO OXO
            OXX OXX OXX
            XOO XOO XOO
            OXO OXO OXO
            OXX OXX OXX
            XOO XOO XOO
            ",
        );
        assert!(board.is_full());
        assert!(board.is_exhausted());
        assert_eq!(board.outcome(), Outcome::Draw);
    }

    #[test]
    fn test_exhausted_by_won_boards_is_draw() {
        // Boards alternate winners so no macro line forms; none is playable.
        let board = SuperBoard::from_ascii(
            r"
            OOO XXX OOO
            ... ... ...
            ... ... ...
            XXX OOO XXX
            ... ... ...
            ... ... ...
            XXX OOO XXX
            ... ... ...
            ... ... ...
            ",
        );
        assert!(!board.is_full());
        assert!(board.is_exhausted());
        assert_eq!(board.outcome(), Outcome::Draw);
    }

    #[test]
    fn test_board_serialization() {
        let board = SuperBoard::from_ascii(
            r"
            O.. ... ..X
            ... ... ...
            ... ... ...
            ... .X. ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ..O
            ",
        );
        let serialized = serde_json::to_string(&board).unwrap();
        assert!(serialized.starts_with(r#"["O.......X",".........""#));

        let deserialized: SuperBoard = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, board);
    }

    #[test]
    fn test_board_deserialization_errors() {
        let short = r#"["........."]"#;
        assert!(serde_json::from_str::<SuperBoard>(short).is_err());

        let mut rows = vec![".........".to_string(); 9];
        rows[4] = "....Z....".to_string();
        let json = serde_json::to_string(&rows).unwrap();
        let err = serde_json::from_str::<SuperBoard>(&json).unwrap_err();
        assert!(err.to_string().contains("invalid cell character 'Z'"));

        rows[4] = "........".to_string();
        let json = serde_json::to_string(&rows).unwrap();
        assert!(serde_json::from_str::<SuperBoard>(&json).is_err());
    }
}
