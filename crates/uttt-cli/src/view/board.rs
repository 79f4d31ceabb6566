use std::fmt;

use crossterm::style::Stylize as _;
use uttt_engine::{Move, SuperBoard};

const SEPARATOR: &str = "------+-------+------";

/// Text rendering of a [`SuperBoard`], one line per row of the 9×9 grid.
///
/// Sub-boards are separated by `|` and `-` lines, the same layout
/// [`SuperBoard::from_ascii`] reads. When styled, the highlighted move is
/// printed green.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    board: &'a SuperBoard,
    highlight: Option<Move>,
    styled: bool,
}

impl<'a> BoardView<'a> {
    pub fn new(board: &'a SuperBoard) -> Self {
        Self {
            board,
            highlight: None,
            styled: false,
        }
    }

    pub fn highlight(mut self, mv: Option<Move>) -> Self {
        self.highlight = mv;
        self
    }

    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let highlight = self.highlight.map(|mv| {
            (
                mv.board.row() * 3 + mv.cell.row(),
                mv.board.col() * 3 + mv.cell.col(),
            )
        });

        for (y, row) in self.board.grid_rows().enumerate() {
            if y > 0 && y % 3 == 0 {
                writeln!(f, "{SEPARATOR}")?;
            }
            for (x, cell) in row.iter().enumerate() {
                if x > 0 {
                    let gap = if x % 3 == 0 { " | " } else { " " };
                    f.write_str(gap)?;
                }
                let ch = cell.as_char();
                if self.styled && highlight == Some((y, x)) {
                    write!(f, "{}", ch.green().bold())?;
                } else {
                    write!(f, "{ch}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
