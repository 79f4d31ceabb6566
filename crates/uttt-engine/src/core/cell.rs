use serde::{Deserialize, Serialize};

/// One of the two players.
///
/// `Player` is the side the move advisor plays for (rendered `O`, moves first);
/// `Opponent` is the other local player (rendered `X`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[display("O")]
    Player,
    #[display("X")]
    Opponent,
}

impl Side {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    Player,
    Opponent,
}

impl Cell {
    /// Returns the side occupying this cell, if any.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Player => Some(Side::Player),
            Cell::Opponent => Some(Side::Opponent),
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player => 'O',
            Cell::Opponent => 'X',
        }
    }

    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Cell::Empty),
            'O' => Some(Cell::Player),
            'X' => Some(Cell::Opponent),
            _ => None,
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => Cell::Player,
            Side::Opponent => Cell::Opponent,
        }
    }
}
