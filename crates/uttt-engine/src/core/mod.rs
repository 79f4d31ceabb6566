pub use self::{cell::*, coord::*, sub_board::*, super_board::*};

pub(crate) mod cell;
pub(crate) mod coord;
pub(crate) mod sub_board;
pub(crate) mod super_board;
