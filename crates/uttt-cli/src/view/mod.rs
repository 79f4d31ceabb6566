pub use self::{advice::AdviceView, board::BoardView};

mod advice;
mod board;
