use std::fmt;

use crossterm::style::Stylize as _;
use uttt_evaluator::Advice;

/// Text rendering of an [`Advice`]: the best cell, then one line per candidate.
#[derive(Debug, Clone, Copy)]
pub struct AdviceView<'a> {
    advice: &'a Advice,
    styled: bool,
}

impl<'a> AdviceView<'a> {
    pub fn new(advice: &'a Advice) -> Self {
        Self {
            advice,
            styled: false,
        }
    }

    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }
}

impl fmt::Display for AdviceView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(best) = self.advice.best_move() else {
            return writeln!(f, "No move is available in this sub-board.");
        };

        let best = best.cell.to_string();
        if self.styled {
            writeln!(f, "The best move is: {}", best.green())?;
        } else {
            writeln!(f, "The best move is: {best}")?;
        }

        writeln!(f, "Move evaluation (minimax scores with danger penalty):")?;
        for (cell, report) in self.advice.candidates() {
            writeln!(
                f,
                " Move {cell}: Raw Score {} | Winning Likelihood: {:.2}% | Opponent Win Likelihood: {:.2}%",
                report.raw, report.normalized, report.danger
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use uttt_engine::{Coord, SuperBoard};
    use uttt_evaluator::best_move_with_details;

    use super::*;

    #[test]
    fn test_certain_win() {
        let mut board = SuperBoard::from_ascii(
            r"
            OO. ... ...
            X.. ... ...
            X.. ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ",
        );
        let advice = best_move_with_details(&mut board, Coord::new(0, 0).unwrap());
        let text = AdviceView::new(&advice).to_string();
        assert_eq!(
            text,
            "\
The best move is: (0, 2)
Move evaluation (minimax scores with danger penalty):
 Move (0, 2): Raw Score inf | Winning Likelihood: 100.00% | Opponent Win Likelihood: 0.00%
"
        );
    }

    #[test]
    fn test_lists_every_candidate() {
        let mut board = SuperBoard::new();
        let advice = best_move_with_details(&mut board, Coord::new(1, 1).unwrap());
        let text = AdviceView::new(&advice).to_string();
        assert!(text.starts_with("The best move is: (0, 0)\n"));
        assert_eq!(text.lines().filter(|l| l.starts_with(" Move ")).count(), 9);
        assert!(text.contains(" Move (2, 2): Raw Score 0 | Winning Likelihood: 11.11%"));
    }

    #[test]
    fn test_no_candidates() {
        let advice = Advice::default();
        assert_eq!(
            AdviceView::new(&advice).to_string(),
            "No move is available in this sub-board.\n"
        );
    }
}
