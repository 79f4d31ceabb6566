use std::{
    io::{self, IsTerminal as _, Write},
    path::PathBuf,
};

use uttt_engine::{Game, Side};
use uttt_evaluator::{MoveAdvisor, SearchPreset};

use crate::{util, view::AdviceView};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AdviseArg {
    /// Saved game file (JSON format)
    snapshot: PathBuf,
    /// Search depth
    #[clap(long, default_value = "quick")]
    preset: SearchPreset,
}

pub(crate) fn run(arg: &AdviseArg) -> anyhow::Result<()> {
    let AdviseArg { snapshot, preset } = arg;

    let mut game = util::read_saved_game(snapshot)?;
    let mut output = io::stdout().lock();
    let styled = output.is_terminal();
    write_advice(&mut game, *preset, styled, &mut output)?;
    output.flush()?;
    Ok(())
}

/// Writes advice for the player on the active sub-board, or on every playable
/// sub-board when the designated one is closed.
fn write_advice<W>(game: &mut Game, preset: SearchPreset, styled: bool, output: &mut W) -> anyhow::Result<()>
where
    W: Write,
{
    let outcome = game.outcome();
    if !outcome.is_in_progress() {
        writeln!(output, "The game is over: {outcome}.")?;
        return Ok(());
    }
    if game.to_move() == Side::Opponent {
        writeln!(output, "Note: the opponent is to move; advice is for the player ({}).", Side::Player)?;
    }

    let advisor = MoveAdvisor::new(preset);
    let boards: Vec<_> = if game.needs_board_selection() {
        writeln!(
            output,
            "The designated sub-board at {} is already won or full.",
            game.active()
        )?;
        game.board().playable_boards().collect()
    } else {
        vec![game.active()]
    };

    for board in boards {
        let advice = advisor.advise(game.board_mut(), board);
        writeln!(output, "Sub-board {board}:")?;
        write!(output, "{}", AdviceView::new(&advice).styled(styled))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use uttt_engine::{Coord, GameSnapshot, SuperBoard};

    use super::*;

    fn advise(game: &mut Game) -> String {
        let mut output = Vec::new();
        write_advice(game, SearchPreset::Quick, false, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_advice_on_active_board() {
        let mut game = Game::new();
        game.play(1, 1).unwrap();
        game.play(0, 0).unwrap();
        let before = game.clone();

        let output = advise(&mut game);
        assert!(output.starts_with("Sub-board (0, 0):\nThe best move is: "));
        assert_eq!(output.matches(" Move (").count(), 8);
        assert_eq!(game, before);
    }

    #[test]
    fn test_advice_on_every_playable_board() {
        let mut game = Game::restore(GameSnapshot {
            board: SuperBoard::from_ascii(
                r"
                XXX ... ...
                ... ... ...
                ... ... ...
                OXO OOO ...
                OXX ... ...
                XOO ... ...
                ... ... ...
                ... ... ...
                ... ... ...
                ",
            ),
            active: Coord::new(0, 0).unwrap(),
            last_move: None,
            to_move: Side::Player,
        })
        .unwrap();

        let output = advise(&mut game);
        assert!(output.starts_with("The designated sub-board at (0, 0) is already won or full.\n"));
        // Boards (0,0), (1,0) and (1,1) are closed.
        assert_eq!(output.matches("Sub-board (").count(), 6);
        assert!(!output.contains("Sub-board (1, 1):"));
    }

    #[test]
    fn test_finished_game() {
        let mut game = Game::restore(GameSnapshot {
            board: SuperBoard::from_ascii(
                r"
                OOO OOO OOO
                ... ... ...
                ... ... ...
                ... ... ...
                ... ... ...
                ... ... ...
                ... ... ...
                ... ... ...
                ... ... ...
                ",
            ),
            active: Coord::new(1, 1).unwrap(),
            last_move: None,
            to_move: Side::Opponent,
        })
        .unwrap();
        assert_eq!(advise(&mut game), "The game is over: player wins.\n");
    }
}
