use std::{
    io::{self, IsTerminal as _, Write},
    path::PathBuf,
};

use uttt_engine::Game;

use crate::{util, view::BoardView};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ShowArg {
    /// Saved game file (JSON format)
    snapshot: PathBuf,
}

pub(crate) fn run(arg: &ShowArg) -> anyhow::Result<()> {
    let ShowArg { snapshot } = arg;

    let game = util::read_saved_game(snapshot)?;
    let mut output = io::stdout().lock();
    let styled = output.is_terminal();
    write_game(&game, styled, &mut output)?;
    output.flush()?;
    Ok(())
}

fn write_game<W>(game: &Game, styled: bool, output: &mut W) -> anyhow::Result<()>
where
    W: Write,
{
    let view = BoardView::new(game.board())
        .highlight(game.last_move())
        .styled(styled);
    write!(output, "{view}")?;
    writeln!(output, "Outcome: {}", game.outcome())?;
    if game.outcome().is_in_progress() {
        writeln!(output, "To move: {}", game.to_move())?;
        writeln!(output, "Active sub-board: {}", game.active())?;
    }
    if let Some(mv) = game.last_move() {
        writeln!(output, "Last move: {mv}")?;
    }
    Ok(())
}
