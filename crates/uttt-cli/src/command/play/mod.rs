use std::{
    io::{self, BufRead, IsTerminal as _, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use uttt_engine::Game;
use uttt_evaluator::SearchPreset;

use crate::util::{self, LoadedGame};

use self::session::PlaySession;

mod input;
mod session;

const DEFAULT_SAVE_FILE: &str = "saved_game.json";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// File written by `save` and read when resuming a game
    #[clap(long, default_value = DEFAULT_SAVE_FILE)]
    save_file: PathBuf,
    /// Resume the saved game without asking
    #[clap(long, conflicts_with = "new")]
    load: bool,
    /// Start a new game without asking
    #[clap(long)]
    new: bool,
    /// Search depth used by `help`
    #[clap(long, default_value = "quick")]
    preset: SearchPreset,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            save_file: PathBuf::from(DEFAULT_SAVE_FILE),
            load: false,
            new: false,
            preset: SearchPreset::default(),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let styled = output.is_terminal();

    let game = start_game(arg, &mut input, &mut output)?;
    let end = PlaySession::new(game, input, output, arg.save_file.clone())
        .styled(styled)
        .preset(arg.preset)
        .run()?;
    log::debug!("session ended: {end:?}");
    Ok(())
}

/// Picks a new or saved game, asking on `input` unless a flag decides.
fn start_game<R, W>(arg: &PlayArg, input: &mut R, output: &mut W) -> anyhow::Result<Game>
where
    R: BufRead,
    W: Write,
{
    let load = if arg.new {
        false
    } else if arg.load {
        true
    } else {
        writeln!(output, "Do you want to load a previous game? (yes/no):")?;
        output.flush()?;
        let mut line = String::new();
        input.read_line(&mut line).context("Failed to read input")?;
        matches!(line.trim().to_ascii_lowercase().as_str(), "yes" | "y")
    };
    if !load {
        return Ok(Game::new());
    }

    let path = arg.save_file.display();
    let loaded = util::load_game_or_new(&arg.save_file);
    match &loaded {
        LoadedGame::Restored(_) => writeln!(output, "Game loaded from {path}.")?,
        LoadedGame::Missing => {
            writeln!(output, "No saved game found at {path}. Starting a new game.")?;
        }
        LoadedGame::Invalid(_) => {
            writeln!(output, "Error reading the saved game at {path}. Starting a new game.")?;
        }
    }
    Ok(loaded.into_game())
}
