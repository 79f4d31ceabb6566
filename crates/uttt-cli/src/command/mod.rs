use clap::{Parser, Subcommand};

use self::{advise::AdviseArg, play::PlayArg, show::ShowArg};

mod advise;
mod play;
mod show;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log search details (overridden by `RUST_LOG`)
    #[clap(long, short, global = true)]
    verbose: bool,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a two-player game on the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Print move advice for a saved game
    Advise(#[clap(flatten)] AdviseArg),
    /// Print a saved game
    Show(#[clap(flatten)] ShowArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logger(args.verbose);

    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Advise(arg) => advise::run(&arg)?,
        Mode::Show(arg) => show::run(&arg)?,
    }
    Ok(())
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level),
    )
    .format_timestamp(None)
    .init();
}
