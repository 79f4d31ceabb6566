use std::{
    fs::File,
    io::{self, BufWriter, Write as _},
    path::Path,
};

use anyhow::Context;
use chrono::Utc;
use uttt_engine::Game;

use crate::schema::saved_game::SavedGame;

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

pub fn write_json_file<T, P>(value: &T, path: P) -> anyhow::Result<()>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to flush output to {}", path.display()))?;
    Ok(())
}

/// Reads a saved game and restores it.
///
/// # Errors
///
/// Returns error if the file cannot be opened or parsed, or if the snapshot
/// is inconsistent
pub fn read_saved_game<P>(path: P) -> anyhow::Result<Game>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let saved: SavedGame = read_json_file("saved game", path)?;
    log::debug!("read game saved at {} from {}", saved.saved_at, path.display());
    let game = Game::restore(saved.game)
        .with_context(|| format!("Malformed saved game: {}", path.display()))?;
    Ok(game)
}

/// Writes `game` with the current timestamp.
pub fn save_game<P>(game: &Game, path: P) -> anyhow::Result<()>
where
    P: AsRef<Path>,
{
    let saved = SavedGame {
        saved_at: Utc::now(),
        game: game.snapshot(),
    };
    write_json_file(&saved, path)
}

/// How [`load_game_or_new`] obtained its game.
#[derive(Debug)]
pub enum LoadedGame {
    Restored(Game),
    /// No file at the path
    Missing,
    /// The file exists but could not be read or restored
    Invalid(anyhow::Error),
}

impl LoadedGame {
    /// The restored game, or a fresh one.
    pub fn into_game(self) -> Game {
        match self {
            LoadedGame::Restored(game) => game,
            LoadedGame::Missing | LoadedGame::Invalid(_) => Game::new(),
        }
    }
}

/// Loads a saved game, recording why a fresh game is needed instead of failing.
pub fn load_game_or_new<P>(path: P) -> LoadedGame
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        log::warn!("no saved game at {}", path.display());
        return LoadedGame::Missing;
    }
    match read_saved_game(path) {
        Ok(game) => LoadedGame::Restored(game),
        Err(e) => {
            log::warn!("{e:#}");
            LoadedGame::Invalid(e)
        }
    }
}
