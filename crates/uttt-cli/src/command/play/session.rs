use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use uttt_engine::{Game, Outcome, Side};
use uttt_evaluator::{MoveAdvisor, SearchPreset};

use crate::{
    util,
    view::{AdviceView, BoardView},
};

use super::input::TurnInput;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionEnd {
    Finished(Outcome),
    /// `quit` or end of input
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Line-based two-player loop: prompts each side in turn on `input`/`output`.
#[derive(Debug)]
pub(crate) struct PlaySession<R, W> {
    game: Game,
    input: R,
    output: W,
    save_path: PathBuf,
    styled: bool,
    preset: SearchPreset,
}

impl<R, W> PlaySession<R, W>
where
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(game: Game, input: R, output: W, save_path: PathBuf) -> Self {
        Self {
            game,
            input,
            output,
            save_path,
            styled: false,
            preset: SearchPreset::default(),
        }
    }

    /// Highlights the last move and the suggested move with terminal colors.
    pub(crate) fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub(crate) fn preset(mut self, preset: SearchPreset) -> Self {
        self.preset = preset;
        self
    }

    #[cfg(test)]
    pub(crate) fn game(&self) -> &Game {
        &self.game
    }

    /// Runs turns until the game is decided or a side quits.
    pub(crate) fn run(&mut self) -> anyhow::Result<SessionEnd> {
        loop {
            self.show_board()?;
            let outcome = self.game.outcome();
            if !outcome.is_in_progress() {
                writeln!(self.output, "{}", end_message(outcome))?;
                return Ok(SessionEnd::Finished(outcome));
            }
            if self.take_turn()? == Flow::Quit {
                writeln!(self.output, "Leaving the game.")?;
                return Ok(SessionEnd::Quit);
            }
        }
    }

    fn show_board(&mut self) -> anyhow::Result<()> {
        let view = BoardView::new(self.game.board())
            .highlight(self.game.last_move())
            .styled(self.styled);
        writeln!(self.output, "\nUltimate Tic-Tac-Toe board:\n\n{view}")?;
        Ok(())
    }

    fn take_turn(&mut self) -> anyhow::Result<Flow> {
        let side = self.game.to_move();
        let active = self.game.active();
        let whose = match side {
            Side::Player => "Your",
            Side::Opponent => "Opponent's",
        };
        writeln!(self.output, "{whose} move must be in the sub-board at {active}.")?;

        if self.game.needs_board_selection() {
            writeln!(
                self.output,
                "The designated sub-board at {active} is already won or full."
            )?;
            if self.select_board()? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }

        let prompt = match side {
            Side::Player => "Enter your move as 'row col', or type 'help', 'save' or 'quit':",
            Side::Opponent => "Enter opponent's move as 'row col', or type 'save' or 'quit':",
        };
        loop {
            let Some(input) = self.prompt(prompt)? else {
                return Ok(Flow::Quit);
            };
            match input {
                TurnInput::Coords { row, col } => match self.game.play(row, col) {
                    Ok(_) => return Ok(Flow::Continue),
                    Err(e) => writeln!(self.output, "Invalid move: {e}. Try again.")?,
                },
                TurnInput::Help if side == Side::Player => self.help()?,
                TurnInput::Help => writeln!(self.output, "Help is only available on your turn.")?,
                TurnInput::Save => self.save()?,
                TurnInput::Quit => return Ok(Flow::Quit),
            }
        }
    }

    fn select_board(&mut self) -> anyhow::Result<Flow> {
        loop {
            let Some(input) = self.prompt("Select a new sub-board as 'row col':")? else {
                return Ok(Flow::Quit);
            };
            match input {
                TurnInput::Coords { row, col } => match self.game.select_board(row, col) {
                    Ok(at) => {
                        writeln!(self.output, "Active sub-board changed to {at}.")?;
                        return Ok(Flow::Continue);
                    }
                    Err(e) => writeln!(self.output, "Invalid choice: {e}.")?,
                },
                TurnInput::Help => writeln!(self.output, "Select a sub-board first.")?,
                TurnInput::Save => self.save()?,
                TurnInput::Quit => return Ok(Flow::Quit),
            }
        }
    }

    /// Prints `message` and reads lines until one parses; `None` at end of input.
    fn prompt(&mut self, message: &str) -> anyhow::Result<Option<TurnInput>> {
        loop {
            writeln!(self.output, "{message}")?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("Failed to read input")?;
            if read == 0 {
                log::info!("end of input");
                return Ok(None);
            }
            match line.parse() {
                Ok(input) => return Ok(Some(input)),
                Err(e) => writeln!(self.output, "Invalid input: {e}.")?,
            }
        }
    }

    fn help(&mut self) -> anyhow::Result<()> {
        let active = self.game.active();
        let advice = MoveAdvisor::new(self.preset).advise(self.game.board_mut(), active);
        let view = AdviceView::new(&advice).styled(self.styled);
        write!(self.output, "{view}")?;
        Ok(())
    }

    fn save(&mut self) -> anyhow::Result<()> {
        let path = self.save_path.display();
        match util::save_game(&self.game, &self.save_path) {
            Ok(()) => writeln!(self.output, "Game saved to {path}.")?,
            Err(e) => {
                log::warn!("{e:#}");
                writeln!(self.output, "Could not save the game: {e:#}")?;
            }
        }
        Ok(())
    }
}

fn end_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::PlayerWin => "You win!",
        Outcome::OpponentWin => "Opponent wins!",
        Outcome::Draw => "It's a draw!",
        Outcome::InProgress => "The game is still in progress.",
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, io::Cursor, process};

    use uttt_engine::{Coord, GameSnapshot, IllegalMoveError, SuperBoard};

    use super::*;

    fn game_from(art: &str, active: (usize, usize), to_move: Side) -> Game {
        Game::restore(GameSnapshot {
            board: SuperBoard::from_ascii(art),
            active: Coord::new(active.0, active.1).unwrap(),
            last_move: None,
            to_move,
        })
        .unwrap()
    }

    /// Runs a session over scripted input; returns how it ended, the final game and the output.
    fn play(game: Game, script: &str) -> (SessionEnd, Game, String) {
        let mut output = Vec::new();
        let mut session = PlaySession::new(
            game,
            Cursor::new(script.to_owned()),
            &mut output,
            env::temp_dir().join("uttt-cli-unused.json"),
        );
        let end = session.run().unwrap();
        let game = session.game().clone();
        drop(session);
        (end, game, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_player_completes_macro_win() {
        let game = game_from(
            r"
            OOO OOO OO.
            ... ... XX.
            ... ... ...
            ... X.. ...
            ... .X. ...
            ... ... ...
            ... ... X..
            ... ... ...
            ... ... ...
            ",
            (0, 2),
            Side::Player,
        );
        let (end, game, output) = play(game, "0 2\n");
        assert_eq!(end, SessionEnd::Finished(Outcome::PlayerWin));
        assert_eq!(game.outcome(), Outcome::PlayerWin);
        assert!(output.ends_with("You win!\n"), "{output}");
    }

    #[test]
    fn test_opponent_completes_macro_win() {
        let game = game_from(
            r"
            X.. ... ...
            .X. ... ...
            ..X ... ...
            ... X.. ...
            ... .X. ...
            ... ..X ...
            O.. ... X..
            .O. ... .X.
            ... ... ...
            ",
            (2, 2),
            Side::Opponent,
        );
        let (end, _, output) = play(game, "2 2\n");
        assert_eq!(end, SessionEnd::Finished(Outcome::OpponentWin));
        assert!(output.contains("Opponent's move must be in the sub-board at (2, 2)."));
        assert!(output.ends_with("Opponent wins!\n"));
    }

    #[test]
    fn test_last_cell_draws() {
        let game = game_from(
            r"
            OOO XXX OOO
            ... ... ...
            ... ... ...
            XXX OOO XXX
            ... ... ...
            ... ... ...
            XXX OOO OXO
            ... ... OXX
            ... ... XO.
            ",
            (2, 2),
            Side::Player,
        );
        let (end, game, output) = play(game, "2 2\n");
        assert_eq!(end, SessionEnd::Finished(Outcome::Draw));
        assert!(game.board().is_exhausted());
        assert!(output.ends_with("It's a draw!\n"));
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let (end, game, output) = play(Game::new(), "foo\n3 3\n1 1\n");
        assert_eq!(end, SessionEnd::Quit);
        assert!(output.contains("Invalid input: expected 'row col'"));
        let err = IllegalMoveError::OutOfRange(Coord::new(3, 3).unwrap_err());
        assert!(output.contains(&format!("Invalid move: {err}. Try again.")));

        // The valid move went through and input ran out on the opponent's turn.
        assert_eq!(game.to_move(), Side::Opponent);
        assert_eq!(game.active(), Coord::new(1, 1).unwrap());
        assert!(output.contains("Enter opponent's move as 'row col'"));
        assert!(output.ends_with("Leaving the game.\n"));
    }

    #[test]
    fn test_occupied_cell_is_rejected() {
        let (_, game, output) = play(Game::new(), "0 0\n0 0\n0 1\nquit\n");
        assert!(output.contains("Invalid move: cell (0, 0, 0, 0) is already occupied. Try again."));
        assert_eq!(game.to_move(), Side::Player);
        assert_eq!(game.active(), Coord::new(0, 1).unwrap());
    }

    #[test]
    fn test_help_prints_advice_for_player_only() {
        let (_, game, output) = play(Game::new(), "help\n1 1\nhelp\nquit\n");
        assert!(output.contains("The best move is: (0, 0)"));
        assert_eq!(output.matches(" Move (").count(), 9);
        assert!(output.contains("Help is only available on your turn."));
        let mut expected = Game::new();
        expected.play(1, 1).unwrap();
        assert_eq!(game.board(), expected.board());
    }

    #[test]
    fn test_board_selection_when_designated_is_won() {
        let game = game_from(
            r"
            ... XXX ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ",
            (0, 1),
            Side::Player,
        );
        let (end, game, output) = play(game, "0 1\n2 2\n1 1\nquit\n");
        assert_eq!(end, SessionEnd::Quit);
        assert!(output.contains("The designated sub-board at (0, 1) is already won or full."));
        assert!(output.contains("Invalid choice: sub-board (0, 1) is already won or full."));
        assert!(output.contains("Active sub-board changed to (2, 2)."));
        let last = game.last_move().unwrap();
        assert_eq!(last.board, Coord::new(2, 2).unwrap());
        assert_eq!(last.cell, Coord::new(1, 1).unwrap());
    }

    #[test]
    fn test_save_writes_loadable_game() {
        let path = env::temp_dir().join(format!("uttt-cli-{}-session-save.json", process::id()));
        let mut output = Vec::new();
        let mut session = PlaySession::new(
            Game::new(),
            Cursor::new("2 0\nsave\nquit\n"),
            &mut output,
            path.clone(),
        );
        assert_eq!(session.run().unwrap(), SessionEnd::Quit);
        let played = session.game().clone();
        drop(session);

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains(&format!("Game saved to {}.", path.display())));
        let loaded = util::read_saved_game(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, played);
        assert_eq!(loaded.to_move(), Side::Opponent);
    }

    #[test]
    fn test_last_move_is_rendered() {
        let (_, _, output) = play(Game::new(), "1 2\nquit\n");
        assert!(output.contains(". . O | . . . | . . ."));
    }
}
