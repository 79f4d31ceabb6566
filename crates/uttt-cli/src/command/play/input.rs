use std::str::FromStr;

/// One line typed at a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TurnInput {
    /// `row col`, both zero-based
    Coords { row: usize, col: usize },
    Help,
    Save,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("expected 'row col' (e.g. '1 2'), 'help', 'save' or 'quit', got {input:?}")]
pub(crate) struct TurnInputError {
    input: String,
}

impl FromStr for TurnInput {
    type Err = TurnInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || TurnInputError {
            input: s.to_owned(),
        };
        match s.to_ascii_lowercase().as_str() {
            "help" => return Ok(Self::Help),
            "save" => return Ok(Self::Save),
            "quit" | "exit" => return Ok(Self::Quit),
            _ => {}
        }

        let mut parts = s.split_whitespace();
        let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(err());
        };
        let row = row.parse().map_err(|_| err())?;
        let col = col.parse().map_err(|_| err())?;
        Ok(Self::Coords { row, col })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coords() {
        assert_eq!(
            "1 2".parse::<TurnInput>().unwrap(),
            TurnInput::Coords { row: 1, col: 2 }
        );
        assert_eq!(
            "  0   0 \n".parse::<TurnInput>().unwrap(),
            TurnInput::Coords { row: 0, col: 0 }
        );
        // Range is checked by the game, not the parser.
        assert_eq!(
            "5 7".parse::<TurnInput>().unwrap(),
            TurnInput::Coords { row: 5, col: 7 }
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("help".parse::<TurnInput>().unwrap(), TurnInput::Help);
        assert_eq!("SAVE".parse::<TurnInput>().unwrap(), TurnInput::Save);
        assert_eq!("quit".parse::<TurnInput>().unwrap(), TurnInput::Quit);
    }

    #[test]
    fn test_parse_errors() {
        for input in ["", "1", "1 2 3", "a b", "-1 0", "1,2"] {
            let err = input.parse::<TurnInput>().unwrap_err();
            assert!(err.to_string().starts_with("expected 'row col'"), "{input:?}");
        }
    }
}
