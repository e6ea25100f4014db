use std::str::FromStr;

use janggi_core::Coord;

use crate::error::CommandError;

/// A line typed at the move prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Equal squares pass the turn.
    Move { from: Coord, to: Coord },
    Quit,
}

impl Command {
    pub const QUIT: &'static str = "/q";
}

impl FromStr for Command {
    type Err = CommandError;

    /// Accepts `/q`, `A7 A6` and `A7,A6`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }
        if line == Self::QUIT {
            return Ok(Command::Quit);
        }

        let squares: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        let &[from, to] = squares.as_slice() else {
            return Err(CommandError::Arity(line.to_string()));
        };

        Ok(Command::Move {
            from: from.parse()?,
            to: to.parse()?,
        })
    }
}
