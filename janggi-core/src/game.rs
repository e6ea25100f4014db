//! Turn order, check tracking and game termination.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::check;
use crate::coord::Coord;
use crate::error::{CoordError, IllegalMove, MoveError};
use crate::piece::Piece;
use crate::rules;
use crate::Color;

/// Game lifecycle. `BlueWon` and `RedWon` are terminal.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    Unfinished,
    BlueWon,
    RedWon,
}

impl GameState {
    /// The state in which `color` has won.
    pub fn won_by(color: Color) -> GameState {
        match color {
            Color::Blue => GameState::BlueWon,
            Color::Red => GameState::RedWon,
        }
    }

    #[inline]
    pub fn is_over(self) -> bool {
        self != GameState::Unfinished
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameState::Unfinished => None,
            GameState::BlueWon => Some(Color::Blue),
            GameState::RedWon => Some(Color::Red),
        }
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameState::Unfinished => "UNFINISHED",
            GameState::BlueWon => "BLUE_WON",
            GameState::RedWon => "RED_WON",
        };
        f.write_str(name)
    }
}

/// What an accepted move did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    /// Source and destination were equal; only the turn changed.
    Passed,
    Moved {
        captured: Option<Piece>,
        /// The side now to move is in check.
        check: bool,
    },
    /// The side now to move is checkmated and the game is over.
    Checkmate { captured: Option<Piece> },
}

/// A game of Janggi: the board plus turn, check flag and lifecycle state.
///
/// Only the board and the side to move are read back when deserializing; the
/// check flag and state are recomputed from them.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "Snapshot")]
pub struct Game {
    board: Board,
    turn: Color,
    state: GameState,
    /// The side currently in check, if any.
    checked: Option<Color>,
}

impl Game {
    /// Start a new game from the standard layout. Blue moves first.
    pub fn new() -> Game {
        Game {
            board: Board::standard(),
            turn: Color::Blue,
            state: GameState::Unfinished,
            checked: None,
        }
    }

    /// Build a game from an arbitrary position with `turn` to move.
    ///
    /// The check flag and checkmate state are derived from the position.
    pub fn from_position(mut board: Board, turn: Color) -> Game {
        let in_check = check::is_attacked(&board, turn);
        let state = if in_check && !check::has_escape(&mut board, turn) {
            GameState::won_by(turn.opponent())
        } else {
            GameState::Unfinished
        };

        Game {
            board,
            turn,
            state,
            checked: in_check.then_some(turn),
        }
    }

    /// Attempt a move given in algebraic notation, returning whether it was
    /// accepted. See [`Game::try_move`] for the reason behind a rejection.
    pub fn make_move(&mut self, source: &str, destination: &str) -> bool {
        match self.try_move(source, destination) {
            Ok(_) => true,
            Err(err) => {
                log::debug!("rejected {source} -> {destination}: {err}");
                false
            }
        }
    }

    /// Attempt a move given in algebraic notation.
    ///
    /// Equal source and destination pass the turn. A rejected move leaves the
    /// game exactly as it was.
    pub fn try_move(&mut self, source: &str, destination: &str) -> Result<MoveOutcome, MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver);
        }

        let from: Coord = source.parse()?;
        let to: Coord = destination.parse()?;
        self.play(from, to)
    }

    /// Attempt a move between two squares.
    pub fn play(&mut self, from: Coord, to: Coord) -> Result<MoveOutcome, MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver);
        }

        let mover = self.turn;

        if from == to {
            if self.is_in_check(mover) {
                return Err(IllegalMove::PassInCheck.into());
            }
            self.turn = mover.opponent();
            return Ok(MoveOutcome::Passed);
        }

        let piece = self.board.get(from).ok_or(IllegalMove::EmptySource)?;
        if piece.color() != mover {
            return Err(IllegalMove::WrongTurn.into());
        }
        if !rules::is_legal_move(&self.board, from, to) {
            return Err(IllegalMove::Unreachable.into());
        }

        let trial = self
            .board
            .trial(from, to)
            .ok_or(IllegalMove::EmptySource)?;
        if check::is_attacked(&trial, mover) {
            return Err(IllegalMove::SelfCheck.into());
        }
        let captured = trial.captured();
        trial.commit();

        let opponent = mover.opponent();
        self.turn = opponent;
        self.checked = None;

        if !check::is_attacked(&self.board, opponent) {
            return Ok(MoveOutcome::Moved {
                captured,
                check: false,
            });
        }

        self.checked = Some(opponent);
        if check::has_escape(&mut self.board, opponent) {
            return Ok(MoveOutcome::Moved {
                captured,
                check: true,
            });
        }

        self.state = GameState::won_by(mover);
        log::info!("{mover} checkmates {opponent} with {from} -> {to}");
        Ok(MoveOutcome::Checkmate { captured })
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The side that moves after the current one.
    #[inline]
    pub fn next_turn(&self) -> Color {
        self.turn.opponent()
    }

    /// The side currently in check, if any.
    #[inline]
    pub fn checked(&self) -> Option<Color> {
        self.checked
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.checked == Some(color)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The piece on an algebraic square.
    pub fn piece_at(&self, algebraic: &str) -> Result<Option<Piece>, CoordError> {
        let coord: Coord = algebraic.parse()?;
        Ok(self.board.get(coord))
    }

    /// Board grid followed by the state and the side to move.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// Wire form of a [`Game`] before validation.
#[derive(Deserialize)]
struct Snapshot {
    board: Board,
    turn: Color,
}

impl TryFrom<Snapshot> for Game {
    type Error = String;

    fn try_from(Snapshot { board, turn }: Snapshot) -> Result<Self, Self::Error> {
        let waiting = turn.opponent();
        if check::is_attacked(&board, waiting) {
            return Err(format!("{waiting} is in check but {turn} is to move"));
        }
        Ok(Game::from_position(board, turn))
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{}", self.state)?;
        match self.checked {
            Some(color) => writeln!(f, "{}'s turn ({color} in check)", self.turn),
            None => writeln!(f, "{}'s turn", self.turn),
        }
    }
}
