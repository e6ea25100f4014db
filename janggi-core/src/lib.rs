//! Janggi (Korean chess) rules engine.
//!
//! # Board Layout
//!
//! ```text
//!        A   B   C   D   E   F   G   H   I
//!   1    0   1   2   3   4   5   6   7   8      Red home rank
//!   2    9  10  11 [12  13  14] 15  16  17      Red fortress: D1-F3
//!   3   18  19  20 [21  22  23] 24  25  26
//!  ...
//!   8   63  64  65 [66  67  68] 69  70  71      Blue fortress: D8-F10
//!   9   72  73  74 [75  76  77] 78  79  80
//!  10   81  82  83 [84  85  86] 87  88  89      Blue home rank
//! ```
//!
//! Squares are indexed row-major (`row * 9 + column`). Internally columns run
//! 0-8 and rows 0-9; algebraic notation maps column letter `A` to 0 and row
//! number `1` to 0.
//!
//! # Move Pipeline
//!
//! ```text
//! Game::make_move("E7", "E6")
//!   -> Coord parse            (InvalidCoordinate)
//!   -> Piece::is_legal_shape  (geometry only)
//!   -> rules::is_legal_move   (occupancy, blockers, cannon screens)
//!   -> Board::trial           (tentative apply, reverted on drop)
//!   -> check::is_attacked     (own general must be safe)
//!   -> check::has_escape      (checkmate search for the opponent)
//! ```

pub mod board;
pub mod check;
pub mod coord;
pub mod error;
pub mod game;
pub mod piece;
pub mod rules;

use serde::{Deserialize, Serialize};

pub use board::{Board, Trial, Undo};
pub use coord::{Coord, Fortress};
pub use error::{CoordError, IllegalMove, MoveError};
pub use game::{Game, GameState, MoveOutcome};
pub use piece::{Kind, Piece};

/// Side identifier. Blue (Cho) moves first and starts on rows 6-9.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Color {
    Blue,
    Red,
}

impl Color {
    /// Get the opposing side.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Blue => Color::Red,
            Color::Red => Color::Blue,
        }
    }

    /// Row delta of a forward step. Red advances down the board (increasing
    /// row), Blue advances up it.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::Blue => -1,
            Color::Red => 1,
        }
    }

    pub fn all() -> impl Iterator<Item = Color> {
        [Color::Blue, Color::Red].into_iter()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Blue => write!(f, "Blue"),
            Color::Red => write!(f, "Red"),
        }
    }
}
