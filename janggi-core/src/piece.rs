//! Piece identity and per-kind movement geometry.

use serde::{Deserialize, Serialize};

use crate::coord::{Coord, Fortress};
use crate::Color;

/// Piece type.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Kind {
    Chariot,
    Elephant,
    Horse,
    Guard,
    General,
    Cannon,
    Soldier,
}

impl Kind {
    /// Get all kinds as an iterator.
    pub fn all() -> impl Iterator<Item = Kind> {
        [
            Kind::Chariot,
            Kind::Elephant,
            Kind::Horse,
            Kind::Guard,
            Kind::General,
            Kind::Cannon,
            Kind::Soldier,
        ]
        .into_iter()
    }
}

/// A piece: color and kind. Position is owned by the [`Board`](crate::Board).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: Kind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: Kind) -> Piece {
        Piece { color, kind }
    }

    #[inline]
    pub fn color(self) -> Color {
        self.color
    }

    #[inline]
    pub fn kind(self) -> Kind {
        self.kind
    }

    /// Check whether moving from `from` to (`column`, `row`) matches this
    /// piece's movement pattern.
    ///
    /// Pure geometry: board occupancy (blockers, captures, cannon screens) is
    /// handled by [`rules::is_legal_move`](crate::rules::is_legal_move).
    /// Destinations off the board and the source square itself are rejected.
    pub fn is_legal_shape(self, from: Coord, column: i8, row: i8) -> bool {
        let Some(to) = Coord::new(column, row) else {
            return false;
        };
        if to == from {
            return false;
        }

        let columns = to.column() - from.column();
        let rows = to.row() - from.row();

        match self.kind {
            Kind::Horse => matches!((columns.abs(), rows.abs()), (2, 1) | (1, 2)),
            Kind::Elephant => matches!((columns.abs(), rows.abs()), (3, 2) | (2, 3)),
            Kind::Chariot | Kind::Cannon => {
                columns == 0
                    || rows == 0
                    || Fortress::containing(from).is_some_and(|f| f.diagonal_move(from, to))
            }
            Kind::General | Kind::Guard => {
                let home = Fortress::home(self.color);
                home.contains(to)
                    && (columns.abs() + rows.abs() == 1 || home.diagonal_step(from, to))
            }
            Kind::Soldier => {
                let forward = self.color.forward();
                let enemy = Fortress::home(self.color.opponent());
                (columns == 0 && rows == forward)
                    || (rows == 0 && columns.abs() == 1)
                    || (rows == forward && enemy.diagonal_step(from, to))
            }
        }
    }

    /// Board glyph.
    pub fn glyph(self) -> char {
        match (self.color, self.kind) {
            (Color::Red, Kind::Chariot) => '♜',
            (Color::Red, Kind::Elephant) => '♣',
            (Color::Red, Kind::Horse) => '♞',
            (Color::Red, Kind::Guard) => '♝',
            (Color::Red, Kind::General) => '♚',
            (Color::Red, Kind::Cannon) => '♛',
            (Color::Red, Kind::Soldier) => '♟',
            (Color::Blue, Kind::Chariot) => '♖',
            (Color::Blue, Kind::Elephant) => '♧',
            (Color::Blue, Kind::Horse) => '♘',
            (Color::Blue, Kind::Guard) => '♗',
            (Color::Blue, Kind::General) => '♔',
            (Color::Blue, Kind::Cannon) => '♕',
            (Color::Blue, Kind::Soldier) => '♙',
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
