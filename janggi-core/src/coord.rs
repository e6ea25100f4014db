//! Board coordinates, algebraic notation and fortress geometry.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoordError;
use crate::Color;

/// A square on the 9x10 board.
///
/// A `Coord` is always on the board: every constructor bounds-checks, so code
/// holding one never needs to re-validate it. On the wire it travels in
/// algebraic form (`"E9"`).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coord {
    row: i8,
    column: i8,
}

impl Coord {
    pub const COLUMNS: i8 = 9;
    pub const ROWS: i8 = 10;
    pub const COUNT: usize = (Self::COLUMNS * Self::ROWS) as usize;

    /// Create a coordinate, or `None` if it lies off the board.
    #[inline]
    pub fn new(column: i8, row: i8) -> Option<Coord> {
        if Self::in_bounds(column, row) {
            Some(Coord { row, column })
        } else {
            None
        }
    }

    #[inline]
    pub fn in_bounds(column: i8, row: i8) -> bool {
        (0..Self::COLUMNS).contains(&column) && (0..Self::ROWS).contains(&row)
    }

    /// Create a coordinate from a row-major square index (0-89).
    #[inline]
    pub fn from_index(index: usize) -> Option<Coord> {
        if index >= Self::COUNT {
            return None;
        }
        let index = index as i8;
        Coord::new(index % Self::COLUMNS, index / Self::COLUMNS)
    }

    /// Row-major square index (0-89).
    #[inline]
    pub fn index(self) -> usize {
        (self.row * Self::COLUMNS + self.column) as usize
    }

    #[inline]
    pub fn column(self) -> i8 {
        self.column
    }

    #[inline]
    pub fn row(self) -> i8 {
        self.row
    }

    /// Shift by a column/row delta, or `None` if that leaves the board.
    #[inline]
    pub fn offset(self, columns: i8, rows: i8) -> Option<Coord> {
        Coord::new(self.column + columns, self.row + rows)
    }

    /// Iterate over all 90 squares in index order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..Self::COUNT).filter_map(Coord::from_index)
    }

    /// Squares strictly between `self` and `to` along a row, column or
    /// diagonal. Empty for any other geometry or for adjacent squares.
    pub fn between(self, to: Coord) -> impl Iterator<Item = Coord> {
        let columns = to.column - self.column;
        let rows = to.row - self.row;
        let aligned = columns == 0 || rows == 0 || columns.abs() == rows.abs();
        let steps = if aligned { columns.abs().max(rows.abs()) } else { 0 };
        let (dc, dr) = (columns.signum(), rows.signum());

        (1..steps.max(1)).filter_map(move |step| self.offset(dc * step, dr * step))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'A' + self.column as u8) as char, self.row + 1)
    }
}

impl FromStr for Coord {
    type Err = CoordError;

    /// Parse algebraic notation: a column letter `A`-`I` (either case)
    /// followed by a row number `1`-`10`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(|| CoordError::Malformed(s.to_string()))?;
        let number = chars.as_str();

        if number.is_empty()
            || number.len() > 2
            || number.starts_with('0')
            || !number.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(CoordError::Malformed(s.to_string()));
        }

        let column = match letter.to_ascii_uppercase() {
            upper @ 'A'..='I' => (upper as u8 - b'A') as i8,
            _ => return Err(CoordError::Column(letter)),
        };

        let row = number
            .parse::<i8>()
            .ok()
            .filter(|row| (1..=Self::ROWS).contains(row))
            .ok_or_else(|| CoordError::Row(number.to_string()))?;

        Coord::new(column, row - 1).ok_or_else(|| CoordError::Malformed(s.to_string()))
    }
}

impl TryFrom<String> for Coord {
    type Error = CoordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Coord> for String {
    fn from(coord: Coord) -> Self {
        coord.to_string()
    }
}

// ============================================================================
// FORTRESS GEOMETRY
// ============================================================================

/// One of the two 3x3 palaces.
///
/// ```text
///   corner . corner        (3,0) (4,0) (5,0)
///     .  center  .         (3,1) (4,1) (5,1)      Red fortress
///   corner . corner        (3,2) (4,2) (5,2)
/// ```
///
/// The diagonal lines join the four corners through the center.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Fortress {
    owner: Color,
}

impl Fortress {
    const COLUMNS: std::ops::RangeInclusive<i8> = 3..=5;

    /// The fortress a color's General and Guards live in.
    #[inline]
    pub fn home(owner: Color) -> Fortress {
        Fortress { owner }
    }

    /// The fortress containing `coord`, if any.
    pub fn containing(coord: Coord) -> Option<Fortress> {
        Color::all().map(Fortress::home).find(|fortress| fortress.contains(coord))
    }

    #[inline]
    pub fn owner(self) -> Color {
        self.owner
    }

    fn rows(self) -> std::ops::RangeInclusive<i8> {
        match self.owner {
            Color::Red => 0..=2,
            Color::Blue => 7..=9,
        }
    }

    #[inline]
    pub fn contains(self, coord: Coord) -> bool {
        Self::COLUMNS.contains(&coord.column()) && self.rows().contains(&coord.row())
    }

    pub fn center(self) -> Coord {
        match self.owner {
            Color::Red => Coord { row: 1, column: 4 },
            Color::Blue => Coord { row: 8, column: 4 },
        }
    }

    /// True for the five points the diagonal lines pass through.
    pub fn on_diagonal(self, coord: Coord) -> bool {
        if !self.contains(coord) {
            return false;
        }
        let center = self.center();
        (coord.column() - center.column()).abs() == (coord.row() - center.row()).abs()
    }

    /// True if `from -> to` runs along one of this fortress's diagonal lines:
    /// corner to center, center to corner, or corner to the opposite corner.
    pub fn diagonal_move(self, from: Coord, to: Coord) -> bool {
        let columns = to.column() - from.column();
        let rows = to.row() - from.row();
        columns != 0
            && columns.abs() == rows.abs()
            && self.on_diagonal(from)
            && self.on_diagonal(to)
    }

    /// Like [`Fortress::diagonal_move`] but limited to a single step.
    pub fn diagonal_step(self, from: Coord, to: Coord) -> bool {
        (to.column() - from.column()).abs() == 1 && self.diagonal_move(from, to)
    }
}
