//! Board storage, move application and text rendering.

use std::ops::{Deref, Index};

use serde::{Deserialize, Serialize};

use crate::coord::{Coord, Fortress};
use crate::piece::{Kind, Piece};
use crate::Color;

/// Undo information for reverting a relocation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Undo {
    pub from: Coord,
    pub to: Coord,
    /// The piece that moved.
    pub moved: Piece,
    /// What stood on the destination before the move, if anything.
    pub captured: Option<Piece>,
}

/// Mapping from square to occupying piece.
///
/// The board is the single owner of piece positions: a [`Piece`] carries no
/// coordinates of its own, so the two can never disagree.
///
/// Deserialized boards must hold exactly one General per side, inside its
/// home fortress.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<Piece>>", into = "Vec<Option<Piece>>")]
pub struct Board {
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// Back-rank order from column A to column I. The General sits one row
    /// in front of the rank, in the fortress center.
    const BACK_RANK: [Option<Kind>; 9] = [
        Some(Kind::Chariot),
        Some(Kind::Elephant),
        Some(Kind::Horse),
        Some(Kind::Guard),
        None,
        Some(Kind::Guard),
        Some(Kind::Elephant),
        Some(Kind::Horse),
        Some(Kind::Chariot),
    ];

    /// Create an empty board.
    pub fn new() -> Board {
        Board {
            squares: vec![None; Coord::COUNT],
        }
    }

    /// Create the standard opening position: 16 pieces per side, Red on rows
    /// 0-3 and Blue mirrored on rows 6-9.
    pub fn standard() -> Board {
        let mut board = Board::new();

        for color in Color::all() {
            // Rows counted from the color's own back rank.
            let rank = |distance: i8| match color {
                Color::Red => distance,
                Color::Blue => Coord::ROWS - 1 - distance,
            };
            let mut put = |column: i8, distance: i8, kind: Kind| {
                if let Some(coord) = Coord::new(column, rank(distance)) {
                    board.place(coord, Piece::new(color, kind));
                }
            };

            for (column, kind) in Self::BACK_RANK.iter().enumerate() {
                if let Some(kind) = *kind {
                    put(column as i8, 0, kind);
                }
            }
            put(4, 1, Kind::General);
            put(1, 2, Kind::Cannon);
            put(7, 2, Kind::Cannon);
            for column in (0..Coord::COLUMNS).step_by(2) {
                put(column, 3, Kind::Soldier);
            }
        }

        board
    }

    /// Get the piece on a square.
    #[inline]
    pub fn get(&self, coord: Coord) -> Option<Piece> {
        self.squares[coord.index()]
    }

    /// Check if a square is empty.
    #[inline]
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.squares[coord.index()].is_none()
    }

    /// Put a piece on a square, returning whatever stood there.
    /// Does NOT validate - caller must ensure the placement makes sense.
    pub fn place(&mut self, coord: Coord, piece: Piece) -> Option<Piece> {
        self.squares[coord.index()].replace(piece)
    }

    /// Clear a square, returning the piece that stood there.
    pub fn remove(&mut self, coord: Coord) -> Option<Piece> {
        self.squares[coord.index()].take()
    }

    /// Iterate over occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(index, square)| Some((Coord::from_index(index)?, (*square)?)))
    }

    /// Iterate over the squares holding pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color() == color)
    }

    /// Count the pieces of one color.
    pub fn count(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }

    /// Find the square holding a color's General.
    pub fn general(&self, color: Color) -> Option<Coord> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind() == Kind::General)
            .map(|(coord, _)| coord)
    }

    // ========== Apply & Undo ==========

    /// Relocate the piece on `from` to `to`, capturing anything there.
    ///
    /// Returns `None` (and leaves the board untouched) if `from` is empty.
    /// Legality is not checked; see [`rules::is_legal_move`](crate::rules::is_legal_move).
    pub fn apply(&mut self, from: Coord, to: Coord) -> Option<Undo> {
        let moved = self.remove(from)?;
        let captured = self.place(to, moved);
        Some(Undo {
            from,
            to,
            moved,
            captured,
        })
    }

    /// Undo a relocation. This is the inverse of `apply()`.
    pub fn undo(&mut self, undo: &Undo) {
        self.squares[undo.to.index()] = undo.captured;
        self.squares[undo.from.index()] = Some(undo.moved);
    }

    /// Tentatively relocate a piece. The edit is reverted when the returned
    /// guard is dropped unless it is [committed](Trial::commit).
    pub fn trial(&mut self, from: Coord, to: Coord) -> Option<Trial<'_>> {
        let undo = self.apply(from, to)?;
        Some(Trial {
            board: self,
            undo,
            armed: true,
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Coord> for Board {
    type Output = Option<Piece>;

    fn index(&self, coord: Coord) -> &Self::Output {
        &self.squares[coord.index()]
    }
}

impl TryFrom<Vec<Option<Piece>>> for Board {
    type Error = String;

    fn try_from(squares: Vec<Option<Piece>>) -> Result<Self, Self::Error> {
        if squares.len() != Coord::COUNT {
            return Err(format!(
                "expected {} squares, got {}",
                Coord::COUNT,
                squares.len()
            ));
        }
        let board = Board { squares };
        for color in Color::all() {
            let generals: Vec<Coord> = board
                .pieces_of(color)
                .filter(|(_, piece)| piece.kind() == Kind::General)
                .map(|(coord, _)| coord)
                .collect();
            match generals.as_slice() {
                &[general] if Fortress::home(color).contains(general) => {}
                &[general] => {
                    return Err(format!("{color} general on {general} is outside its fortress"))
                }
                _ => {
                    return Err(format!(
                        "expected one {color} general, got {}",
                        generals.len()
                    ))
                }
            }
        }
        Ok(board)
    }
}

impl From<Board> for Vec<Option<Piece>> {
    fn from(board: Board) -> Self {
        board.squares
    }
}

/// A relocation that is undone on drop.
///
/// Derefs to the board in its edited state so check evaluation can run on the
/// hypothetical position. The board stays mutably borrowed for the guard's
/// whole lifetime, so nothing else can observe or interleave with the edit.
pub struct Trial<'a> {
    board: &'a mut Board,
    undo: Undo,
    armed: bool,
}

impl Trial<'_> {
    /// Keep the edit, returning the undo record.
    pub fn commit(mut self) -> Undo {
        self.armed = false;
        self.undo
    }

    /// The piece captured by the edit, if any.
    pub fn captured(&self) -> Option<Piece> {
        self.undo.captured
    }
}

impl Deref for Trial<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.board.undo(&self.undo);
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

impl std::fmt::Display for Board {
    /// Fixed-width grid, one cell per square, row 1 at the top.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const RULE: usize = 75;

        write!(f, "  ")?;
        for column in 0..Coord::COLUMNS {
            write!(f, "|   {}   ", (b'A' + column as u8) as char)?;
        }
        writeln!(f, "|")?;
        writeln!(f, "{}", "-".repeat(RULE))?;

        for row in 0..Coord::ROWS {
            write!(f, "{:<2}", row + 1)?;
            for column in 0..Coord::COLUMNS {
                match Coord::new(column, row).and_then(|coord| self.get(coord)) {
                    Some(piece) => write!(f, "|   {piece}   ")?,
                    None => write!(f, "|  ---  ")?,
                }
            }
            writeln!(f, "|")?;
            writeln!(f, "{}", "-".repeat(RULE))?;
        }

        Ok(())
    }
}
