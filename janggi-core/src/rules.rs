//! Occupancy rules layered on top of piece geometry: blockers, captures and
//! the cannon screen.
//!
//! Everything here is pseudo-legal: whether a move exposes the mover's own
//! General is decided by [`check`](crate::check).

use crate::board::Board;
use crate::coord::Coord;
use crate::piece::{Kind, Piece};

/// Check whether the piece on `from` may move to `to`.
///
/// Validation order:
/// 1. shape, via [`Piece::is_legal_shape`];
/// 2. the destination is empty or holds an enemy piece;
/// 3. the kind's obstruction rule.
///
/// Returns false if `from` is empty.
pub fn is_legal_move(board: &Board, from: Coord, to: Coord) -> bool {
    let Some(piece) = board.get(from) else {
        return false;
    };

    piece.is_legal_shape(from, to.column(), to.row())
        && empty_or_enemy(board, piece, to)
        && unobstructed(board, piece, from, to)
}

/// Every square the piece on `from` may move to, ignoring self-check.
pub fn legal_destinations(board: &Board, from: Coord) -> Vec<Coord> {
    Coord::all()
        .filter(|&to| is_legal_move(board, from, to))
        .collect()
}

/// True unless `to` holds a piece of the mover's own color.
#[inline]
fn empty_or_enemy(board: &Board, piece: Piece, to: Coord) -> bool {
    !board
        .get(to)
        .is_some_and(|target| target.color() == piece.color())
}

/// Kind-specific obstruction check. Assumes the shape already matched.
fn unobstructed(board: &Board, piece: Piece, from: Coord, to: Coord) -> bool {
    match piece.kind() {
        Kind::Horse => horse_unblocked(board, from, to),
        Kind::Elephant => elephant_unblocked(board, from, to),
        Kind::Chariot => from.between(to).all(|square| board.is_empty(square)),
        Kind::Cannon => cannon_has_screen(board, from, to),
        // Single steps: nothing can stand in between.
        Kind::General | Kind::Guard | Kind::Soldier => true,
    }
}

/// The Horse first steps orthogonally along its long leg; a piece on that
/// square blocks it.
fn horse_unblocked(board: &Board, from: Coord, to: Coord) -> bool {
    let columns = to.column() - from.column();
    let rows = to.row() - from.row();

    let leg = if columns.abs() == 2 {
        from.offset(columns.signum(), 0)
    } else {
        from.offset(0, rows.signum())
    };

    leg.is_some_and(|square| board.is_empty(square))
}

/// The Elephant steps orthogonally, then diagonally twice. The first two
/// squares of that path must both be empty.
fn elephant_unblocked(board: &Board, from: Coord, to: Coord) -> bool {
    let (dc, dr) = (
        (to.column() - from.column()).signum(),
        (to.row() - from.row()).signum(),
    );

    let (first, second) = if (to.column() - from.column()).abs() == 3 {
        (from.offset(dc, 0), from.offset(2 * dc, dr))
    } else {
        (from.offset(0, dr), from.offset(dc, 2 * dr))
    };

    [first, second]
        .into_iter()
        .all(|square| square.is_some_and(|square| board.is_empty(square)))
}

/// The Cannon needs exactly one piece between it and its destination, and
/// that screen may not be another Cannon. It may never capture a Cannon.
fn cannon_has_screen(board: &Board, from: Coord, to: Coord) -> bool {
    let is_cannon = |piece: Piece| piece.kind() == Kind::Cannon;

    if board.get(to).is_some_and(is_cannon) {
        return false;
    }

    let mut screens = from.between(to).filter_map(|square| board.get(square));
    match (screens.next(), screens.next()) {
        (Some(screen), None) => !is_cannon(screen),
        _ => false,
    }
}
