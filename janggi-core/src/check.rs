//! Check and checkmate detection.
//!
//! Every query here works on the board alone; whose turn it is belongs to
//! [`Game`](crate::Game).

use crate::board::Board;
use crate::coord::Coord;
use crate::rules;
use crate::Color;

/// The square of `color`'s General, if it is on the board.
#[inline]
pub fn general_position(board: &Board, color: Color) -> Option<Coord> {
    board.general(color)
}

/// Check whether any enemy piece can move onto `color`'s General.
///
/// A side without a General is never attacked.
pub fn is_attacked(board: &Board, color: Color) -> bool {
    let Some(general) = general_position(board, color) else {
        return false;
    };

    board
        .pieces_of(color.opponent())
        .any(|(from, _)| rules::is_legal_move(board, from, general))
}

/// Check whether moving `from -> to` leaves the mover's General safe.
///
/// The move is simulated on the board and always reverted before returning.
/// Returns false for pseudo-illegal moves and for an empty `from`.
pub fn would_escape_check(board: &mut Board, from: Coord, to: Coord) -> bool {
    let Some(mover) = board.get(from) else {
        return false;
    };
    if !rules::is_legal_move(board, from, to) {
        return false;
    }

    match board.trial(from, to) {
        Some(trial) => !is_attacked(&trial, mover.color()),
        None => false,
    }
}

/// Check whether `color` has any move after which its General is not
/// attacked. A side that is attacked and has no escape is checkmated.
pub fn has_escape(board: &mut Board, color: Color) -> bool {
    let sources: Vec<Coord> = board.pieces_of(color).map(|(coord, _)| coord).collect();

    for from in sources {
        for to in Coord::all() {
            if would_escape_check(board, from, to) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Kind, Piece};

    fn c(column: i8, row: i8) -> Coord {
        Coord::new(column, row).unwrap()
    }

    fn board_with(pieces: &[(i8, i8, Color, Kind)]) -> Board {
        let mut board = Board::new();
        for &(column, row, color, kind) in pieces {
            board.place(c(column, row), Piece::new(color, kind));
        }
        board
    }

    /// Blue General on E10, one Red Chariot down the E file and one along
    /// row 10.
    fn mated() -> Board {
        board_with(&[
            (4, 9, Color::Blue, Kind::General),
            (4, 7, Color::Red, Kind::Chariot),
            (0, 9, Color::Red, Kind::Chariot),
            (4, 1, Color::Red, Kind::General),
        ])
    }

    #[test]
    fn test_general_position() {
        let board = Board::standard();
        assert_eq!(general_position(&board, Color::Red), Some(c(4, 1)));
        assert_eq!(general_position(&board, Color::Blue), Some(c(4, 8)));
        assert_eq!(general_position(&Board::new(), Color::Blue), None);
    }

    #[test]
    fn test_opening_not_attacked() {
        let board = Board::standard();
        assert!(!is_attacked(&board, Color::Blue));
        assert!(!is_attacked(&board, Color::Red));
    }

    #[test]
    fn test_missing_general_never_attacked() {
        let board = board_with(&[(4, 4, Color::Red, Kind::Chariot)]);
        assert!(!is_attacked(&board, Color::Blue));
    }

    #[test]
    fn test_chariot_gives_check() {
        let board = board_with(&[
            (4, 9, Color::Blue, Kind::General),
            (4, 5, Color::Red, Kind::Chariot),
        ]);
        assert!(is_attacked(&board, Color::Blue));
        assert!(!is_attacked(&board, Color::Red));
    }

    #[test]
    fn test_blocking_piece_escapes() {
        let mut board = board_with(&[
            (4, 9, Color::Blue, Kind::General),
            (3, 8, Color::Blue, Kind::Guard),
            (4, 5, Color::Red, Kind::Chariot),
        ]);
        let before = board.clone();

        assert!(would_escape_check(&mut board, c(3, 8), c(4, 8)));
        assert!(!would_escape_check(&mut board, c(3, 8), c(3, 7)));
        // Not a guard move at all.
        assert!(!would_escape_check(&mut board, c(3, 8), c(3, 6)));
        assert_eq!(board, before);
        assert!(has_escape(&mut board, Color::Blue));
        assert_eq!(board, before);
    }

    #[test]
    fn test_single_chariot_is_not_mate() {
        let mut board = board_with(&[
            (4, 9, Color::Blue, Kind::General),
            (4, 7, Color::Red, Kind::Chariot),
        ]);
        assert!(is_attacked(&board, Color::Blue));
        // D10 is off every line the chariot can use from E8.
        assert!(would_escape_check(&mut board, c(4, 9), c(3, 9)));
        assert!(has_escape(&mut board, Color::Blue));
    }

    #[test]
    fn test_checkmate_has_no_escape() {
        let mut board = mated();
        let before = board.clone();

        assert!(is_attacked(&board, Color::Blue));
        assert!(!would_escape_check(&mut board, c(4, 9), c(4, 8)));
        assert!(!would_escape_check(&mut board, c(4, 9), c(3, 9)));
        assert!(!would_escape_check(&mut board, c(4, 9), c(5, 9)));
        assert!(!has_escape(&mut board, Color::Blue));
        assert_eq!(board, before);
    }

    #[test]
    fn test_capturing_the_checker_escapes() {
        let mut board = mated();
        // A Blue chariot on I8 can take the E8 chariot, but the row-10
        // chariot still bites.
        board.place(c(8, 7), Piece::new(Color::Blue, Kind::Chariot));
        assert!(!would_escape_check(&mut board, c(8, 7), c(4, 7)));
        // Blocking row 10 with it instead leaves the E-file check.
        assert!(!has_escape(&mut board, Color::Blue));

        // Remove the row attacker: capturing on E8 now works.
        board.remove(c(0, 9));
        assert!(would_escape_check(&mut board, c(8, 7), c(4, 7)));
    }

    #[test]
    fn test_empty_source_never_escapes() {
        let mut board = Board::standard();
        assert!(!would_escape_check(&mut board, c(4, 4), c(4, 5)));
    }
}
