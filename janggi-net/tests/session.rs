//! Full sessions between a host and a guest over an in-memory pipe.

use tokio::io::{duplex, sink, BufReader};

use janggi_core::{Board, Color, Coord, Game, GameState, Kind, Piece};
use janggi_net::{Session, SessionEnd};

const PIPE: usize = 1 << 16;

fn script(lines: &'static str) -> BufReader<&'static [u8]> {
    BufReader::new(lines.as_bytes())
}

#[tokio::test]
async fn test_moves_cross_the_wire() {
    let (near, far) = duplex(PIPE);
    let (host, guest) = tokio::join!(Session::host(near, Game::new()), Session::join(far));
    let (mut host, mut guest) = (host.unwrap(), guest.unwrap());

    let mut host_output = Vec::new();
    let (host_end, guest_end) = tokio::join!(
        host.run(script("A4 A5\n"), &mut host_output),
        guest.run(script("E7 E6\n/q\n"), sink()),
    );

    assert_eq!(guest_end.unwrap(), SessionEnd::LocalQuit);
    assert_eq!(host_end.unwrap(), SessionEnd::RemoteQuit);
    assert_eq!(host.game(), guest.game());
    assert_eq!(host.game().turn(), Color::Blue);
    assert_eq!(
        host.game().piece_at("E6"),
        Ok(Some(Piece::new(Color::Blue, Kind::Soldier)))
    );

    let text = String::from_utf8(host_output).unwrap();
    assert!(text.contains("opponent: E7 E6"));
}

#[tokio::test]
async fn test_rejected_local_input_is_not_sent() {
    let (near, far) = duplex(PIPE);
    let (host, guest) = tokio::join!(Session::host(near, Game::new()), Session::join(far));
    let (mut host, mut guest) = (host.unwrap(), guest.unwrap());

    let mut guest_output = Vec::new();
    // E6 is empty and A4 is Red's; only the pass goes through.
    let (host_end, guest_end) = tokio::join!(
        host.run(script("/q\n"), sink()),
        guest.run(script("E6 E5\nA4,A5\nE5 E5\n"), &mut guest_output),
    );

    assert_eq!(host_end.unwrap(), SessionEnd::LocalQuit);
    assert_eq!(guest_end.unwrap(), SessionEnd::RemoteQuit);
    assert_eq!(guest.game().board(), &Board::standard());
    assert_eq!(host.game(), guest.game());

    let text = String::from_utf8(guest_output).unwrap();
    assert!(text.contains("no piece on the source square"));
    assert!(text.contains("belongs to the side not on move"));
}

#[tokio::test]
async fn test_checkmate_finishes_both_sides() {
    let mut board = Board::new();
    let mut put = |column, row, color, kind| {
        board.place(Coord::new(column, row).unwrap(), Piece::new(color, kind));
    };
    put(4, 9, Color::Blue, Kind::General);
    put(4, 1, Color::Red, Kind::General);
    put(0, 8, Color::Red, Kind::Chariot);
    put(8, 5, Color::Red, Kind::Chariot);
    let game = Game::from_position(board, Color::Red);

    let (near, far) = duplex(PIPE);
    let (host, guest) = tokio::join!(Session::host(near, game), Session::join(far));
    let (mut host, mut guest) = (host.unwrap(), guest.unwrap());

    let (host_end, guest_end) = tokio::join!(
        host.run(script("I6 I10\n"), sink()),
        guest.run(script(""), sink()),
    );

    assert_eq!(host_end.unwrap(), SessionEnd::Finished(GameState::RedWon));
    assert_eq!(guest_end.unwrap(), SessionEnd::Finished(GameState::RedWon));
}

#[tokio::test]
async fn test_peer_disconnect() {
    let (near, far) = duplex(PIPE);
    let (host, guest) = tokio::join!(Session::host(near, Game::new()), Session::join(far));
    let mut host = host.unwrap();
    drop(guest);

    // Blue moves first, so the host is waiting on the wire.
    let end = host.run(script(""), sink()).await.unwrap();
    assert_eq!(end, SessionEnd::Disconnected);
}
