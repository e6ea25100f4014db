//! One game between two connected processes.
//!
//! ```text
//!   host (Red)                         guest (Blue)
//!   ----------                         ------------
//!   accept  ---- Sync { game } ---->   join
//!           <--- Move { .. } -------   Blue to move: read prompt
//!   Red to move: read prompt
//!           ---- Move { .. } ------>
//!           ...
//!   /q      ---- Quit ------------->   RemoteQuit
//! ```
//!
//! Both sides keep their own [`Game`] and apply every move to it. A move is
//! only sent after the local game accepted it, so a move the peer's game
//! rejects means the two have diverged and the session ends with an error.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt};

use janggi_core::{Color, Game, GameState, MoveOutcome};

use crate::command::Command;
use crate::error::NetError;
use crate::frame::FrameStream;
use crate::message::Message;

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// Checkmate.
    Finished(GameState),
    /// The local player typed `/q` or closed their input.
    LocalQuit,
    RemoteQuit,
    /// The peer closed the connection without saying goodbye.
    Disconnected,
}

impl std::fmt::Display for SessionEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEnd::Finished(state) => write!(f, "game over: {state}"),
            SessionEnd::LocalQuit => write!(f, "you left the game"),
            SessionEnd::RemoteQuit => write!(f, "opponent left the game"),
            SessionEnd::Disconnected => write!(f, "connection closed by opponent"),
        }
    }
}

pub struct Session<S> {
    stream: FrameStream<S>,
    game: Game,
    color: Color,
}

impl<S: AsyncRead + AsyncWrite + Unpin> Session<S> {
    /// Open a session as the accepting side. The host plays Red and sends
    /// its game to the guest.
    pub async fn host(stream: S, game: Game) -> Result<Self, NetError> {
        let mut stream = FrameStream::new(stream);
        stream.send(&Message::Sync { game: game.clone() }).await?;
        log::info!("sent game snapshot, {} to move", game.turn());

        Ok(Session {
            stream,
            game,
            color: Color::Red,
        })
    }

    /// Open a session as the connecting side. The guest plays Blue and
    /// adopts the host's game.
    pub async fn join(stream: S) -> Result<Self, NetError> {
        let mut stream = FrameStream::new(stream);
        let game = match stream.recv().await? {
            Some(Message::Sync { game }) => game,
            Some(other) => {
                return Err(NetError::Protocol(format!(
                    "expected a game snapshot, got {other:?}"
                )))
            }
            None => {
                return Err(NetError::Protocol(
                    "connection closed before the game snapshot".to_string(),
                ))
            }
        };
        log::info!("received game snapshot, {} to move", game.turn());

        Ok(Session {
            stream,
            game,
            color: Color::Blue,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The color this side plays.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Play until the game ends or either side leaves.
    ///
    /// Local moves are read line by line from `input`; the board and prompts
    /// are written to `output`.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> Result<SessionEnd, NetError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        loop {
            if self.game.state().is_over() {
                output.write_all(self.game.render().as_bytes()).await?;
                output.flush().await?;
                return Ok(SessionEnd::Finished(self.game.state()));
            }

            if self.game.turn() != self.color {
                match self.stream.recv().await? {
                    Some(Message::Move {
                        source,
                        destination,
                    }) => {
                        let outcome = self.game.try_move(&source, &destination).map_err(|err| {
                            NetError::Protocol(format!(
                                "opponent played {source} -> {destination}: {err}"
                            ))
                        })?;
                        log::debug!("opponent played {source} -> {destination}");
                        output
                            .write_all(format!("opponent: {source} {destination}\n").as_bytes())
                            .await?;
                        announce_check(&mut output, outcome).await?;
                    }
                    Some(Message::Quit) => return Ok(SessionEnd::RemoteQuit),
                    Some(Message::Sync { .. }) => {
                        return Err(NetError::Protocol(
                            "unexpected game snapshot mid-game".to_string(),
                        ))
                    }
                    None => return Ok(SessionEnd::Disconnected),
                }
                continue;
            }

            output.write_all(self.game.render().as_bytes()).await?;
            output.write_all(b"> ").await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                self.stream.send(&Message::Quit).await?;
                return Ok(SessionEnd::LocalQuit);
            };

            let (from, to) = match line.parse::<Command>() {
                Ok(Command::Quit) => {
                    self.stream.send(&Message::Quit).await?;
                    return Ok(SessionEnd::LocalQuit);
                }
                Ok(Command::Move { from, to }) => (from, to),
                Err(err) => {
                    output.write_all(format!("{err}\n").as_bytes()).await?;
                    continue;
                }
            };

            match self.game.play(from, to) {
                Ok(outcome) => {
                    announce_check(&mut output, outcome).await?;
                    self.stream
                        .send(&Message::Move {
                            source: from.to_string(),
                            destination: to.to_string(),
                        })
                        .await?;
                }
                Err(err) => {
                    log::debug!("rejected local move {from} -> {to}: {err}");
                    output.write_all(format!("{err}\n").as_bytes()).await?;
                }
            }
        }
    }
}

async fn announce_check<W: AsyncWrite + Unpin>(
    output: &mut W,
    outcome: MoveOutcome,
) -> Result<(), NetError> {
    if let MoveOutcome::Moved { check: true, .. } = outcome {
        output.write_all(b"check!\n").await?;
    }
    Ok(())
}
