//! Length-prefixed framing.
//!
//! ```text
//! +------------------+---------------------------+
//! | header: 10 bytes | payload: <length> bytes   |
//! | "42        "     | {"type":"move",...}       |
//! +------------------+---------------------------+
//! ```
//!
//! The header is the payload length in ASCII decimal, left-aligned and padded
//! with spaces.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::NetError;
use crate::message::Message;

pub const HEADER_LENGTH: usize = 10;
pub const MAX_FRAME_LENGTH: usize = 1 << 20;

/// Render a frame header.
pub fn encode_header(length: usize) -> String {
    format!("{length:<HEADER_LENGTH$}")
}

/// Parse a frame header into a payload length.
pub fn parse_header(header: &[u8]) -> Result<usize, NetError> {
    let malformed = || NetError::Header(String::from_utf8_lossy(header).into_owned());

    let text = std::str::from_utf8(header).map_err(|_| malformed())?;
    let length: usize = text.trim().parse().map_err(|_| malformed())?;
    if length > MAX_FRAME_LENGTH {
        return Err(NetError::TooLarge(length));
    }
    Ok(length)
}

/// A byte stream carrying framed JSON messages.
pub struct FrameStream<S> {
    inner: S,
}

impl<S: AsyncRead + AsyncWrite + Unpin> FrameStream<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Read one frame. Returns `None` if the peer closed the stream cleanly
    /// between frames.
    pub async fn read_frame(&mut self) -> Result<Option<Vec<u8>>, NetError> {
        let mut header = [0u8; HEADER_LENGTH];
        let mut filled = 0;
        while filled < HEADER_LENGTH {
            let n = self.inner.read(&mut header[filled..]).await?;
            if n == 0 {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
            }
            filled += n;
        }

        let length = parse_header(&header)?;
        let mut payload = vec![0u8; length];
        self.inner.read_exact(&mut payload).await?;
        Ok(Some(payload))
    }

    pub async fn write_frame(&mut self, payload: &[u8]) -> Result<(), NetError> {
        if payload.len() > MAX_FRAME_LENGTH {
            return Err(NetError::TooLarge(payload.len()));
        }

        self.inner
            .write_all(encode_header(payload.len()).as_bytes())
            .await?;
        self.inner.write_all(payload).await?;
        self.inner.flush().await?;
        Ok(())
    }

    pub async fn send(&mut self, message: &Message) -> Result<(), NetError> {
        let payload = serde_json::to_vec(message)?;
        log::trace!("sending {} byte frame", payload.len());
        self.write_frame(&payload).await
    }

    pub async fn recv(&mut self) -> Result<Option<Message>, NetError> {
        match self.read_frame().await? {
            Some(payload) => Ok(Some(serde_json::from_slice(&payload)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;

    #[test]
    fn test_header_layout() {
        assert_eq!(encode_header(5), "5         ");
        assert_eq!(encode_header(MAX_FRAME_LENGTH).len(), HEADER_LENGTH);
        assert_eq!(parse_header(b"42        ").unwrap(), 42);
        assert_eq!(parse_header(b"  7       ").unwrap(), 7);
    }

    #[test]
    fn test_header_rejects_garbage() {
        assert!(matches!(parse_header(b"abc       "), Err(NetError::Header(_))));
        assert!(matches!(parse_header(b"          "), Err(NetError::Header(_))));
        assert!(matches!(parse_header(b"-3        "), Err(NetError::Header(_))));
        assert!(matches!(
            parse_header(b"2000000   "),
            Err(NetError::TooLarge(2_000_000))
        ));
    }

    #[tokio::test]
    async fn test_frame_bytes_on_the_wire() {
        let (near, mut far) = duplex(256);
        let mut stream = FrameStream::new(near);
        stream.write_frame(b"hello").await.unwrap();

        let mut raw = [0u8; 15];
        far.read_exact(&mut raw).await.unwrap();
        assert_eq!(&raw, b"5         hello");
    }

    #[tokio::test]
    async fn test_message_roundtrip() {
        let (near, far) = duplex(4096);
        let mut sender = FrameStream::new(near);
        let mut receiver = FrameStream::new(far);

        let message = Message::Move {
            source: "C7".to_string(),
            destination: "C6".to_string(),
        };
        sender.send(&message).await.unwrap();
        sender.send(&Message::Quit).await.unwrap();

        assert_eq!(receiver.recv().await.unwrap(), Some(message));
        assert_eq!(receiver.recv().await.unwrap(), Some(Message::Quit));
    }

    #[tokio::test]
    async fn test_clean_close_between_frames() {
        let (near, far) = duplex(64);
        drop(near);
        let mut receiver = FrameStream::new(far);
        assert_eq!(receiver.recv().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_truncated_header_is_an_error() {
        let (mut near, far) = duplex(64);
        near.write_all(b"12").await.unwrap();
        drop(near);

        let mut receiver = FrameStream::new(far);
        assert!(matches!(receiver.read_frame().await, Err(NetError::Io(_))));
    }

    #[tokio::test]
    async fn test_truncated_payload_is_an_error() {
        let (mut near, far) = duplex(64);
        near.write_all(b"20        short").await.unwrap();
        drop(near);

        let mut receiver = FrameStream::new(far);
        assert!(matches!(receiver.read_frame().await, Err(NetError::Io(_))));
    }

    #[tokio::test]
    async fn test_oversized_frames_rejected() {
        let (near, far) = duplex(64);
        let mut sender = FrameStream::new(near);
        let payload = vec![b' '; MAX_FRAME_LENGTH + 1];
        assert!(matches!(
            sender.write_frame(&payload).await,
            Err(NetError::TooLarge(_))
        ));

        let (mut near, far2) = duplex(64);
        near.write_all(b"9999999   ").await.unwrap();
        let mut receiver = FrameStream::new(far2);
        assert!(matches!(
            receiver.read_frame().await,
            Err(NetError::TooLarge(9_999_999))
        ));
        drop(far);
    }

    #[tokio::test]
    async fn test_bad_json_payload() {
        let (mut near, far) = duplex(64);
        near.write_all(b"4         nope").await.unwrap();
        let mut receiver = FrameStream::new(far);
        assert!(matches!(receiver.recv().await, Err(NetError::Json(_))));
    }
}
