use thiserror::Error;

/// Errors raised by the framed transport and the play session.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed frame header {0:?}")]
    Header(String),
    #[error("frame of {0} bytes exceeds the limit")]
    TooLarge(usize),
    #[error("protocol violation: {0}")]
    Protocol(String),
}

/// A line typed at the prompt that is not a command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("expected a source and a destination, got {0:?}")]
    Arity(String),
    #[error(transparent)]
    Coordinate(#[from] janggi_core::CoordError),
}
