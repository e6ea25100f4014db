use thiserror::Error;

/// Malformed algebraic coordinate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoordError {
    #[error("expected a column letter A-I followed by a row number 1-10, got {0:?}")]
    Malformed(String),
    #[error("column {0:?} is outside A-I")]
    Column(char),
    #[error("row {0:?} is outside 1-10")]
    Row(String),
}

/// Why a well-formed move was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("no piece on the source square")]
    EmptySource,
    #[error("the piece belongs to the side not on move")]
    WrongTurn,
    #[error("the piece cannot reach that square")]
    Unreachable,
    #[error("the move leaves the mover's general in check")]
    SelfCheck,
    #[error("cannot pass while in check")]
    PassInCheck,
}

/// Errors that can occur when making a move.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] CoordError),
    #[error("the game is over")]
    GameOver,
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),
}
