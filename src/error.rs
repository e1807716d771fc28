use crate::Coordinate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("Coordinate {0} is out of bounds")]
    OutOfBounds(Coordinate),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Cannot undo, no earlier moves")]
    NothingToUndo,
    #[error("Game is over, undo or restart to continue")]
    GameOver,
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Peer sent nothing for {0:?}")]
    Timeout(std::time::Duration),
    #[error("Line longer than {0} bytes")]
    LineTooLong(usize),
}
