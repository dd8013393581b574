use crate::Position;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("Position {0:?} is out of bounds")]
    OutOfBounds(Position),
    #[error("Board dimensions {width}x{height} must both be non-zero")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Too many mines ({mines}) for board size {width}x{height}")]
    TooManyMines { width: u32, height: u32, mines: u32 },
    #[error("Game is already over, no further moves are accepted")]
    GameOver,
    #[error("No hidden cells remain to hint at")]
    NoHiddenCells,
}
