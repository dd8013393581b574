pub mod board;
pub mod error;
pub mod grid;
pub mod position;

pub use board::{Board, Change, Cover, GameState};
pub use error::GameError;
pub use grid::Grid;
pub use position::Position;
