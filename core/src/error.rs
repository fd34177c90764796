use thiserror::Error;

use crate::Coord;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be a non-empty square grid")]
    InvalidBoardShape,
    #[error("Unsupported player count {0}, expected {min}..={max}", min = crate::MIN_PLAYERS, max = crate::MAX_PLAYERS)]
    InvalidPlayerCount(usize),
    #[error("Unsupported grid size {0}, expected 10, 16 or 20")]
    InvalidGridSize(Coord),
}

pub type Result<T> = core::result::Result<T, GameError>;
