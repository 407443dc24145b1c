use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have at least one row and one column")]
    EmptyGrid,
    #[error("Board must hold an even number of cards")]
    OddCardCount,
    #[error("Deal must fill the board with exactly two cards per face")]
    InvalidDeal,
}

pub type Result<T> = std::result::Result<T, GameError>;
