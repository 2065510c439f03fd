use thiserror::Error;

/// Errors raised by the grid engine.
///
/// Gameplay rejections (clicking while a swap resolves, a non-adjacent click,
/// a swap that makes no match) are not errors; they are ordinary transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("position ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("invalid rules: {0}")]
    InvalidRules(String),
}

pub type GameResult<T> = Result<T, GameError>;
