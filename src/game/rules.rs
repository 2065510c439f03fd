use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

pub const DEFAULT_BOARD_SIZE: usize = 6;
pub const DEFAULT_MATCHES_NEEDED: u32 = 3;
pub const DEFAULT_POINTS_PER_TILE: u32 = 10;

/// Smallest board on which a three-tile run fits
pub const MIN_BOARD_SIZE: usize = 3;
/// Largest board on which rejection sampling still finds a quiet board quickly
pub const MAX_BOARD_SIZE: usize = 8;

/// Tunable rules for a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub board_size: usize,
    /// Successful swaps needed to win
    pub matches_needed: u32,
    pub points_per_tile: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            matches_needed: DEFAULT_MATCHES_NEEDED,
            points_per_tile: DEFAULT_POINTS_PER_TILE,
        }
    }
}

impl Rules {
    pub fn validate(&self) -> GameResult<()> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(GameError::InvalidRules(format!(
                "board_size must be between {} and {}, got {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE, self.board_size
            )));
        }
        if self.matches_needed == 0 {
            return Err(GameError::InvalidRules(
                "matches_needed must be at least 1".to_string(),
            ));
        }
        if self.points_per_tile == 0 {
            return Err(GameError::InvalidRules(
                "points_per_tile must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
