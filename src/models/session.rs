use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::GameState;

/// Snapshot of a live session kept in the shared registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub score: u32,
    pub successful_matches: u32,
    pub won: bool,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn new(session_id: Uuid, game: &GameState) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            score: game.score(),
            successful_matches: game.successful_matches(),
            won: game.is_won(),
            started_at: now,
            updated_at: now,
        }
    }

    /// Refresh the counters from the latest state, keeping the start time
    pub fn update(&mut self, game: &GameState) {
        self.score = game.score();
        self.successful_matches = game.successful_matches();
        self.won = game.is_won();
        self.updated_at = Utc::now();
    }
}
