use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    game::GameState,
    models::{Board, Position},
};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Click { row: usize, col: usize },
    Reset,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    GameState {
        session_id: String,
        board: Board,
        score: u32,
        successful_matches: u32,
        matches_needed: u32,
        won: bool,
        selection: Option<Position>,
        resolving: bool,
        message: String,
    },
    TilesCleared {
        positions: Vec<Position>,
        points: u32,
    },
    Error {
        message: String,
    },
}

impl ServerMessage {
    /// Full snapshot of a session for renderers
    pub fn game_state(session_id: Uuid, game: &GameState) -> Self {
        ServerMessage::GameState {
            session_id: session_id.to_string(),
            board: game.board().clone(),
            score: game.score(),
            successful_matches: game.successful_matches(),
            matches_needed: game.rules().matches_needed,
            won: game.is_won(),
            selection: game.selection(),
            resolving: game.is_resolving(),
            message: game.notice().to_string(),
        }
    }
}
