//! Match-3 puzzle engine with Hershey's Kisses tiles, plus a small WebSocket
//! server that hosts one game per connection.

pub mod config;
pub mod error;
pub mod game;
pub mod models;
pub mod routes;
pub mod websocket;

use dashmap::DashMap;
use uuid::Uuid;

use config::Config;
use models::SessionSummary;

pub use error::{GameError, GameResult};
pub use game::{Action, GameState, Notice, Phase, Rules};
pub use models::{Board, Kind, Position, Tile};

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    /// Live sessions keyed by session id
    pub sessions: DashMap<Uuid, SessionSummary>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sessions: DashMap::new(),
        }
    }
}
