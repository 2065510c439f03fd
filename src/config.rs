use anyhow::{Context, Result};
use serde::Deserialize;
use std::{env, time::Duration};

use crate::game::{
    rules::{DEFAULT_BOARD_SIZE, DEFAULT_MATCHES_NEEDED, DEFAULT_POINTS_PER_TILE},
    Rules,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub board_size: usize,
    pub matches_needed: u32,
    pub points_per_tile: u32,
    /// Pause between a swap and its match check
    pub swap_delay_ms: u64,
    /// Pause before a swap with no match is undone
    pub revert_delay_ms: u64,
    /// Pause while matched tiles disappear before gravity and refill
    pub clear_delay_ms: u64,
    /// Pause after a match before prompting for the next one
    pub prompt_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            matches_needed: DEFAULT_MATCHES_NEEDED,
            points_per_tile: DEFAULT_POINTS_PER_TILE,
            swap_delay_ms: 300,
            revert_delay_ms: 500,
            clear_delay_ms: 400,
            prompt_delay_ms: 500,
        }
    }
}

impl GameConfig {
    pub fn rules(&self) -> Rules {
        Rules {
            board_size: self.board_size,
            matches_needed: self.matches_needed,
            points_per_tile: self.points_per_tile,
        }
    }

    pub fn timings(&self) -> Timings {
        Timings {
            swap: Duration::from_millis(self.swap_delay_ms),
            revert: Duration::from_millis(self.revert_delay_ms),
            clear: Duration::from_millis(self.clear_delay_ms),
            prompt: Duration::from_millis(self.prompt_delay_ms),
        }
    }
}

/// How long a session holds each resolution step before moving on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub swap: Duration,
    pub revert: Duration,
    pub clear: Duration,
    pub prompt: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        GameConfig::default().timings()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup, falling back to defaults for missing keys
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = GameConfig::default();

        let server = ServerConfig {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
        };

        let game = GameConfig {
            board_size: parse_or(&lookup, "BOARD_SIZE", defaults.board_size)?,
            matches_needed: parse_or(&lookup, "MATCHES_NEEDED", defaults.matches_needed)?,
            points_per_tile: parse_or(&lookup, "POINTS_PER_TILE", defaults.points_per_tile)?,
            swap_delay_ms: parse_or(&lookup, "SWAP_DELAY_MS", defaults.swap_delay_ms)?,
            revert_delay_ms: parse_or(&lookup, "REVERT_DELAY_MS", defaults.revert_delay_ms)?,
            clear_delay_ms: parse_or(&lookup, "CLEAR_DELAY_MS", defaults.clear_delay_ms)?,
            prompt_delay_ms: parse_or(&lookup, "PROMPT_DELAY_MS", defaults.prompt_delay_ms)?,
        };

        game.rules()
            .validate()
            .context("Game settings are out of range")?;

        Ok(Config { server, game })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number", key)),
        None => Ok(default),
    }
}
