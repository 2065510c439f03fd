use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use uuid::Uuid;

use crate::{
    config::Timings,
    error::GameResult,
    game::{Action, GameState, Pending, Phase, Rules, Scorer},
    models::Position,
    websocket::messages::{ClientMessage, ServerMessage},
};

/// Result of handling one client message or timer tick
#[derive(Debug, Default)]
pub struct Step {
    pub messages: Vec<ServerMessage>,
    /// Set when the session has timed work to do; the caller ticks after this long
    pub follow_up: Option<Duration>,
}

/// One player's game, owned by their connection task
pub struct GameSession {
    id: Uuid,
    game: GameState,
    rng: StdRng,
    timings: Timings,
}

impl GameSession {
    pub fn new(rules: Rules, timings: Timings) -> GameResult<Self> {
        let mut rng = StdRng::from_os_rng();
        let game = GameState::new(rules, &mut rng)?;
        Ok(Self::with_game(game, rng, timings))
    }

    pub fn with_game(game: GameState, rng: StdRng, timings: Timings) -> Self {
        Self {
            id: Uuid::new_v4(),
            game,
            rng,
            timings,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn snapshot(&self) -> ServerMessage {
        ServerMessage::game_state(self.id, &self.game)
    }

    /// Whether a pending tick would still change anything
    pub fn wants_tick(&self) -> bool {
        self.game.is_resolving() || self.game.wants_nudge()
    }

    /// Apply a client message. On error the game is left as it was.
    pub fn handle(&mut self, msg: ClientMessage) -> GameResult<Step> {
        let action = match msg {
            ClientMessage::Click { row, col } => Action::Click(Position::new(row, col)),
            ClientMessage::Reset => Action::Reset,
        };

        let was_resolving = self.game.is_resolving();
        self.game = self.game.clone().apply(action, &mut self.rng)?;

        let mut step = Step {
            messages: vec![self.snapshot()],
            follow_up: None,
        };

        if !was_resolving {
            match self.game.phase() {
                Phase::Resolving(Pending::Clear { matched }) => {
                    step.messages.push(ServerMessage::TilesCleared {
                        positions: matched.iter().copied().collect(),
                        points: Scorer::points(self.game.rules(), matched),
                    });
                    step.follow_up = Some(self.timings.swap + self.timings.clear);
                }
                Phase::Resolving(Pending::Revert { .. }) => {
                    step.follow_up = Some(self.timings.swap + self.timings.revert);
                }
                _ => {}
            }
        }

        Ok(step)
    }

    /// Run the timed follow-up: settle the in-flight swap, or prompt for the
    /// next match once a match result has been on show.
    pub fn tick(&mut self) -> Step {
        let action = if self.game.is_resolving() {
            Action::Settle
        } else if self.game.wants_nudge() {
            Action::Nudge
        } else {
            return Step::default();
        };

        match self.game.clone().apply(action, &mut self.rng) {
            Ok(next) => self.game = next,
            Err(e) => {
                tracing::error!("Failed to advance session {}: {}", self.id, e);
                return Step::default();
            }
        }

        Step {
            messages: vec![self.snapshot()],
            follow_up: self.game.wants_nudge().then_some(self.timings.prompt),
        }
    }
}
