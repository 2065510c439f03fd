// Grid engine: generation, matching, swaps, resolution and scoring

#[cfg(test)]
pub(crate) mod fixtures;
pub mod grid;
pub mod matcher;
pub mod resolver;
pub mod rules;
pub mod scorer;
pub mod state;
pub mod validator;

pub use grid::BoardGenerator;
pub use matcher::{MatchDetector, MatchSet};
pub use resolver::{MatchResolver, Resolution};
pub use rules::Rules;
pub use scorer::{ScoreResult, Scorer};
pub use state::{Action, GameState, Notice, Pending, Phase};
pub use validator::SwapValidator;
