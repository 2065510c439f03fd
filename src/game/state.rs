use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    error::{GameError, GameResult},
    game::{
        grid::BoardGenerator,
        matcher::{MatchDetector, MatchSet},
        resolver::MatchResolver,
        rules::Rules,
        scorer::Scorer,
        validator::SwapValidator,
    },
    models::{Board, Position},
};

/// Work left over from a swap, finished by [`Action::Settle`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    /// The swap made no run; `original` is the board from before it
    Revert { original: Board },
    /// The swap made runs covering `matched`
    Clear { matched: MatchSet },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// One tile is waiting for a swap partner
    Selecting(Position),
    /// A swap is in flight; clicks are dropped until it settles
    Resolving(Pending),
    /// Terminal until reset
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Click(Position),
    Settle,
    /// Swap a post-match notice for the prompt to make the next move
    Nudge,
    Reset,
}

/// Player-facing status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Welcome,
    PickPartner,
    Checking,
    NoMatch,
    Matched { points: u32, remaining: u32 },
    MakeAnother,
    Won { score: u32 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Welcome => write!(f, "Swap adjacent chocolates to match 3 or more!"),
            Notice::PickPartner => write!(f, "Now tap an adjacent chocolate to swap!"),
            Notice::Checking => write!(f, "Checking for matches..."),
            Notice::NoMatch => write!(f, "No match! Try again."),
            Notice::Matched { points, remaining } => {
                write!(f, "Great! +{} points! {} more to go!", points, remaining)
            }
            Notice::MakeAnother => write!(f, "Make another match!"),
            Notice::Won { score } => write!(f, "You won with {} points!", score),
        }
    }
}

/// One game session. Every transition consumes the old state and returns the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    rules: Rules,
    board: Board,
    phase: Phase,
    successful_matches: u32,
    score: u32,
    notice: Notice,
}

impl GameState {
    /// Start a game on a freshly generated board
    pub fn new(rules: Rules, rng: &mut impl Rng) -> GameResult<Self> {
        rules.validate()?;
        let board = BoardGenerator::generate(rules.board_size, rng);
        Ok(Self::start(rules, board))
    }

    /// Start a game on a given board. The board must match the rules' size.
    pub fn with_board(rules: Rules, board: Board) -> GameResult<Self> {
        rules.validate()?;
        if board.size() != rules.board_size {
            return Err(GameError::InvalidRules(format!(
                "board is {}x{} but rules ask for {}x{}",
                board.size(),
                board.size(),
                rules.board_size,
                rules.board_size
            )));
        }
        Ok(Self::start(rules, board))
    }

    fn start(rules: Rules, board: Board) -> Self {
        Self {
            rules,
            board,
            phase: Phase::Idle,
            successful_matches: 0,
            score: 0,
            notice: Notice::Welcome,
        }
    }

    pub fn apply(self, action: Action, rng: &mut impl Rng) -> GameResult<Self> {
        match action {
            Action::Click(pos) => {
                self.board.check(pos)?;
                Ok(self.click(pos))
            }
            Action::Settle => Ok(self.settle(rng)),
            Action::Nudge => Ok(self.nudge()),
            Action::Reset => {
                tracing::info!(
                    "Resetting game (score {}, {} match(es))",
                    self.score,
                    self.successful_matches
                );
                Self::new(self.rules, rng)
            }
        }
    }

    /// Click, and if that started a swap, resolve it straight away
    pub fn play(self, pos: Position, rng: &mut impl Rng) -> GameResult<Self> {
        let next = self.apply(Action::Click(pos), rng)?;
        if next.is_resolving() {
            next.apply(Action::Settle, rng)
        } else {
            Ok(next)
        }
    }

    fn click(mut self, pos: Position) -> Self {
        let selected = match self.phase {
            Phase::Resolving(_) | Phase::Won => {
                tracing::trace!("Dropping click at {:?} while {:?}", pos, self.phase);
                return self;
            }
            Phase::Idle => None,
            Phase::Selecting(selected) => Some(selected),
        };

        match selected {
            Some(selected) if SwapValidator::are_adjacent(selected, pos) => {
                let original = self.board.clone();
                self.board.swap(selected, pos);

                let matched = MatchDetector::find_matches(&self.board);
                tracing::debug!(
                    "Swapped {:?} with {:?}: {} tile(s) matched",
                    selected,
                    pos,
                    matched.len()
                );

                let pending = if matched.is_empty() {
                    Pending::Revert { original }
                } else {
                    Pending::Clear { matched }
                };
                self.phase = Phase::Resolving(pending);
                self.notice = Notice::Checking;
            }
            _ => {
                self.phase = Phase::Selecting(pos);
                self.notice = Notice::PickPartner;
            }
        }

        self
    }

    fn settle(mut self, rng: &mut impl Rng) -> Self {
        let pending = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Resolving(pending) => pending,
            other => {
                self.phase = other;
                return self;
            }
        };

        match pending {
            Pending::Revert { original } => {
                self.board = original;
                self.notice = Notice::NoMatch;
            }
            Pending::Clear { matched } => {
                let result = Scorer::score_swap(&self.rules, &matched, self.successful_matches);
                self.board = MatchResolver::resolve(self.board, &matched, rng).board;
                self.score = self.score.saturating_add(result.points);
                self.successful_matches = self.successful_matches.saturating_add(1);

                if result.won {
                    tracing::info!(
                        "Game won after {} match(es) with {} points",
                        self.successful_matches,
                        self.score
                    );
                    self.phase = Phase::Won;
                    self.notice = Notice::Won { score: self.score };
                } else {
                    self.notice = Notice::Matched {
                        points: result.points,
                        remaining: result.remaining,
                    };
                }
            }
        }

        self
    }

    fn nudge(mut self) -> Self {
        if self.wants_nudge() {
            self.notice = Notice::MakeAnother;
        }
        self
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn successful_matches(&self) -> u32 {
        self.successful_matches
    }

    pub fn notice(&self) -> Notice {
        self.notice
    }

    pub fn selection(&self) -> Option<Position> {
        match self.phase {
            Phase::Selecting(pos) => Some(pos),
            _ => None,
        }
    }

    pub fn is_resolving(&self) -> bool {
        matches!(self.phase, Phase::Resolving(_))
    }

    pub fn is_won(&self) -> bool {
        matches!(self.phase, Phase::Won)
    }

    /// True while a fresh match result is on show and nothing else has happened
    pub fn wants_nudge(&self) -> bool {
        self.phase == Phase::Idle && matches!(self.notice, Notice::Matched { .. })
    }

    /// Cells about to be cleared, if the in-flight swap made a match
    pub fn pending_clear(&self) -> Option<&MatchSet> {
        match &self.phase {
            Phase::Resolving(Pending::Clear { matched }) => Some(matched),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::fixtures::quiet_board;
    use crate::models::Kind::{Cookies as C, Dark as B, Milk as A};
    use rand::{rngs::StdRng, SeedableRng};

    fn state(rng: &mut StdRng) -> GameState {
        GameState::with_board(Rules::default(), quiet_board(rng)).unwrap()
    }

    fn click(state: GameState, row: usize, col: usize, rng: &mut StdRng) -> GameState {
        state.apply(Action::Click(Position::new(row, col)), rng).unwrap()
    }

    #[test]
    fn test_setup_board_is_quiet() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(!MatchDetector::has_matches(state(&mut rng).board()));
    }

    #[test]
    fn test_first_click_selects_without_touching_board() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = state(&mut rng);
        let board = start.board().clone();

        let next = click(start, 2, 3, &mut rng);
        assert_eq!(next.selection(), Some(Position::new(2, 3)));
        assert_eq!(next.board(), &board);
        assert_eq!(next.notice(), Notice::PickPartner);
    }

    #[test]
    fn test_non_adjacent_click_moves_selection() {
        let mut rng = StdRng::seed_from_u64(1);
        let next = click(state(&mut rng), 0, 0, &mut rng);
        let next = click(next, 2, 2, &mut rng);
        assert_eq!(next.selection(), Some(Position::new(2, 2)));

        // Diagonal neighbours are not adjacent either
        let next = click(next, 3, 3, &mut rng);
        assert_eq!(next.selection(), Some(Position::new(3, 3)));
        assert!(!next.is_resolving());
    }

    #[test]
    fn test_swap_without_match_reverts_exactly() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = state(&mut rng);
        let original = start.board().clone();

        let next = click(start, 4, 4, &mut rng);
        let next = click(next, 4, 5, &mut rng);
        assert!(next.is_resolving());
        assert_ne!(next.board(), &original);
        assert_eq!(next.notice(), Notice::Checking);
        assert_eq!(next.selection(), None);
        assert!(next.pending_clear().is_none());

        let settled = next.apply(Action::Settle, &mut rng).unwrap();
        assert_eq!(settled.board(), &original);
        assert_eq!(settled.phase(), &Phase::Idle);
        assert_eq!(settled.score(), 0);
        assert_eq!(settled.successful_matches(), 0);
        assert_eq!(settled.notice(), Notice::NoMatch);
    }

    #[test]
    fn test_matching_swap_scores_thirty() {
        let mut rng = StdRng::seed_from_u64(1);
        let next = click(state(&mut rng), 0, 2, &mut rng);
        let next = click(next, 1, 2, &mut rng);

        let expected: MatchSet = [(0, 0), (0, 1), (0, 2)]
            .iter()
            .map(|&(row, col)| Position::new(row, col))
            .collect();
        assert_eq!(next.pending_clear(), Some(&expected));

        let settled = next.apply(Action::Settle, &mut rng).unwrap();
        assert_eq!(settled.score(), 30);
        assert_eq!(settled.successful_matches(), 1);
        assert_eq!(settled.phase(), &Phase::Idle);
        assert_eq!(settled.notice(), Notice::Matched { points: 30, remaining: 2 });
        assert_eq!(settled.notice().to_string(), "Great! +30 points! 2 more to go!");
    }

    #[test]
    fn test_nudge_prompts_for_next_match() {
        let mut rng = StdRng::seed_from_u64(1);
        let matched = state(&mut rng)
            .play(Position::new(0, 2), &mut rng)
            .and_then(|g| g.play(Position::new(1, 2), &mut rng))
            .unwrap();
        assert!(matched.wants_nudge());

        let nudged = matched.clone().apply(Action::Nudge, &mut rng).unwrap();
        assert_eq!(nudged.notice(), Notice::MakeAnother);
        assert_eq!(nudged.notice().to_string(), "Make another match!");
        assert_eq!(nudged.board(), matched.board());
        assert_eq!(nudged.score(), 30);
        assert!(!nudged.wants_nudge());
    }

    #[test]
    fn test_nudge_leaves_other_notices_alone() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = state(&mut rng);
        let after = start.clone().apply(Action::Nudge, &mut rng).unwrap();
        assert_eq!(after, start);

        // A click after the match wins over the pending prompt
        let selecting = start
            .play(Position::new(0, 2), &mut rng)
            .and_then(|g| g.play(Position::new(1, 2), &mut rng))
            .and_then(|g| g.play(Position::new(3, 3), &mut rng))
            .unwrap();
        let after = selecting.clone().apply(Action::Nudge, &mut rng).unwrap();
        assert_eq!(after, selecting);
        assert_eq!(after.notice(), Notice::PickPartner);
    }

    #[test]
    fn test_huge_tile_value_saturates_score() {
        let mut rng = StdRng::seed_from_u64(1);
        let rules = Rules { points_per_tile: 2_000_000_000, ..Rules::default() };
        let game = GameState::with_board(rules, quiet_board(&mut rng)).unwrap();

        let game = game
            .play(Position::new(0, 2), &mut rng)
            .and_then(|g| g.play(Position::new(1, 2), &mut rng))
            .unwrap();
        assert_eq!(game.score(), u32::MAX);
        assert_eq!(game.notice(), Notice::Matched { points: u32::MAX, remaining: 2 });

        let mut game = game;
        game.board = quiet_board(&mut rng);
        let game = game
            .play(Position::new(0, 2), &mut rng)
            .and_then(|g| g.play(Position::new(1, 2), &mut rng))
            .unwrap();
        assert_eq!(game.score(), u32::MAX);
        assert_eq!(game.successful_matches(), 2);
    }

    #[test]
    fn test_resolution_drops_column_contents() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = state(&mut rng);
        let below: Vec<_> = (1..6).map(|row| start.board().rows()[row][0].id).collect();

        let settled = start.play(Position::new(0, 2), &mut rng).unwrap();
        let settled = settled.play(Position::new(1, 2), &mut rng).unwrap();

        // Row 0 was cleared, so everything below it stays where it was
        let after: Vec<_> = (1..6).map(|row| settled.board().rows()[row][0].id).collect();
        assert_eq!(after, below);
        assert_eq!(settled.board().kind_at(0, 3), C);
    }

    #[test]
    fn test_clicks_dropped_while_resolving() {
        let mut rng = StdRng::seed_from_u64(1);
        let next = click(state(&mut rng), 0, 2, &mut rng);
        let resolving = click(next, 1, 2, &mut rng);

        let after = click(resolving.clone(), 4, 4, &mut rng);
        assert_eq!(after, resolving);
    }

    #[test]
    fn test_settle_outside_resolving_is_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = state(&mut rng);
        let after = start.clone().apply(Action::Settle, &mut rng).unwrap();
        assert_eq!(after, start);
    }

    #[test]
    fn test_out_of_bounds_click_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = state(&mut rng).apply(Action::Click(Position::new(6, 0)), &mut rng);
        assert_eq!(
            result,
            Err(GameError::OutOfBounds { row: 6, col: 0, size: 6 })
        );
    }

    #[test]
    fn test_win_blocks_moves_until_reset() {
        let mut rng = StdRng::seed_from_u64(1);
        let rules = Rules { matches_needed: 1, ..Rules::default() };
        let board = quiet_board(&mut rng);
        let game = GameState::with_board(rules, board).unwrap();

        let won = game
            .play(Position::new(0, 2), &mut rng)
            .and_then(|g| g.play(Position::new(1, 2), &mut rng))
            .unwrap();
        assert!(won.is_won());
        assert_eq!(won.notice(), Notice::Won { score: 30 });

        let frozen = won.board().clone();
        let after = click(won.clone(), 0, 0, &mut rng);
        let after = click(after, 0, 1, &mut rng);
        assert_eq!(after, won);
        assert_eq!(after.board(), &frozen);

        let reset = after.apply(Action::Reset, &mut rng).unwrap();
        assert!(!reset.is_won());
        assert_eq!(reset.score(), 0);
        assert_eq!(reset.successful_matches(), 0);
        assert_eq!(reset.phase(), &Phase::Idle);
        assert_eq!(reset.notice(), Notice::Welcome);
        assert!(!MatchDetector::has_matches(reset.board()));
    }

    #[test]
    fn test_three_matches_win_with_default_rules() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = state(&mut rng);

        for _ in 0..3 {
            assert!(!game.is_won());
            let board = quiet_board(&mut rng);
            // Keep counters, swap in the known board for the next move
            game.board = board;
            game = game
                .play(Position::new(0, 2), &mut rng)
                .and_then(|g| g.play(Position::new(1, 2), &mut rng))
                .unwrap();
        }

        assert!(game.is_won());
        assert_eq!(game.successful_matches(), 3);
        assert_eq!(game.score(), 90);
    }

    #[test]
    fn test_reset_available_mid_selection() {
        let mut rng = StdRng::seed_from_u64(1);
        let selecting = click(state(&mut rng), 1, 1, &mut rng);
        let reset = selecting.apply(Action::Reset, &mut rng).unwrap();
        assert_eq!(reset.selection(), None);
        assert_eq!(reset.board().size(), 6);
    }

    #[test]
    fn test_with_board_rejects_size_mismatch() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = Board::from_kinds(&[vec![A, B, C], vec![B, C, A], vec![C, A, B]], &mut rng)
            .unwrap();
        assert!(matches!(
            GameState::with_board(Rules::default(), board),
            Err(GameError::InvalidRules(_))
        ));
    }

    #[test]
    fn test_action_wire_format() {
        let settle: Action = serde_json::from_str(r#"{"type":"settle"}"#).unwrap();
        assert_eq!(settle, Action::Settle);

        let nudge: Action = serde_json::from_str(r#"{"type":"nudge"}"#).unwrap();
        assert_eq!(nudge, Action::Nudge);

        let click: Action = serde_json::from_str(r#"{"type":"click","row":1,"col":4}"#).unwrap();
        assert_eq!(click, Action::Click(Position::new(1, 4)));
    }
}
