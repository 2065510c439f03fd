use crate::game::{matcher::MatchSet, rules::Rules};

/// Outcome of scoring one resolved swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    /// Points earned by the swap
    pub points: u32,
    /// Successful swaps still needed to win, after this one
    pub remaining: u32,
    pub won: bool,
}

pub struct Scorer;

impl Scorer {
    /// Points for a cleared set: every matched tile is worth the same flat value,
    /// no matter how many runs it belonged to.
    pub fn points(rules: &Rules, matched: &MatchSet) -> u32 {
        u32::try_from(matched.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(rules.points_per_tile)
    }

    /// Score a resolved swap given the successful swaps made before it
    pub fn score_swap(rules: &Rules, matched: &MatchSet, matches_before: u32) -> ScoreResult {
        let made = matches_before.saturating_add(1);
        ScoreResult {
            points: Self::points(rules, matched),
            remaining: rules.matches_needed.saturating_sub(made),
            won: made >= rules.matches_needed,
        }
    }
}
