use std::collections::BTreeSet;

use crate::models::{Board, Position};

/// Coordinates taking part in at least one run, deduplicated by position
pub type MatchSet = BTreeSet<Position>;

/// Shortest line of equal kinds that counts as a match
pub const MIN_RUN: usize = 3;

pub struct MatchDetector;

impl MatchDetector {
    /// Find every cell in a horizontal or vertical run of three or more equal kinds.
    ///
    /// Rows are scanned left to right and columns top to bottom. Whenever three
    /// consecutive cells agree, the run is extended while the kind continues, so
    /// runs longer than three are captured whole.
    pub fn find_matches(board: &Board) -> MatchSet {
        let mut matched = MatchSet::new();
        Self::scan(board, &mut matched, |line, step| Position::new(line, step));
        Self::scan(board, &mut matched, |line, step| Position::new(step, line));
        matched
    }

    /// True if the board holds at least one run
    pub fn has_matches(board: &Board) -> bool {
        !Self::find_matches(board).is_empty()
    }

    /// Scan every line of the board; `at(line, step)` maps to a cell so rows and
    /// columns share one loop.
    fn scan(board: &Board, matched: &mut MatchSet, at: impl Fn(usize, usize) -> Position) {
        let size = board.size();
        if size < MIN_RUN {
            return;
        }

        let kind = |pos: Position| board.kind_at(pos.row, pos.col);

        for line in 0..size {
            for start in 0..=size - MIN_RUN {
                let first = kind(at(line, start));
                if (1..MIN_RUN).all(|offset| kind(at(line, start + offset)) == first) {
                    let mut step = start;
                    while step < size && kind(at(line, step)) == first {
                        matched.insert(at(line, step));
                        step += 1;
                    }
                }
            }
        }
    }
}
