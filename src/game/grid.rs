use rand::Rng;

use crate::{
    game::matcher::MatchDetector,
    models::{Board, Kind, Tile},
};

pub struct BoardGenerator;

impl BoardGenerator {
    /// Generate a `size` x `size` board with no run already on it.
    ///
    /// Every cell gets an independent, uniform kind. Boards holding a run are
    /// thrown away and drawn again until a quiet one comes up.
    pub fn generate(size: usize, rng: &mut impl Rng) -> Board {
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let board = Self::random_board(size, rng);
            if !MatchDetector::has_matches(&board) {
                tracing::debug!(
                    "Generated {}x{} board after {} attempt(s)",
                    size,
                    size,
                    attempts
                );
                return board;
            }
        }
    }

    /// One unchecked draw
    fn random_board(size: usize, rng: &mut impl Rng) -> Board {
        let mut grid = Vec::with_capacity(size);

        for row in 0..size {
            let mut line = Vec::with_capacity(size);
            for col in 0..size {
                line.push(Self::random_tile(row, col, rng));
            }
            grid.push(line);
        }

        Board::from_square_rows(grid)
    }

    /// A fresh tile of random kind, also used to refill cleared cells
    pub fn random_tile(row: usize, col: usize, rng: &mut impl Rng) -> Tile {
        let kind = Kind::random(rng);
        Tile::new(kind, row, col, rng)
    }
}
