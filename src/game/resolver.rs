use rand::Rng;

use crate::{
    game::{grid::BoardGenerator, matcher::MatchSet},
    models::{Board, Position, Tile},
};

/// Board after one removal, gravity and refill pass
#[derive(Debug, Clone)]
pub struct Resolution {
    pub board: Board,
    /// Cells that got a brand new tile
    pub refilled: Vec<Position>,
}

pub struct MatchResolver;

impl MatchResolver {
    /// Remove the matched tiles, drop the survivors of each column to the bottom
    /// and fill the vacated top cells with fresh random tiles.
    ///
    /// Single pass: runs formed by falling or refilled tiles are left on the board.
    pub fn resolve(board: Board, matched: &MatchSet, rng: &mut impl Rng) -> Resolution {
        let size = board.size();
        let mut holes: Vec<Vec<Option<Tile>>> = board
            .into_rows()
            .into_iter()
            .map(|row| row.into_iter().map(Some).collect())
            .collect();

        for pos in matched {
            if let Some(cell) = holes.get_mut(pos.row).and_then(|row| row.get_mut(pos.col)) {
                *cell = None;
            }
        }

        let mut refilled = Vec::new();

        for col in 0..size {
            // Walk upwards, moving each survivor down past the gaps seen so far
            let mut empty = 0;
            for row in (0..size).rev() {
                match holes[row][col].take() {
                    None => empty += 1,
                    Some(mut tile) => {
                        tile.row = row + empty;
                        holes[row + empty][col] = Some(tile);
                    }
                }
            }

            for row in 0..empty {
                holes[row][col] = Some(BoardGenerator::random_tile(row, col, rng));
                refilled.push(Position::new(row, col));
            }
        }

        let rows = holes
            .into_iter()
            .map(|row| row.into_iter().flatten().collect())
            .collect();
        Resolution {
            board: Board::from_square_rows(rows),
            refilled,
        }
    }
}
