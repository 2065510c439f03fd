use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{GameError, GameResult};

/// Chocolate types a cell can hold. Matching compares these and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Milk,
    Dark,
    Cookies,
    Caramel,
    Almond,
}

/// Display metadata for a kind, handed to renderers as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KindInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub wrapper: &'static str,
    pub stripes: bool,
}

impl Kind {
    pub const ALL: [Kind; 5] = [
        Kind::Milk,
        Kind::Dark,
        Kind::Cookies,
        Kind::Caramel,
        Kind::Almond,
    ];

    /// Pick a kind uniformly at random
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn info(self) -> KindInfo {
        match self {
            Kind::Milk => KindInfo {
                id: "milk",
                name: "Milk Chocolate Kiss",
                color: "#8B4513",
                wrapper: "#C0C0C0",
                stripes: false,
            },
            Kind::Dark => KindInfo {
                id: "dark",
                name: "Dark Chocolate Kiss",
                color: "#3E2723",
                wrapper: "#4A4A4A",
                stripes: false,
            },
            Kind::Cookies => KindInfo {
                id: "cookies",
                name: "Cookies & Cream Kiss",
                color: "#F5E6D3",
                wrapper: "#FFFFFF",
                stripes: true,
            },
            Kind::Caramel => KindInfo {
                id: "caramel",
                name: "Caramel Kiss",
                color: "#D2691E",
                wrapper: "#FFD700",
                stripes: false,
            },
            Kind::Almond => KindInfo {
                id: "almond",
                name: "Almond Kiss",
                color: "#CD853F",
                wrapper: "#B87333",
                stripes: false,
            },
        }
    }

    /// The full kind catalogue in declaration order
    pub fn catalogue() -> Vec<KindInfo> {
        Self::ALL.iter().map(|kind| kind.info()).collect()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A single board cell. `id` only keys the tile for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub kind: Kind,
    pub row: usize,
    pub col: usize,
    pub id: Uuid,
}

impl Tile {
    /// Create a tile with an id drawn from `rng`, so seeded games stay reproducible
    pub fn new(kind: Kind, row: usize, col: usize, rng: &mut impl Rng) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill(&mut bytes);
        Self {
            kind,
            row,
            col,
            id: uuid::Builder::from_random_bytes(bytes).into_uuid(),
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// Square matrix of tiles. Every cell always holds a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Board {
    cells: Vec<Vec<Tile>>,
}

impl Board {
    /// Build a board from rows of tiles, restamping each tile's coordinates
    pub fn from_rows(mut cells: Vec<Vec<Tile>>) -> GameResult<Self> {
        let size = cells.len();
        if size == 0 {
            return Err(GameError::InvalidRules("board must not be empty".to_string()));
        }
        if let Some(bad) = cells.iter().find(|row| row.len() != size) {
            return Err(GameError::InvalidRules(format!(
                "board must be square: expected rows of {} tiles, found {}",
                size,
                bad.len()
            )));
        }

        for (row, tiles) in cells.iter_mut().enumerate() {
            for (col, tile) in tiles.iter_mut().enumerate() {
                tile.row = row;
                tile.col = col;
            }
        }

        Ok(Self { cells })
    }

    /// Build a board from a kind layout, assigning fresh tile ids
    pub fn from_kinds(kinds: &[Vec<Kind>], rng: &mut impl Rng) -> GameResult<Self> {
        let cells = kinds
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.iter()
                    .enumerate()
                    .map(|(col, kind)| Tile::new(*kind, row, col, rng))
                    .collect()
            })
            .collect();
        Self::from_rows(cells)
    }

    /// Wrap rows the engine built itself, already square with coordinates stamped
    pub(crate) fn from_square_rows(cells: Vec<Vec<Tile>>) -> Self {
        debug_assert!(cells.iter().all(|row| row.len() == cells.len()));
        Self { cells }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size() && pos.col < self.size()
    }

    /// Fail with `OutOfBounds` unless `pos` addresses a cell
    pub fn check(&self, pos: Position) -> GameResult<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                size: self.size(),
            })
        }
    }

    pub fn get(&self, pos: Position) -> Option<&Tile> {
        self.cells.get(pos.row).and_then(|row| row.get(pos.col))
    }

    /// Kind at a cell. Callers index within bounds.
    pub fn kind_at(&self, row: usize, col: usize) -> Kind {
        self.cells[row][col].kind
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.cells
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    pub fn kinds(&self) -> Vec<Vec<Kind>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|tile| tile.kind).collect())
            .collect()
    }

    /// Exchange two tiles in place, keeping their coordinates in step with their cells
    pub(crate) fn swap(&mut self, a: Position, b: Position) {
        let first = self.cells[a.row][a.col].clone();
        let second = std::mem::replace(&mut self.cells[b.row][b.col], first);
        self.cells[a.row][a.col] = second;

        for pos in [a, b] {
            let tile = &mut self.cells[pos.row][pos.col];
            tile.row = pos.row;
            tile.col = pos.col;
        }
    }

    pub(crate) fn into_rows(self) -> Vec<Vec<Tile>> {
        self.cells
    }
}
