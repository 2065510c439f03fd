pub mod board;
pub mod session;

pub use board::{
    // Grid types
    Board, Kind, KindInfo, Position, Tile,
};
pub use session::SessionSummary;
