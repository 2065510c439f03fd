use crate::models::Position;

pub struct SwapValidator;

impl SwapValidator {
    /// Check if two positions are orthogonal neighbours (no diagonals)
    pub fn are_adjacent(pos1: Position, pos2: Position) -> bool {
        let row_diff = pos1.row.abs_diff(pos2.row);
        let col_diff = pos1.col.abs_diff(pos2.col);

        row_diff + col_diff == 1
    }
}
