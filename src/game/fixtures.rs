use rand::Rng;

use crate::models::{
    Board,
    Kind::{self, Almond as E, Caramel as D, Cookies as C, Dark as B, Milk as A},
};

/// Quiet 6x6 board where swapping (0,2) with (1,2) completes A,A,A in row 0,
/// and swapping (4,4) with (4,5) makes nothing.
pub(crate) fn quiet_kinds() -> Vec<Vec<Kind>> {
    vec![
        vec![A, A, B, C, D, E],
        vec![B, C, A, D, E, A],
        vec![C, D, E, B, A, B],
        vec![D, E, C, A, B, C],
        vec![E, A, D, B, C, D],
        vec![A, B, C, E, D, E],
    ]
}

pub(crate) fn quiet_board(rng: &mut impl Rng) -> Board {
    Board::from_kinds(&quiet_kinds(), rng).unwrap()
}
