//! Ray walking shared by the sliding pieces.

use crate::game_state::chess_types::Square;

/// Squares along one direction from `from` (exclusive) to the board edge.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    current: Square,
    d_row: i8,
    d_col: i8,
}

impl Iterator for Ray {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let next = self.current.offset(self.d_row, self.d_col)?;
        self.current = next;
        Some(next)
    }
}

#[inline]
pub fn ray(from: Square, (d_row, d_col): (i8, i8)) -> Ray {
    Ray {
        current: from,
        d_row,
        d_col,
    }
}
