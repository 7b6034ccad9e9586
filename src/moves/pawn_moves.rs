//! Pawn push and capture geometry.

use crate::game_state::chess_types::{Color, Square};

#[inline]
pub fn pawn_single_push(color: Color, from: Square) -> Option<Square> {
    from.offset(color.pawn_direction(), 0)
}

/// Two-square push target, only from the starting row.
#[inline]
pub fn pawn_double_push(color: Color, from: Square) -> Option<Square> {
    if from.row != color.pawn_start_row() {
        return None;
    }
    from.offset(2 * color.pawn_direction(), 0)
}

/// Diagonal squares a pawn on `from` attacks.
#[inline]
pub fn pawn_capture_targets(color: Color, from: Square) -> impl Iterator<Item = Square> {
    let d_row = color.pawn_direction();
    [-1i8, 1]
        .into_iter()
        .filter_map(move |d_col| from.offset(d_row, d_col))
}
