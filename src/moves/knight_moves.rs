//! Knight jump geometry.

use crate::game_state::chess_types::Square;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// On-board squares a knight on `from` can jump to.
#[inline]
pub fn knight_targets(from: Square) -> impl Iterator<Item = Square> {
    KNIGHT_OFFSETS
        .iter()
        .filter_map(move |&(d_row, d_col)| from.offset(d_row, d_col))
}

#[cfg(test)]
mod tests {
    use super::knight_targets;
    use crate::game_state::chess_types::Square;

    #[test]
    fn knight_on_d4_has_eight_targets() {
        assert_eq!(knight_targets(Square::new(4, 3)).count(), 8);
    }

    #[test]
    fn knight_in_corner_has_two_targets() {
        assert_eq!(knight_targets(Square::new(0, 0)).count(), 2);
    }
}
