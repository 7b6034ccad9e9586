//! Attack detection.
//!
//! A square is attacked by a side when any of that side's pseudo-legal
//! moves, generated in attack mode, lands on it. The check takes the position
//! by shared reference, so it cannot leave any trace on the game state.

use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::{pseudo_legal_moves_for, GenerationMode};

pub fn is_square_attacked(game_state: &GameState, square: Square, by: Color) -> bool {
    pseudo_legal_moves_for(game_state, by, GenerationMode::AttacksOnly)
        .iter()
        .any(|mv| mv.end == square)
}

#[inline]
pub fn is_in_check(game_state: &GameState, color: Color) -> bool {
    is_square_attacked(game_state, game_state.king_square(color), color.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    #[test]
    fn starting_position_attacks() {
        let game = GameState::new_game();
        assert!(is_square_attacked(&game, sq("f3"), Color::White));
        assert!(is_square_attacked(&game, sq("e3"), Color::White));
        assert!(!is_square_attacked(&game, sq("e4"), Color::White));
        assert!(is_square_attacked(&game, sq("c6"), Color::Black));
        assert!(!is_in_check(&game, Color::White));
    }

    #[test]
    fn rook_attack_is_blocked_by_any_piece() {
        let game = GameState::from_pieces(
            &[
                (sq("a1"), Piece::new(Color::White, PieceKind::King)),
                (sq("h8"), Piece::new(Color::Black, PieceKind::King)),
                (sq("e8"), Piece::new(Color::Black, PieceKind::Rook)),
                (sq("e4"), Piece::new(Color::White, PieceKind::Knight)),
            ],
            Color::White,
        )
        .expect("valid position");

        assert!(is_square_attacked(&game, sq("e5"), Color::Black));
        assert!(is_square_attacked(&game, sq("e4"), Color::Black));
        assert!(!is_square_attacked(&game, sq("e3"), Color::Black));
    }

    #[test]
    fn attack_detection_leaves_position_untouched() {
        let game = GameState::new_game();
        let key = game.position_key();
        let _ = is_square_attacked(&game, sq("e4"), Color::Black);
        assert_eq!(game.position_key(), key);
        assert_eq!(game.side_to_move(), Color::White);
    }
}
