//! Capture-first move ordering (most valuable victim, least valuable attacker).

use crate::game_state::chess_types::PieceKind;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::MaterialTableScorer;

/// Ranks promotions above every capture.
const PROMOTION_SCORE: i32 = 100_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoveOrdering {
    /// Generator order.
    Unordered,
    #[default]
    MvvLva,
}

/// Attacker/victim heuristic: `10 * captured - mover`, promotions first,
/// quiet moves zero.
#[inline]
pub fn ordering_score(mv: &Move) -> i32 {
    let mut score = 0;
    if mv.promotion_pending {
        score += PROMOTION_SCORE;
    }
    if let Some(captured) = mv.piece_captured {
        score += 10 * MaterialTableScorer::piece_value(captured.kind)
            - ordering_value(mv.piece_moved.kind);
    }
    score
}

// A king capturing is cheap for ordering purposes.
#[inline]
fn ordering_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::King => 0,
        other => MaterialTableScorer::piece_value(other),
    }
}

/// Sort `moves` best-first. The sort is stable, so ties keep generator order.
pub fn order_moves(moves: &mut [Move], ordering: MoveOrdering) {
    if ordering == MoveOrdering::MvvLva {
        moves.sort_by_key(|mv| std::cmp::Reverse(ordering_score(mv)));
    }
}

#[cfg(test)]
mod tests {
    use super::{order_moves, ordering_score, MoveOrdering};
    use crate::game_state::chess_types::*;
    use crate::moves::chess_move::Move;

    fn piece(color: Color, kind: PieceKind) -> Piece {
        Piece::new(color, kind)
    }

    #[test]
    fn pawn_takes_queen_outranks_queen_takes_pawn() {
        let pxq = Move::new(
            Square::new(4, 4),
            Square::new(3, 3),
            piece(Color::White, PieceKind::Pawn),
            Some(piece(Color::Black, PieceKind::Queen)),
        );
        let qxp = Move::new(
            Square::new(4, 4),
            Square::new(3, 3),
            piece(Color::White, PieceKind::Queen),
            Some(piece(Color::Black, PieceKind::Pawn)),
        );
        assert_eq!(ordering_score(&pxq), 8900);
        assert_eq!(ordering_score(&qxp), 100);
    }

    #[test]
    fn promotions_come_first_and_quiet_moves_keep_their_order() {
        let quiet_a = Move::new(Square::new(7, 1), Square::new(5, 2), piece(Color::White, PieceKind::Knight), None);
        let quiet_b = Move::new(Square::new(7, 6), Square::new(5, 5), piece(Color::White, PieceKind::Knight), None);
        let capture = Move::new(
            Square::new(4, 4),
            Square::new(3, 3),
            piece(Color::White, PieceKind::Rook),
            Some(piece(Color::Black, PieceKind::Knight)),
        );
        let promotion = Move::new(Square::new(1, 0), Square::new(0, 0), piece(Color::White, PieceKind::Pawn), None);

        let mut moves = vec![quiet_a, capture, quiet_b, promotion];
        order_moves(&mut moves, MoveOrdering::MvvLva);
        assert!(moves[0].is_identical(&promotion));
        assert!(moves[1].is_identical(&capture));
        assert!(moves[2].is_identical(&quiet_a));
        assert!(moves[3].is_identical(&quiet_b));

        let mut untouched = vec![quiet_a, capture];
        order_moves(&mut untouched, MoveOrdering::Unordered);
        assert!(untouched[0].is_identical(&quiet_a));
    }
}
