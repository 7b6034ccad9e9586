//! Pseudo-legal move enumeration.
//!
//! Dispatches every piece of one side to its per-piece generator. The same
//! entry point backs attack detection in [`GenerationMode::AttacksOnly`],
//! which drops castling (avoiding mutual recursion with the attack detector)
//! and reports pawn diagonals instead of pushes.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Every move the side could make, ignoring self-check.
    Full,
    /// Squares the side attacks; used only for destination lookups.
    AttacksOnly,
}

/// Pseudo-legal moves for the side to move.
pub fn pseudo_legal_moves(game_state: &GameState) -> Vec<Move> {
    pseudo_legal_moves_for(game_state, game_state.side_to_move(), GenerationMode::Full)
}

pub fn pseudo_legal_moves_for(game_state: &GameState, side: Color, mode: GenerationMode) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);

    for (row, cells) in game_state.board().iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let Some(piece) = *cell else { continue };
            if piece.color != side {
                continue;
            }

            let from = Square::new(row as u8, col as u8);
            match piece.kind {
                PieceKind::Pawn => generate_pawn_moves(game_state, from, piece, mode, &mut out),
                PieceKind::Knight => generate_knight_moves(game_state, from, piece, &mut out),
                PieceKind::Bishop => generate_bishop_moves(game_state, from, piece, &mut out),
                PieceKind::Rook => generate_rook_moves(game_state, from, piece, &mut out),
                PieceKind::Queen => generate_queen_moves(game_state, from, piece, &mut out),
                PieceKind::King => generate_king_moves(game_state, from, piece, mode, &mut out),
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_twenty_pseudo_legal_moves() {
        let game = GameState::new_game();
        assert_eq!(pseudo_legal_moves(&game).len(), 20);
        assert!(pseudo_legal_moves(&game)
            .iter()
            .all(|mv| mv.piece_moved.color == Color::White));
    }

    #[test]
    fn attack_mode_reports_pawn_diagonals_not_pushes() {
        let game = GameState::new_game();
        let attacks = pseudo_legal_moves_for(&game, Color::White, GenerationMode::AttacksOnly);
        let e2_targets: Vec<Square> = attacks
            .iter()
            .filter(|mv| mv.start == Square::new(6, 4))
            .map(|mv| mv.end)
            .collect();
        assert_eq!(e2_targets, vec![Square::new(5, 3), Square::new(5, 5)]);
    }

    #[test]
    fn sliders_stop_at_blockers() {
        let game = GameState::new_game();
        // All white sliders are boxed in at the start.
        let moves = pseudo_legal_moves(&game);
        assert!(moves.iter().all(|mv| matches!(
            mv.piece_moved.kind,
            PieceKind::Pawn | PieceKind::Knight
        )));
    }
}
