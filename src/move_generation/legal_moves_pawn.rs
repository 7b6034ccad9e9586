//! Pawn move generation.
//!
//! Pushes need empty squares (both of them for the double push), diagonal
//! captures need an enemy piece, and en passant targets the square recorded
//! by the previous double push. Moves reaching the far rank carry
//! `promotion_pending` with no piece chosen yet.

use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::GenerationMode;
use crate::moves::chess_move::Move;
use crate::moves::pawn_moves::{pawn_capture_targets, pawn_double_push, pawn_single_push};

pub fn generate_pawn_moves(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    mode: GenerationMode,
    out: &mut Vec<Move>,
) {
    let color = piece.color;

    if mode == GenerationMode::AttacksOnly {
        // Attacked squares, occupied or not; pushes never attack.
        for to in pawn_capture_targets(color, from) {
            out.push(Move::new(from, to, piece, game_state.piece_at(to)));
        }
        return;
    }

    if let Some(one) = pawn_single_push(color, from) {
        if game_state.piece_at(one).is_none() {
            out.push(Move::new(from, one, piece, None));

            if let Some(two) = pawn_double_push(color, from) {
                if game_state.piece_at(two).is_none() {
                    out.push(Move::new(from, two, piece, None));
                }
            }
        }
    }

    for to in pawn_capture_targets(color, from) {
        match game_state.piece_at(to) {
            Some(target) if target.color != color => {
                out.push(Move::new(from, to, piece, Some(target)));
            }
            Some(_) => {}
            None if game_state.en_passant_target() == Some(to) => {
                let passed = Square::new(from.row, to.col);
                if let Some(pawn) = game_state
                    .piece_at(passed)
                    .filter(|p| p.is(color.opposite(), PieceKind::Pawn))
                {
                    out.push(Move::en_passant(from, to, piece, pawn));
                }
            }
            None => {}
        }
    }
}
