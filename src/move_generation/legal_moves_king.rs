//! King move generation, including castling.
//!
//! Castling needs an unmoved king on its start square, an unmoved rook on
//! its corner, empty squares between them, and no enemy attack on the king's
//! start, transit or destination square. It is skipped entirely when the
//! generator runs in attack-detection mode.

use crate::game_state::chess_rules::{
    KINGSIDE_CASTLE_COL, KINGS_ROOK_COL, KING_START_COL, QUEENSIDE_CASTLE_COL, QUEENS_ROOK_COL,
};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_step_moves;
use crate::move_generation::move_generator::GenerationMode;
use crate::moves::chess_move::Move;
use crate::moves::king_moves::king_targets;

pub fn generate_king_moves(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    mode: GenerationMode,
    out: &mut Vec<Move>,
) {
    push_step_moves(game_state, from, piece, king_targets(from), out);

    if mode == GenerationMode::Full {
        generate_castling_moves(game_state, from, piece, out);
    }
}

fn generate_castling_moves(game_state: &GameState, from: Square, king: Piece, out: &mut Vec<Move>) {
    let side = king.color;
    let enemy = side.opposite();
    let flags = game_state.castling_flags(side);
    let row = side.back_row();

    if flags.king_moved || from != Square::new(row, KING_START_COL) {
        return;
    }

    // Cannot castle out of check.
    if is_square_attacked(game_state, from, enemy) {
        return;
    }

    if !flags.kings_rook_moved
        && has_own_rook(game_state, Square::new(row, KINGS_ROOK_COL), side)
        && cols_empty(game_state, row, KING_START_COL + 1..KINGS_ROOK_COL)
        && cols_safe(game_state, row, KING_START_COL + 1..=KINGSIDE_CASTLE_COL, enemy)
    {
        out.push(Move::castle(from, Square::new(row, KINGSIDE_CASTLE_COL), king));
    }

    if !flags.queens_rook_moved
        && has_own_rook(game_state, Square::new(row, QUEENS_ROOK_COL), side)
        && cols_empty(game_state, row, QUEENS_ROOK_COL + 1..KING_START_COL)
        && cols_safe(game_state, row, QUEENSIDE_CASTLE_COL..KING_START_COL, enemy)
    {
        out.push(Move::castle(from, Square::new(row, QUEENSIDE_CASTLE_COL), king));
    }
}

fn has_own_rook(game_state: &GameState, square: Square, side: Color) -> bool {
    game_state
        .piece_at(square)
        .is_some_and(|p| p.is(side, PieceKind::Rook))
}

fn cols_empty(game_state: &GameState, row: u8, cols: impl IntoIterator<Item = u8>) -> bool {
    cols.into_iter()
        .all(|col| game_state.piece_at(Square::new(row, col)).is_none())
}

fn cols_safe(game_state: &GameState, row: u8, cols: impl IntoIterator<Item = u8>, enemy: Color) -> bool {
    cols.into_iter()
        .all(|col| !is_square_attacked(game_state, Square::new(row, col), enemy))
}
