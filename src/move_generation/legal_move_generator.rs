//! Full legal move generation pipeline.
//!
//! Generates pseudo-legal moves, plays each one on the real position inside a
//! [`GameState::simulate`] guard, and keeps it only if the mover's king is
//! not attacked afterwards. `get_valid_moves` then classifies the position
//! as checkmate, stalemate or threefold-repetition draw.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::move_generator::pseudo_legal_moves;
use crate::moves::chess_move::Move;

/// Legal moves for the side to move, without touching the terminal flags.
pub fn generate_legal_moves(game_state: &mut GameState) -> Vec<Move> {
    let side = game_state.side_to_move();
    pseudo_legal_moves(game_state)
        .into_iter()
        .filter(|&mv| {
            let trial = game_state.simulate(mv);
            !is_in_check(&trial, side)
        })
        .collect()
}

impl GameState {
    /// Legal moves for the side to move. Also sets the checkmate/stalemate
    /// flags: an empty set is checkmate when the side to move is in check and
    /// stalemate otherwise, and a position seen three times counts as a draw
    /// (reported through the stalemate flag) even though moves remain.
    pub fn get_valid_moves(&mut self) -> Vec<Move> {
        let moves = generate_legal_moves(self);

        self.in_checkmate = false;
        self.in_stalemate = false;
        if moves.is_empty() {
            if is_in_check(self, self.side_to_move) {
                self.in_checkmate = true;
            } else {
                self.in_stalemate = true;
            }
        } else if self.is_threefold_repetition() {
            self.in_stalemate = true;
        }

        moves
    }

    /// Legal moves starting on `square`, for interactive move highlighting.
    pub fn valid_moves_from(&mut self, square: Square) -> Vec<Move> {
        generate_legal_moves(self)
            .into_iter()
            .filter(|mv| mv.start == square)
            .collect()
    }

    /// Whether the side to move is currently in check.
    pub fn in_check(&self) -> bool {
        is_in_check(self, self.side_to_move)
    }
}
