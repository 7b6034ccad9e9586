//! Forward-only state snapshot and the scoped simulation guard.
//!
//! `undo_move` rebuilds the board, king squares, side to move, move log and
//! repetition counters, but leaves castling flags, the en-passant target and
//! the terminal flags as the undone move left them. Every speculative move
//! (legality filter, search, notation) therefore goes through
//! [`GameState::simulate`], which captures a [`ForwardState`] first and puts
//! it back when the guard is dropped, including on early returns.

use std::ops::{Deref, DerefMut};

use crate::game_state::chess_types::{CastlingFlags, GameState, Square};
use crate::moves::chess_move::Move;

/// Everything `undo_move` does not restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardState {
    castling: [CastlingFlags; 2],
    en_passant_target: Option<Square>,
    in_checkmate: bool,
    in_stalemate: bool,
}

impl ForwardState {
    pub fn capture(game_state: &GameState) -> Self {
        Self {
            castling: game_state.castling,
            en_passant_target: game_state.en_passant_target,
            in_checkmate: game_state.in_checkmate,
            in_stalemate: game_state.in_stalemate,
        }
    }

    pub fn restore(self, game_state: &mut GameState) {
        game_state.castling = self.castling;
        game_state.en_passant_target = self.en_passant_target;
        game_state.in_checkmate = self.in_checkmate;
        game_state.in_stalemate = self.in_stalemate;
    }
}

/// A move applied to a borrowed position for the lifetime of the guard.
pub struct SimulatedMove<'a> {
    game_state: &'a mut GameState,
    snapshot: ForwardState,
}

impl GameState {
    /// Apply `mv` speculatively. Dropping the returned guard undoes the move
    /// and restores the forward-only state captured here.
    pub fn simulate(&mut self, mv: Move) -> SimulatedMove<'_> {
        let snapshot = ForwardState::capture(self);
        self.make_move(mv);
        SimulatedMove {
            game_state: self,
            snapshot,
        }
    }
}

impl Deref for SimulatedMove<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        self.game_state
    }
}

impl DerefMut for SimulatedMove<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        self.game_state
    }
}

impl Drop for SimulatedMove<'_> {
    fn drop(&mut self) {
        self.game_state.undo_move();
        self.snapshot.restore(self.game_state);
    }
}
