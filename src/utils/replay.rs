//! Rebuild earlier positions by replaying a move list from the start.

use crate::game_state::chess_types::GameState;
use crate::moves::chess_move::Move;

/// Fresh game with the first `upto` moves of `moves` applied. `upto` is
/// clamped to the list length.
///
/// Moves are applied exactly as logged (promotion choices included), so the
/// list must come from a game that began at the standard starting position.
pub fn replay(moves: &[Move], upto: usize) -> GameState {
    let mut game_state = GameState::new_game();
    for &mv in moves.iter().take(upto) {
        game_state.make_move(mv);
    }
    game_state
}
