//! Perft: exhaustive move-path enumeration used to validate generation.
//!
//! Promotions are counted once per pawn move (the piece choice is made after
//! generation) and continue as queens.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }
}

/// Leaf-node count at `depth`.
pub fn perft(game_state: &mut GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(game_state);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| {
            let mut child = game_state.simulate(mv.with_promotion(PieceKind::Queen));
            perft(&mut child, depth - 1)
        })
        .sum()
}

/// Leaf-node count with move-type statistics for the final ply.
pub fn perft_detailed(game_state: &mut GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(game_state) {
        let mut child = game_state.simulate(mv.with_promotion(PieceKind::Queen));
        if depth == 1 {
            let mover = mv.piece_moved.color;
            total.merge(PerftCounts {
                nodes: 1,
                captures: mv.is_capture() as u64,
                en_passant: mv.is_en_passant as u64,
                castles: mv.is_castle as u64,
                promotions: mv.promotion_pending as u64,
                checks: is_in_check(&child, mover.opposite()) as u64,
            });
        } else {
            total.merge(perft_detailed(&mut child, depth - 1));
        }
    }
    total
}
