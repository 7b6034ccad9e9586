//! Helpers shared by the per-piece generators.

use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::moves::sliding_rays::ray;

/// Step-pieces (knight, king): each target is a quiet move when empty, a
/// capture when it holds an enemy piece, and skipped when it holds a friend.
pub fn push_step_moves(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    targets: impl Iterator<Item = Square>,
    out: &mut Vec<Move>,
) {
    for to in targets {
        match game_state.piece_at(to) {
            None => out.push(Move::new(from, to, piece, None)),
            Some(other) if other.color != piece.color => {
                out.push(Move::new(from, to, piece, Some(other)))
            }
            Some(_) => {}
        }
    }
}

/// Sliding pieces: walk each ray until blocked. An enemy blocker is included
/// as a capture and ends the ray; a friendly blocker ends it without inclusion.
pub fn push_ray_moves(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    directions: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &direction in directions {
        for to in ray(from, direction) {
            match game_state.piece_at(to) {
                None => out.push(Move::new(from, to, piece, None)),
                Some(other) => {
                    if other.color != piece.color {
                        out.push(Move::new(from, to, piece, Some(other)));
                    }
                    break;
                }
            }
        }
    }
}
