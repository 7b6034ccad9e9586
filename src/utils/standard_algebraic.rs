//! Standard algebraic notation for the move just played.
//!
//! Disambiguation needs the legal moves of the position *before* the move,
//! so the last move is briefly taken back and replayed; the forward-only
//! state is captured first and restored afterwards, leaving the game exactly
//! as it was.

use crate::game_state::chess_rules::KINGSIDE_CASTLE_COL;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::chess_move::Move;

/// What the move did to the opposing king.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    None,
    Check,
    Checkmate,
}

impl CheckState {
    fn suffix(self) -> &'static str {
        match self {
            CheckState::None => "",
            CheckState::Check => "+",
            CheckState::Checkmate => "#",
        }
    }
}

/// Notation for the last logged move, e.g. `Nbd2`, `exd6`, `O-O`, `e8=Q+`.
/// `None` when no move has been played.
pub fn last_move_notation(game_state: &mut GameState) -> Option<String> {
    let mv = *game_state.last_move()?;
    let check = check_state(game_state);
    let rivals = rival_moves(game_state, &mv);
    Some(render_notation(&mv, &rivals, check))
}

/// Render `mv` given the other legal moves of the same piece kind that reach
/// the same square.
pub fn render_notation(mv: &Move, rivals: &[Move], check: CheckState) -> String {
    let mut out = String::new();

    if mv.is_castle {
        out.push_str(if mv.end.col == KINGSIDE_CASTLE_COL {
            "O-O"
        } else {
            "O-O-O"
        });
        out.push_str(check.suffix());
        return out;
    }

    match mv.piece_moved.kind {
        PieceKind::Pawn => {
            if mv.is_capture() {
                out.push(mv.start.file_char());
            }
        }
        kind => {
            out.push(kind.letter());
            out.push_str(&disambiguation(mv, rivals));
        }
    }

    if mv.is_capture() {
        out.push('x');
    }
    out.push_str(&mv.end.to_string());

    if let Some(kind) = mv.promotion_choice {
        out.push('=');
        out.push(kind.letter());
    }
    out.push_str(check.suffix());
    out
}

fn disambiguation(mv: &Move, rivals: &[Move]) -> String {
    if rivals.is_empty() {
        return String::new();
    }
    let shares_file = rivals.iter().any(|other| other.start.col == mv.start.col);
    let shares_rank = rivals.iter().any(|other| other.start.row == mv.start.row);
    match (shares_file, shares_rank) {
        (false, _) => mv.start.file_char().to_string(),
        (true, false) => mv.start.rank_char().to_string(),
        (true, true) => mv.start.to_string(),
    }
}

fn check_state(game_state: &mut GameState) -> CheckState {
    if !is_in_check(game_state, game_state.side_to_move()) {
        CheckState::None
    } else if generate_legal_moves(game_state).is_empty() {
        CheckState::Checkmate
    } else {
        CheckState::Check
    }
}

/// Legal moves, in the position before `mv`, of another piece of the same
/// kind and color landing on the same square. Pawns and kings never need
/// disambiguation.
fn rival_moves(game_state: &mut GameState, mv: &Move) -> Vec<Move> {
    if matches!(mv.piece_moved.kind, PieceKind::Pawn | PieceKind::King) {
        return Vec::new();
    }

    let after = ForwardState::capture(game_state);
    let Some(played) = game_state.undo_move() else {
        return Vec::new();
    };

    let rivals = generate_legal_moves(game_state)
        .into_iter()
        .filter(|other| {
            other.piece_moved == mv.piece_moved && other.end == mv.end && other.start != mv.start
        })
        .collect();

    game_state.make_move(played);
    after.restore(game_state);
    rivals
}
