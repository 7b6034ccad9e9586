//! Single-ply move descriptor.
//!
//! A `Move` is built once by the generator and then only annotated: the
//! position state machine sets `promotion_pending` when a pawn lands on the
//! far rank, and the caller fills in `promotion_choice` afterwards.
//!
//! Equality and hashing use only the packed endpoint key returned by
//! [`Move::move_id`], so two moves with the same start and end squares
//! compare equal even when their flags or promotion choices differ.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::chess_types::{Piece, PieceKind, Square};

#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub start: Square,
    pub end: Square,
    pub piece_moved: Piece,
    /// Piece removed by this move. For en passant this is the passed pawn,
    /// which does not stand on `end`.
    pub piece_captured: Option<Piece>,
    pub is_en_passant: bool,
    pub is_castle: bool,
    pub promotion_pending: bool,
    pub promotion_choice: Option<PieceKind>,
}

impl Move {
    /// Plain move or capture. Promotion is flagged automatically when a pawn
    /// reaches its far rank.
    pub fn new(start: Square, end: Square, piece_moved: Piece, piece_captured: Option<Piece>) -> Self {
        Self {
            start,
            end,
            piece_moved,
            piece_captured,
            is_en_passant: false,
            is_castle: false,
            promotion_pending: piece_moved.kind == PieceKind::Pawn
                && end.row == piece_moved.color.promotion_row(),
            promotion_choice: None,
        }
    }

    pub fn en_passant(start: Square, end: Square, piece_moved: Piece, passed_pawn: Piece) -> Self {
        Self {
            is_en_passant: true,
            ..Self::new(start, end, piece_moved, Some(passed_pawn))
        }
    }

    pub fn castle(start: Square, end: Square, king: Piece) -> Self {
        Self {
            is_castle: true,
            ..Self::new(start, end, king, None)
        }
    }

    /// Same move with the promotion piece chosen. No effect on non-promotions.
    #[must_use]
    pub fn with_promotion(mut self, kind: PieceKind) -> Self {
        if self.promotion_pending {
            self.promotion_choice = Some(kind);
        }
        self
    }

    /// Packed `(start_row, start_col, end_row, end_col)` comparison key.
    #[inline]
    pub const fn move_id(&self) -> u16 {
        self.start.row as u16 * 1000
            + self.start.col as u16 * 100
            + self.end.row as u16 * 10
            + self.end.col as u16
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    /// Square holding the captured piece before the move.
    #[inline]
    pub const fn capture_square(&self) -> Square {
        if self.is_en_passant {
            Square::new(self.start.row, self.end.col)
        } else {
            self.end
        }
    }

    /// Flags and payload comparison, for callers that need more than endpoint equality.
    pub fn is_identical(&self, other: &Move) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.piece_moved == other.piece_moved
            && self.piece_captured == other.piece_captured
            && self.is_en_passant == other.is_en_passant
            && self.is_castle == other.is_castle
            && self.promotion_pending == other.promotion_pending
            && self.promotion_choice == other.promotion_choice
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.move_id() == other.move_id()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.move_id().hash(state);
    }
}

/// Coordinate form, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)?;
        if let Some(kind) = self.promotion_choice {
            write!(f, "{}", kind.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
