//! Errors used throughout the chess engine.
//!
//! The rule primitives (`make_move`, `undo_move`, move generation and attack
//! detection) are infallible: illegal moves are simply never generated and an
//! empty move set is a terminal game state, not a failure. `ChessError` only
//! covers the validated outer surface: parsing user text, applying a move
//! chosen by coordinates, resolving promotions and configuring engines.

use thiserror::Error;

use crate::game_state::chess_types::{Color, PieceKind, Square};

/// Unified error type for the chess engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// A square string such as `"e4"` could not be parsed.
    #[error("invalid algebraic square: {0:?}")]
    InvalidAlgebraicSquare(String),

    /// A coordinate move string such as `"e2e4"` or `"e7e8q"` could not be parsed.
    #[error("invalid coordinate move: {0:?}")]
    InvalidCoordinateMove(String),

    /// The requested move is not in the legal move set of the position.
    #[error("illegal move: {start} -> {end}")]
    IllegalMove { start: Square, end: Square },

    /// A move was requested while the previous promotion still awaits a piece choice.
    #[error("promotion on {0} is still pending a piece choice")]
    PromotionPending(Square),

    /// `promote` was called but the last move did not leave a pawn awaiting promotion.
    #[error("no promotion is pending")]
    NoPendingPromotion,

    /// Pawns can only promote to a knight, bishop, rook or queen.
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),

    /// A position was assembled without exactly one king for a side.
    #[error("position must contain exactly one {0:?} king")]
    MissingKing(Color),

    /// Two pieces were placed on the same square while assembling a position.
    #[error("square {0} is already occupied")]
    SquareOccupied(Square),

    /// An engine received an option name it does not understand.
    #[error("unknown engine option: {0}")]
    UnknownOption(String),

    /// An engine option value could not be interpreted.
    #[error("invalid value {value:?} for option {name}")]
    InvalidOptionValue { name: String, value: String },

    /// Difficulty names are `easy`, `medium` and `hard`.
    #[error("unknown difficulty: {0:?}")]
    UnknownDifficulty(String),
}

pub type ChessResult<T> = Result<T, ChessError>;
