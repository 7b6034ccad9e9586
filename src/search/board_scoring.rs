//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search remains modular by delegating static position scoring to this
//! trait, so the table-based heuristic and an external learned oracle can be
//! swapped without altering search code. Every scorer reports from White's
//! point of view: higher is better for White.

use crate::game_state::chess_types::*;
use crate::tables::piece_square_tables::positional_bonus;

pub const MATE_SCORE: i32 = 30000;

/// Piece-per-square contents and side to move, handed to evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub squares: Board,
    pub side_to_move: Color,
}

impl BoardSnapshot {
    /// Twelve one-hot planes, White pawn..king then Black pawn..king,
    /// indexed `[plane][row][col]` with row 0 = rank 8.
    pub fn to_planes(&self) -> [[[f32; 8]; 8]; 12] {
        let mut planes = [[[0.0f32; 8]; 8]; 12];
        for (row, cells) in self.squares.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if let Some(piece) = cell {
                    let plane = piece.color.index() * 6 + piece.kind.index();
                    planes[plane][row][col] = 1.0;
                }
            }
        }
        planes
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| (Square::new(row as u8, col as u8), piece))
            })
        })
    }
}

pub trait BoardScorer: Send + Sync {
    /// Deterministic score, positive when White stands better.
    fn score(&self, snapshot: &BoardSnapshot) -> i32;
}

/// Material plus piece-square bonuses, White minus Black.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialTableScorer;

impl MaterialTableScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 20000,
        }
    }
}

impl BoardScorer for MaterialTableScorer {
    fn score(&self, snapshot: &BoardSnapshot) -> i32 {
        snapshot
            .pieces()
            .map(|(square, piece)| {
                let value = Self::piece_value(piece.kind)
                    + positional_bonus(piece.kind, piece.color, square);
                match piece.color {
                    Color::White => value,
                    Color::Black => -value,
                }
            })
            .sum()
    }
}

/// External position evaluator, e.g. a trained network behind a local call.
///
/// Returns a preference in `[-1, 1]`, 1 meaning White is winning.
pub trait PositionOracle: Send + Sync {
    fn evaluate(&self, snapshot: &BoardSnapshot) -> f32;
}

impl<F> PositionOracle for F
where
    F: Fn(&BoardSnapshot) -> f32 + Send + Sync,
{
    fn evaluate(&self, snapshot: &BoardSnapshot) -> f32 {
        self(snapshot)
    }
}

pub const DEFAULT_ORACLE_SCALE: f32 = 1000.0;

/// Adapts a [`PositionOracle`] to the centipawn range used by search.
pub struct OracleScorer<O> {
    oracle: O,
    scale: f32,
}

impl<O: PositionOracle> OracleScorer<O> {
    pub fn new(oracle: O) -> Self {
        Self::with_scale(oracle, DEFAULT_ORACLE_SCALE)
    }

    pub fn with_scale(oracle: O, scale: f32) -> Self {
        Self { oracle, scale }
    }
}

impl<O: PositionOracle> BoardScorer for OracleScorer<O> {
    fn score(&self, snapshot: &BoardSnapshot) -> i32 {
        let raw = self.oracle.evaluate(snapshot);
        // NaN from a misbehaving oracle counts as level.
        let raw = if raw.is_nan() { 0.0 } else { raw.clamp(-1.0, 1.0) };
        (raw * self.scale).round() as i32
    }
}
