//! Canonical chess-rule constants.
//!
//! Stores the standard starting arrangement and the fixed squares involved in
//! castling and repetition detection.

use crate::game_state::chess_types::{Board, Color, Piece, PieceKind};

/// Back-rank order from the a-file to the h-file.
pub const BACK_RANK_ORDER: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const KING_START_COL: u8 = 4;
pub const KINGS_ROOK_COL: u8 = 7;
pub const QUEENS_ROOK_COL: u8 = 0;

/// King destination columns for kingside and queenside castling.
pub const KINGSIDE_CASTLE_COL: u8 = 6;
pub const QUEENSIDE_CASTLE_COL: u8 = 2;

/// Occurrences of the same position that make the game a draw.
pub const REPETITION_LIMIT: u32 = 3;

/// Standard starting arrangement (Black on rows 0-1, White on rows 6-7).
pub fn starting_board() -> Board {
    let mut board: Board = [[None; 8]; 8];
    for (col, kind) in BACK_RANK_ORDER.iter().enumerate() {
        board[Color::Black.back_row() as usize][col] = Some(Piece::new(Color::Black, *kind));
        board[Color::White.back_row() as usize][col] = Some(Piece::new(Color::White, *kind));
        board[Color::Black.pawn_start_row() as usize][col] =
            Some(Piece::new(Color::Black, PieceKind::Pawn));
        board[Color::White.pawn_start_row() as usize][col] =
            Some(Piece::new(Color::White, PieceKind::Pawn));
    }
    board
}
