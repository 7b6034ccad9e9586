//! Core mutable position model.
//!
//! `GameState` owns the board grid, the side to move, castling flags, the
//! en-passant target, cached king squares, the move log and the repetition
//! counters. It is mutated in place through `make_move`/`undo_move` (see
//! `move_generation::legal_move_apply`). Undo restores the board, king squares,
//! side to move, move log and repetition counters; it does not restore the
//! castling flags, the en-passant target or the terminal flags. Speculative
//! callers capture a [`ForwardState`] before the move or use
//! [`GameState::simulate`], which does both halves.

use std::collections::HashMap;
use std::fmt;

use tracing::info;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{
    starting_board, KINGS_ROOK_COL, KING_START_COL, QUEENS_ROOK_COL, REPETITION_LIMIT,
};
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::BoardSnapshot;
use crate::utils::render_game_state::render_game_state;
use crate::utils::replay::replay;

/// Canonical position identity for repetition detection: board contents,
/// side to move, castling flags and en-passant target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    squares: [u8; 64],
    side_to_move: Color,
    castling: [CastlingFlags; 2],
    en_passant_target: Option<Square>,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: Color },
    Stalemate,
    ThreefoldRepetition,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling: [CastlingFlags; 2],
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) king_squares: [Square; 2],

    pub(crate) move_log: Vec<Move>,
    pub(crate) position_history: HashMap<PositionKey, u32>,
    /// Key pushed by each `make_move`, popped by `undo_move`.
    pub(crate) key_log: Vec<PositionKey>,

    pub(crate) in_checkmate: bool,
    pub(crate) in_stalemate: bool,

    /// Forward-state snapshots recorded by `play_move`, tagged with the log
    /// length they belong to.
    pub(crate) takeback_stack: Vec<(usize, ForwardState)>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard starting position, White to move.
    pub fn new_game() -> Self {
        let board = starting_board();
        Self::with_board(board, Color::White, [Square::new(7, 4), Square::new(0, 4)])
    }

    /// Assemble an arbitrary position. Each side needs exactly one king.
    ///
    /// Castling flags are cleared only for a king on its home square and
    /// rooks on their corners; everything else is marked as moved so the
    /// repetition key reflects the real rights. Use
    /// [`GameState::set_castling_flags`] to revoke further rights.
    pub fn from_pieces(pieces: &[(Square, Piece)], side_to_move: Color) -> ChessResult<Self> {
        let mut board: Board = [[None; 8]; 8];
        let mut kings: [Option<Square>; 2] = [None, None];

        for &(square, piece) in pieces {
            let cell = &mut board[square.row as usize][square.col as usize];
            if cell.is_some() {
                return Err(ChessError::SquareOccupied(square));
            }
            *cell = Some(piece);

            if piece.kind == PieceKind::King {
                if kings[piece.color.index()].is_some() {
                    return Err(ChessError::MissingKing(piece.color));
                }
                kings[piece.color.index()] = Some(square);
            }
        }

        let white_king = kings[Color::White.index()].ok_or(ChessError::MissingKing(Color::White))?;
        let black_king = kings[Color::Black.index()].ok_or(ChessError::MissingKing(Color::Black))?;

        let mut state = Self::with_board(board, side_to_move, [white_king, black_king]);
        for color in [Color::White, Color::Black] {
            state.castling[color.index()] = castling_flags_from_placement(&board, color);
        }
        state.reseed_history();
        Ok(state)
    }

    fn with_board(board: Board, side_to_move: Color, king_squares: [Square; 2]) -> Self {
        let mut state = Self {
            board,
            side_to_move,
            castling: [CastlingFlags::default(); 2],
            en_passant_target: None,
            king_squares,
            move_log: Vec::new(),
            position_history: HashMap::new(),
            key_log: Vec::new(),
            in_checkmate: false,
            in_stalemate: false,
            takeback_stack: Vec::new(),
        };
        state.reseed_history();
        state
    }

    /// Setup helper: overrides one side's castling flags and resets the
    /// repetition history to the current position.
    pub fn set_castling_flags(&mut self, color: Color, flags: CastlingFlags) {
        self.castling[color.index()] = flags;
        self.reseed_history();
    }

    /// Setup helper: overrides the en-passant target and resets the
    /// repetition history to the current position.
    pub fn set_en_passant_target(&mut self, target: Option<Square>) {
        self.en_passant_target = target;
        self.reseed_history();
    }

    fn reseed_history(&mut self) {
        self.position_history.clear();
        self.position_history.insert(self.position_key(), 1);
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.row as usize][square.col as usize]
    }

    #[inline]
    pub(crate) fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square.row as usize][square.col as usize] = piece;
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_flags(&self, color: Color) -> CastlingFlags {
        self.castling[color.index()]
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    #[inline]
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.move_log.last()
    }

    /// Checkmate flag as of the last `get_valid_moves` call.
    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.in_checkmate
    }

    /// Draw flag (stalemate or threefold repetition) as of the last
    /// `get_valid_moves` call.
    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.in_stalemate
    }

    pub fn position_key(&self) -> PositionKey {
        let mut squares = [0u8; 64];
        for row in 0..8u8 {
            for col in 0..8u8 {
                let square = Square::new(row, col);
                squares[square.index()] = self.piece_at(square).map_or(0, Piece::code);
            }
        }
        PositionKey {
            squares,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant_target: self.en_passant_target,
        }
    }

    /// Occurrences of `key` over the game so far.
    pub fn occurrences(&self, key: &PositionKey) -> u32 {
        self.position_history.get(key).copied().unwrap_or(0)
    }

    /// Occurrences of the current position, counting the starting position.
    pub fn repetition_count(&self) -> u32 {
        self.occurrences(&self.position_key())
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= REPETITION_LIMIT
    }

    /// Square of a pawn that reached the far rank on the last move and still
    /// awaits its piece choice.
    pub fn pending_promotion(&self) -> Option<Square> {
        self.move_log
            .last()
            .filter(|mv| mv.promotion_pending && mv.promotion_choice.is_none())
            .map(|mv| mv.end)
    }

    /// Board contents and side to move, as consumed by evaluators.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            squares: self.board,
            side_to_move: self.side_to_move,
        }
    }

    /// Validated move entry point for interactive callers.
    ///
    /// Looks the move up in the legal set by its endpoints, records a
    /// forward-state snapshot for [`GameState::take_back`], applies the move
    /// and refreshes the terminal flags for the new side to move.
    pub fn play_move(&mut self, start: Square, end: Square) -> ChessResult<Move> {
        if let Some(square) = self.pending_promotion() {
            return Err(ChessError::PromotionPending(square));
        }

        let mv = self
            .get_valid_moves()
            .into_iter()
            .find(|mv| mv.start == start && mv.end == end)
            .ok_or(ChessError::IllegalMove { start, end })?;

        self.takeback_stack
            .push((self.move_log.len(), ForwardState::capture(self)));
        self.make_move(mv);
        self.refresh_outcome();
        Ok(mv)
    }

    /// Resolve the pending promotion of the last move.
    pub fn promote(&mut self, kind: PieceKind) -> ChessResult<()> {
        if !kind.is_promotion_target() {
            return Err(ChessError::InvalidPromotion(kind));
        }
        let square = self.pending_promotion().ok_or(ChessError::NoPendingPromotion)?;
        let color = self.side_to_move.opposite();

        if let Some(last) = self.move_log.last_mut() {
            last.promotion_choice = Some(kind);
        }
        self.set_piece(square, Some(Piece::new(color, kind)));

        // The pawn-on-last-rank key was counted by make_move; count the
        // promoted position instead.
        if let Some(stale) = self.key_log.pop() {
            self.forget_key(&stale);
        }
        self.record_current_key();
        self.refresh_outcome();
        Ok(())
    }

    /// Game-level takeback: undo the last move and, when it was applied by
    /// `play_move`, restore the forward-only state recorded at that time.
    pub fn take_back(&mut self) -> Option<Move> {
        let mv = self.undo_move()?;
        if matches!(self.takeback_stack.last(), Some((len, _)) if *len == self.move_log.len()) {
            if let Some((_, snapshot)) = self.takeback_stack.pop() {
                snapshot.restore(self);
            }
        }
        Some(mv)
    }

    /// Coordinate-move helper (`"e2e4"`, `"e7e8q"`): validated like
    /// [`GameState::play_move`], promoting immediately when a piece letter is given.
    pub fn play_coordinate(&mut self, text: &str) -> ChessResult<Move> {
        let (start, end, promotion) = crate::utils::algebraic::parse_coordinate_move(text)?;
        let mv = self.play_move(start, end)?;
        match (self.pending_promotion(), promotion) {
            (Some(_), Some(kind)) => {
                self.promote(kind)?;
                Ok(mv.with_promotion(kind))
            }
            _ => Ok(mv),
        }
    }

    /// Terminal state of the game, derived from the flags set by the last
    /// `get_valid_moves` call.
    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.in_checkmate {
            Some(GameOutcome::Checkmate {
                winner: self.side_to_move.opposite(),
            })
        } else if self.in_stalemate {
            if self.is_threefold_repetition() {
                Some(GameOutcome::ThreefoldRepetition)
            } else {
                Some(GameOutcome::Stalemate)
            }
        } else {
            None
        }
    }

    fn refresh_outcome(&mut self) {
        if self.pending_promotion().is_some() {
            return;
        }
        self.get_valid_moves();
        if let Some(outcome) = self.outcome() {
            info!(?outcome, plies = self.move_log.len(), "game over");
        }
    }

    /// Position after the first `index` moves of this game's log.
    pub fn position_at(&self, index: usize) -> GameState {
        replay(&self.move_log, index)
    }

    pub(crate) fn record_current_key(&mut self) {
        let key = self.position_key();
        *self.position_history.entry(key).or_insert(0) += 1;
        self.key_log.push(key);
    }

    pub(crate) fn forget_key(&mut self, key: &PositionKey) {
        if let Some(count) = self.position_history.get_mut(key) {
            *count -= 1;
            if *count == 0 {
                self.position_history.remove(key);
            }
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_game_state(self))
    }
}

fn castling_flags_from_placement(board: &Board, color: Color) -> CastlingFlags {
    let row = color.back_row() as usize;
    let holds = |col: u8, kind: PieceKind| board[row][col as usize] == Some(Piece::new(color, kind));
    CastlingFlags {
        king_moved: !holds(KING_START_COL, PieceKind::King),
        kings_rook_moved: !holds(KINGS_ROOK_COL, PieceKind::Rook),
        queens_rook_moved: !holds(QUEENS_ROOK_COL, PieceKind::Rook),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_errors::ChessError;

    fn sq(text: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(text).expect("test square should parse")
    }

    #[test]
    fn new_game_has_standard_arrangement() {
        let game = GameState::new_game();
        assert_eq!(
            game.piece_at(sq("e1")),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            game.piece_at(sq("d8")),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(game.king_square(Color::Black), sq("e8"));
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.repetition_count(), 1);
        assert!(game.move_log().is_empty());
    }

    #[test]
    fn from_pieces_requires_both_kings() {
        let err = GameState::from_pieces(
            &[(sq("e1"), Piece::new(Color::White, PieceKind::King))],
            Color::White,
        )
        .expect_err("black king is missing");
        assert_eq!(err, ChessError::MissingKing(Color::Black));
    }

    #[test]
    fn from_pieces_marks_displaced_kings_and_rooks_as_moved() {
        let game = GameState::from_pieces(
            &[
                (sq("e1"), Piece::new(Color::White, PieceKind::King)),
                (sq("h1"), Piece::new(Color::White, PieceKind::Rook)),
                (sq("a2"), Piece::new(Color::White, PieceKind::Rook)),
                (sq("g8"), Piece::new(Color::Black, PieceKind::King)),
                (sq("a8"), Piece::new(Color::Black, PieceKind::Rook)),
            ],
            Color::White,
        )
        .expect("valid position");

        assert_eq!(
            game.castling_flags(Color::White),
            CastlingFlags {
                king_moved: false,
                kings_rook_moved: false,
                queens_rook_moved: true,
            }
        );
        assert!(game.castling_flags(Color::Black).king_moved);
        assert!(!game.castling_flags(Color::Black).queens_rook_moved);
        assert!(game.castling_flags(Color::Black).kings_rook_moved);
    }

    #[test]
    fn king_shuffle_from_a_built_position_reaches_threefold() {
        let mut game = GameState::from_pieces(
            &[
                (sq("a1"), Piece::new(Color::White, PieceKind::King)),
                (sq("c2"), Piece::new(Color::White, PieceKind::Queen)),
                (sq("h8"), Piece::new(Color::Black, PieceKind::King)),
            ],
            Color::White,
        )
        .expect("valid position");

        for mv in ["a1b1", "h8g8", "b1a1", "g8h8"] {
            game.play_coordinate(mv).expect("king shuffle is legal");
        }
        assert_eq!(game.repetition_count(), 2);
        for mv in ["a1b1", "h8g8", "b1a1", "g8h8"] {
            game.play_coordinate(mv).expect("king shuffle is legal");
        }
        assert_eq!(game.repetition_count(), 3);
        assert!(game.is_threefold_repetition());
        assert_eq!(game.outcome(), Some(GameOutcome::ThreefoldRepetition));
    }

    #[test]
    fn play_move_rejects_moves_outside_the_legal_set() {
        let mut game = GameState::new_game();
        let err = game
            .play_move(sq("e2"), sq("e5"))
            .expect_err("pawn cannot move three squares");
        assert_eq!(
            err,
            ChessError::IllegalMove {
                start: sq("e2"),
                end: sq("e5")
            }
        );
        assert!(game.move_log().is_empty());
    }

    #[test]
    fn take_back_restores_forward_state() {
        let mut game = GameState::new_game();
        game.play_coordinate("e2e4").expect("e2e4 is legal");
        assert_eq!(game.en_passant_target(), Some(sq("e3")));

        game.play_coordinate("e7e5").expect("e7e5 is legal");
        game.play_coordinate("e1e2").expect("king step is legal");
        assert!(game.castling_flags(Color::White).king_moved);

        game.take_back().expect("one move to take back");
        assert!(!game.castling_flags(Color::White).king_moved);
        assert_eq!(game.en_passant_target(), Some(sq("e6")));

        game.take_back().expect("second move to take back");
        assert_eq!(game.en_passant_target(), Some(sq("e3")));
        assert_eq!(game.move_log().len(), 1);
    }

    #[test]
    fn promotion_waits_for_a_piece_choice() {
        let mut game = GameState::from_pieces(
            &[
                (sq("e1"), Piece::new(Color::White, PieceKind::King)),
                (sq("a8"), Piece::new(Color::Black, PieceKind::King)),
                (sq("g7"), Piece::new(Color::White, PieceKind::Pawn)),
            ],
            Color::White,
        )
        .expect("valid position");

        game.play_move(sq("g7"), sq("g8")).expect("push is legal");
        assert_eq!(game.pending_promotion(), Some(sq("g8")));
        assert_eq!(
            game.play_move(sq("a8"), sq("a7")),
            Err(ChessError::PromotionPending(sq("g8")))
        );
        assert_eq!(
            game.promote(PieceKind::King),
            Err(ChessError::InvalidPromotion(PieceKind::King))
        );

        game.promote(PieceKind::Rook).expect("rook is a valid choice");
        assert_eq!(
            game.piece_at(sq("g8")),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(game.pending_promotion(), None);
        assert_eq!(game.repetition_count(), 1);
        assert_eq!(game.promote(PieceKind::Queen), Err(ChessError::NoPendingPromotion));
    }

    #[test]
    fn fools_mate_is_reported_as_checkmate() {
        let mut game = GameState::new_game();
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.play_coordinate(mv).expect("opening move is legal");
        }
        assert!(game.is_checkmate());
        assert!(!game.is_stalemate());
        assert!(game.get_valid_moves().is_empty());
        assert_eq!(
            game.outcome(),
            Some(GameOutcome::Checkmate {
                winner: Color::Black
            })
        );
    }
}
