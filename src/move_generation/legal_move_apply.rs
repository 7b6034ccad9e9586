//! Make/undo for the position state machine.
//!
//! `make_move` trusts its input: it performs no legality validation and will
//! corrupt the position if fed a move outside the legal set. `undo_move` is
//! the exact inverse for the board, king squares, side to move, move log and
//! repetition counters; see `game_state::undo_state` for the fields it leaves
//! to the caller.

use crate::game_state::chess_rules::{KINGSIDE_CASTLE_COL, KINGS_ROOK_COL, QUEENS_ROOK_COL};
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;

impl GameState {
    pub fn make_move(&mut self, mv: Move) {
        let side = mv.piece_moved.color;

        if mv.is_en_passant {
            self.set_piece(mv.capture_square(), None);
        }

        let placed = match mv.promotion_choice {
            Some(kind) if mv.promotion_pending => Piece::new(side, kind),
            _ => mv.piece_moved,
        };
        self.set_piece(mv.start, None);
        self.set_piece(mv.end, Some(placed));

        self.en_passant_target = None;
        if mv.piece_moved.kind == PieceKind::Pawn && mv.start.row.abs_diff(mv.end.row) == 2 {
            self.en_passant_target = Some(Square::new((mv.start.row + mv.end.row) / 2, mv.start.col));
        }

        if mv.is_castle {
            let (rook_from, rook_to) = castle_rook_squares(&mv);
            let rook = self.piece_at(rook_from);
            self.set_piece(rook_from, None);
            self.set_piece(rook_to, rook);
            let flags = &mut self.castling[side.index()];
            flags.king_moved = true;
            if mv.end.col == KINGSIDE_CASTLE_COL {
                flags.kings_rook_moved = true;
            } else {
                flags.queens_rook_moved = true;
            }
        }

        match mv.piece_moved.kind {
            PieceKind::King => {
                self.king_squares[side.index()] = mv.end;
                self.castling[side.index()].king_moved = true;
            }
            PieceKind::Rook => mark_rook_moved(&mut self.castling[side.index()], side, mv.start),
            _ => {}
        }

        // A rook captured on its corner can no longer castle either.
        if let Some(captured) = mv.piece_captured {
            if captured.kind == PieceKind::Rook {
                mark_rook_moved(&mut self.castling[captured.color.index()], captured.color, mv.end);
            }
        }

        let mut logged = mv;
        logged.promotion_pending =
            mv.piece_moved.kind == PieceKind::Pawn && mv.end.row == side.promotion_row();
        self.move_log.push(logged);

        self.side_to_move = side.opposite();
        self.record_current_key();
    }

    /// Reverse the last logged move. Returns `None` (and changes nothing)
    /// when the log is empty.
    pub fn undo_move(&mut self) -> Option<Move> {
        let mv = self.move_log.pop()?;
        if let Some(key) = self.key_log.pop() {
            self.forget_key(&key);
        }

        let side = mv.piece_moved.color;
        self.set_piece(mv.start, Some(mv.piece_moved));
        if mv.is_en_passant {
            self.set_piece(mv.end, None);
            self.set_piece(mv.capture_square(), mv.piece_captured);
        } else {
            self.set_piece(mv.end, mv.piece_captured);
        }

        if mv.piece_moved.kind == PieceKind::King {
            self.king_squares[side.index()] = mv.start;
        }

        if mv.is_castle {
            let (rook_from, rook_to) = castle_rook_squares(&mv);
            let rook = self.piece_at(rook_to);
            self.set_piece(rook_to, None);
            self.set_piece(rook_from, rook);
        }

        self.side_to_move = side;
        Some(mv)
    }
}

/// Rook origin and destination for a castling move.
fn castle_rook_squares(mv: &Move) -> (Square, Square) {
    let row = mv.start.row;
    if mv.end.col == KINGSIDE_CASTLE_COL {
        (Square::new(row, KINGS_ROOK_COL), Square::new(row, mv.end.col - 1))
    } else {
        (Square::new(row, QUEENS_ROOK_COL), Square::new(row, mv.end.col + 1))
    }
}

fn mark_rook_moved(flags: &mut CastlingFlags, color: Color, square: Square) {
    if square.row != color.back_row() {
        return;
    }
    match square.col {
        KINGS_ROOK_COL => flags.kings_rook_moved = true,
        QUEENS_ROOK_COL => flags.queens_rook_moved = true,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_types::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    fn find(game: &mut GameState, from: &str, to: &str) -> crate::moves::chess_move::Move {
        let (start, end) = (sq(from), sq(to));
        game.get_valid_moves()
            .into_iter()
            .find(|mv| mv.start == start && mv.end == end)
            .expect("move should be legal")
    }

    #[test]
    fn make_then_undo_restores_board_and_log_for_every_opening_move() {
        let mut game = GameState::new_game();
        let board = *game.board();
        for mv in game.get_valid_moves() {
            game.make_move(mv);
            assert_eq!(game.move_log().len(), 1);
            let undone = game.undo_move().expect("one move to undo");
            assert!(undone.is_identical(&mv));
            assert_eq!(*game.board(), board);
            assert!(game.move_log().is_empty());
            assert_eq!(game.side_to_move(), Color::White);
        }
    }

    #[test]
    fn undo_leaves_forward_only_flags_to_the_caller() {
        let mut game = GameState::new_game();
        let push = find(&mut game, "e2", "e4");
        game.make_move(push);
        game.undo_move();
        assert_eq!(*game.board(), *GameState::new_game().board());
        // Not restored by undo on its own.
        assert_eq!(game.en_passant_target(), Some(sq("e3")));

        let mut game = GameState::from_pieces(
            &[
                (sq("e1"), Piece::new(Color::White, PieceKind::King)),
                (sq("h1"), Piece::new(Color::White, PieceKind::Rook)),
                (sq("e8"), Piece::new(Color::Black, PieceKind::King)),
            ],
            Color::White,
        )
        .expect("valid position");
        let rook_lift = find(&mut game, "h1", "h2");
        game.make_move(rook_lift);
        game.undo_move();
        let king_step = find(&mut game, "e1", "d1");
        game.make_move(king_step);
        game.undo_move();

        assert_eq!(game.piece_at(sq("e1")), Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(game.piece_at(sq("h1")), Some(Piece::new(Color::White, PieceKind::Rook)));
        let flags = game.castling_flags(Color::White);
        assert!(flags.king_moved && flags.kings_rook_moved);
    }

    #[test]
    fn undo_on_empty_log_is_a_no_op() {
        let mut game = GameState::new_game();
        let key = game.position_key();
        assert!(game.undo_move().is_none());
        assert_eq!(game.position_key(), key);
        assert_eq!(game.repetition_count(), 1);
    }

    #[test]
    fn castling_moves_the_rook_and_undo_puts_it_back() {
        let mut game = GameState::from_pieces(
            &[
                (sq("e1"), Piece::new(Color::White, PieceKind::King)),
                (sq("h1"), Piece::new(Color::White, PieceKind::Rook)),
                (sq("e8"), Piece::new(Color::Black, PieceKind::King)),
            ],
            Color::White,
        )
        .expect("valid position");

        let castle = find(&mut game, "e1", "g1");
        assert!(castle.is_castle);
        game.make_move(castle);
        assert_eq!(game.piece_at(sq("f1")), Some(Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(game.piece_at(sq("h1")), None);
        assert_eq!(game.king_square(Color::White), sq("g1"));
        let flags = game.castling_flags(Color::White);
        assert!(flags.king_moved && flags.kings_rook_moved);

        game.undo_move();
        assert_eq!(game.piece_at(sq("h1")), Some(Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(game.piece_at(sq("f1")), None);
        assert_eq!(game.king_square(Color::White), sq("e1"));
    }

    #[test]
    fn capturing_a_cornered_rook_revokes_its_castling_side() {
        let mut game = GameState::from_pieces(
            &[
                (sq("e1"), Piece::new(Color::White, PieceKind::King)),
                (sq("a1"), Piece::new(Color::White, PieceKind::Rook)),
                (sq("e8"), Piece::new(Color::Black, PieceKind::King)),
                (sq("a8"), Piece::new(Color::Black, PieceKind::Rook)),
            ],
            Color::White,
        )
        .expect("valid position");

        let capture = find(&mut game, "a1", "a8");
        game.make_move(capture);
        assert!(game.castling_flags(Color::Black).queens_rook_moved);
        assert!(game.castling_flags(Color::White).queens_rook_moved);
    }
}
