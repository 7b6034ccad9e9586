//! Tier-1 reflexive engine.
//!
//! No look-ahead beyond one ply: play a mate in one when there is one,
//! otherwise usually grab the best safe winning capture, otherwise often a
//! safe central move, otherwise anything legal. The RNG is seedable so games
//! can be reproduced.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::{parse_option_value, Engine, EngineOutput};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{is_in_check, is_square_attacked};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::chess_move::Move;

pub const DEFAULT_CAPTURE_PROBABILITY: f64 = 0.75;
pub const DEFAULT_CENTRAL_PROBABILITY: f64 = 0.6;

/// Rows and columns of the 4x4 centre.
const CENTRE: std::ops::RangeInclusive<u8> = 2..=5;

pub struct ReflexiveEngine {
    rng: StdRng,
    capture_probability: f64,
    central_probability: f64,
}

impl ReflexiveEngine {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            capture_probability: DEFAULT_CAPTURE_PROBABILITY,
            central_probability: DEFAULT_CENTRAL_PROBABILITY,
        }
    }

    /// Exchange values; the king is never traded so it counts as nothing.
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    fn roll(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability)
    }
}

impl Default for ReflexiveEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn delivers_mate(game_state: &mut GameState, mv: Move) -> bool {
    let mut child = game_state.simulate(mv);
    let defender = child.side_to_move();
    is_in_check(&child, defender) && generate_legal_moves(&mut child).is_empty()
}

/// Whether the moved piece can be taken on its destination square.
fn lands_en_prise(game_state: &mut GameState, mv: Move) -> bool {
    let child = game_state.simulate(mv);
    is_square_attacked(&child, mv.end, mv.piece_moved.color.opposite())
}

fn parse_probability(name: &str, value: &str) -> ChessResult<f64> {
    let parsed: f64 = parse_option_value(name, value)?;
    if (0.0..=1.0).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(ChessError::InvalidOptionValue {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }
}

impl Engine for ReflexiveEngine {
    fn name(&self) -> &str {
        "Reflexive"
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        if name.eq_ignore_ascii_case("CaptureProbability") {
            self.capture_probability = parse_probability(name, value)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("CentralProbability") {
            self.central_probability = parse_probability(name, value)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Seed") {
            let seed: u64 = parse_option_value(name, value)?;
            self.rng = StdRng::seed_from_u64(seed);
            return Ok(());
        }
        Err(ChessError::UnknownOption(name.to_owned()))
    }

    fn choose_move(&mut self, game_state: &mut GameState) -> ChessResult<EngineOutput> {
        let legal_moves: Vec<Move> = generate_legal_moves(game_state)
            .into_iter()
            .map(|mv| mv.with_promotion(PieceKind::Queen))
            .collect();

        let mut out = EngineOutput {
            nodes: legal_moves.len() as u64,
            ..EngineOutput::default()
        };
        out.info_lines.push(format!(
            "info string reflexive_engine legal_moves {}",
            legal_moves.len()
        ));
        if legal_moves.is_empty() {
            return Ok(out);
        }

        if let Some(&mate) = legal_moves
            .iter()
            .find(|&&mv| delivers_mate(game_state, mv))
        {
            trace!(%mate, "mate in one");
            out.info_lines
                .push("info string reflexive_engine mate_in_one".to_owned());
            out.best_move = Some(mate);
            return Ok(out);
        }

        let mut good_captures: Vec<(Move, i32)> = Vec::new();
        for &mv in &legal_moves {
            let Some(captured) = mv.piece_captured else {
                continue;
            };
            let gain = Self::piece_value(captured.kind);
            if gain >= Self::piece_value(mv.piece_moved.kind) && !lands_en_prise(game_state, mv) {
                good_captures.push((mv, gain));
            }
        }

        if !good_captures.is_empty() && self.roll(self.capture_probability) {
            let best_gain = good_captures.iter().map(|&(_, gain)| gain).max().unwrap_or(0);
            let best: Vec<Move> = good_captures
                .iter()
                .filter(|&&(_, gain)| gain == best_gain)
                .map(|&(mv, _)| mv)
                .collect();
            if let Some(&picked) = best.choose(&mut self.rng) {
                out.info_lines.push(format!(
                    "info string reflexive_engine capture_gain {best_gain}"
                ));
                out.best_move = Some(picked);
                return Ok(out);
            }
        }

        let central: Vec<Move> = legal_moves
            .iter()
            .copied()
            .filter(|mv| CENTRE.contains(&mv.end.row) && CENTRE.contains(&mv.end.col))
            .filter(|&mv| !lands_en_prise(game_state, mv))
            .collect();

        if !central.is_empty() && self.roll(self.central_probability) {
            if let Some(&picked) = central.choose(&mut self.rng) {
                out.info_lines
                    .push("info string reflexive_engine safe_central".to_owned());
                out.best_move = Some(picked);
                return Ok(out);
            }
        }

        out.best_move = legal_moves.choose(&mut self.rng).copied();
        out.info_lines
            .push("info string reflexive_engine random".to_owned());
        Ok(out)
    }
}
