//! Engine abstraction layer used by the bot tiers.
//!
//! Defines the common output payload so different move-selection strategies
//! can be chosen at runtime behind a single trait interface.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::GameState;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `None` when the game is already over.
    pub best_move: Option<Move>,
    /// Side-to-move relative score, when the engine computes one.
    pub score: Option<i32>,
    pub nodes: u64,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, _value: &str) -> ChessResult<()> {
        Err(ChessError::UnknownOption(name.to_owned()))
    }

    /// Pick a move for the side to move. The position may be used for
    /// look-ahead but is left exactly as it was found.
    fn choose_move(&mut self, game_state: &mut GameState) -> ChessResult<EngineOutput>;

    fn select_move(&mut self, game_state: &mut GameState) -> ChessResult<Option<Move>> {
        Ok(self.choose_move(game_state)?.best_move)
    }
}

pub(crate) fn parse_option_value<T: std::str::FromStr>(name: &str, value: &str) -> ChessResult<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ChessError::InvalidOptionValue {
            name: name.to_owned(),
            value: value.to_owned(),
        })
}

pub(crate) fn parse_bool_option(name: &str, value: &str) -> ChessResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ChessError::InvalidOptionValue {
            name: name.to_owned(),
            value: value.to_owned(),
        }),
    }
}
