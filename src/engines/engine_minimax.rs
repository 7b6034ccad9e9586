//! Minimax tiers: fixed-depth alpha-beta search over an injected scorer.

use std::sync::Arc;
use std::time::Duration;

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::{parse_bool_option, parse_option_value, Engine, EngineOutput};
use crate::game_state::chess_types::GameState;
use crate::search::board_scoring::{BoardScorer, MaterialTableScorer};
use crate::search::minimax::{search, SearchConfig};
use crate::search::move_ordering::MoveOrdering;

pub struct MinimaxEngine {
    config: SearchConfig,
    scorer: Arc<dyn BoardScorer>,
}

impl MinimaxEngine {
    pub fn new(config: SearchConfig, scorer: Arc<dyn BoardScorer>) -> Self {
        Self { config, scorer }
    }

    /// Material-and-tables evaluation at the given depth.
    pub fn with_depth(depth: u8) -> Self {
        Self::new(SearchConfig::with_depth(depth), Arc::new(MaterialTableScorer))
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default(), Arc::new(MaterialTableScorer))
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        if name.eq_ignore_ascii_case("Depth") {
            let depth: u8 = parse_option_value(name, value)?;
            if depth == 0 {
                return Err(ChessError::InvalidOptionValue {
                    name: name.to_owned(),
                    value: value.to_owned(),
                });
            }
            self.config.depth = depth;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Pruning") {
            self.config.pruning = parse_bool_option(name, value)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Ordering") {
            self.config.ordering = match value.trim().to_ascii_lowercase().as_str() {
                "mvvlva" | "mvv-lva" | "captures" => MoveOrdering::MvvLva,
                "none" | "unordered" => MoveOrdering::Unordered,
                _ => {
                    return Err(ChessError::InvalidOptionValue {
                        name: name.to_owned(),
                        value: value.to_owned(),
                    })
                }
            };
            return Ok(());
        }
        if name.eq_ignore_ascii_case("NodeBudget") {
            let nodes: u64 = parse_option_value(name, value)?;
            self.config.node_budget = (nodes > 0).then_some(nodes);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("MoveTimeMs") {
            let millis: u64 = parse_option_value(name, value)?;
            self.config.time_budget = (millis > 0).then(|| Duration::from_millis(millis));
            return Ok(());
        }
        Err(ChessError::UnknownOption(name.to_owned()))
    }

    fn choose_move(&mut self, game_state: &mut GameState) -> ChessResult<EngineOutput> {
        let result = search(game_state, &*self.scorer, &self.config);

        let mut out = EngineOutput {
            best_move: result.best_move,
            score: Some(result.score),
            nodes: result.nodes,
            info_lines: Vec::new(),
        };
        out.info_lines.push(format!(
            "info depth {} score cp {} nodes {}",
            self.config.depth, result.score, result.nodes
        ));
        if !result.completed {
            out.info_lines
                .push("info string minimax_engine budget_exhausted".to_owned());
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::MinimaxEngine;
    use crate::chess_errors::ChessError;
    use crate::engines::engine_trait::Engine;
    use crate::game_state::chess_types::*;
    use crate::search::board_scoring::{BoardSnapshot, OracleScorer};
    use crate::search::minimax::SearchConfig;
    use crate::search::move_ordering::MoveOrdering;

    #[test]
    fn options_update_the_search_config() {
        let mut engine = MinimaxEngine::default();
        engine.set_option("depth", "4").expect("valid depth");
        engine.set_option("Pruning", "false").expect("valid flag");
        engine.set_option("Ordering", "none").expect("valid ordering");
        engine.set_option("NodeBudget", "5000").expect("valid budget");
        engine.set_option("MoveTimeMs", "250").expect("valid time");

        let config = engine.config();
        assert_eq!(config.depth, 4);
        assert!(!config.pruning);
        assert_eq!(config.ordering, MoveOrdering::Unordered);
        assert_eq!(config.node_budget, Some(5000));
        assert_eq!(config.time_budget, Some(Duration::from_millis(250)));

        assert!(engine.set_option("Depth", "0").is_err());
        assert_eq!(
            engine.set_option("Hash", "64"),
            Err(ChessError::UnknownOption("Hash".to_owned()))
        );
    }

    #[test]
    fn oracle_scored_engine_picks_a_legal_move_and_reports_score() {
        // Counts White's material plainly, ignoring Black entirely.
        let oracle = |snapshot: &BoardSnapshot| {
            snapshot
                .pieces()
                .filter(|(_, piece)| piece.color == Color::White)
                .count() as f32
                / 16.0
        };
        let mut engine = MinimaxEngine::new(
            SearchConfig::with_depth(2),
            Arc::new(OracleScorer::new(oracle)),
        );
        let mut game = GameState::new_game();
        let out = engine.choose_move(&mut game).expect("engine runs");

        let best = out.best_move.expect("a move exists");
        assert!(game.get_valid_moves().contains(&best));
        assert_eq!(out.score, Some(1000));
        assert!(out.info_lines[0].starts_with("info depth 2"));
    }
}
