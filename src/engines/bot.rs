//! Computer opponents as a closed set of tiers behind the [`Engine`] trait.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_reflexive::ReflexiveEngine;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::chess_types::GameState;
use crate::search::board_scoring::{BoardScorer, MaterialTableScorer};
use crate::search::minimax::SearchConfig;

pub const SHALLOW_DEPTH: u8 = 3;
pub const DEEP_DEPTH: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ChessError::UnknownDifficulty(s.to_owned())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

pub enum Bot {
    Reflexive(ReflexiveEngine),
    MinimaxShallow(MinimaxEngine),
    MinimaxDeep(MinimaxEngine),
}

impl Bot {
    /// Easy plays reflexively, Medium searches 3 plies, Hard 4 plies. The
    /// scorer defaults to material plus piece-square tables.
    pub fn for_difficulty(difficulty: Difficulty, scorer: Option<Arc<dyn BoardScorer>>) -> Self {
        let scorer = scorer.unwrap_or_else(|| Arc::new(MaterialTableScorer));
        let bot = match difficulty {
            Difficulty::Easy => Bot::Reflexive(ReflexiveEngine::new()),
            Difficulty::Medium => Bot::MinimaxShallow(MinimaxEngine::new(
                SearchConfig::with_depth(SHALLOW_DEPTH),
                scorer,
            )),
            Difficulty::Hard => Bot::MinimaxDeep(MinimaxEngine::new(
                SearchConfig::with_depth(DEEP_DEPTH),
                scorer,
            )),
        };
        info!(%difficulty, bot = bot.name(), "bot created");
        bot
    }

    fn engine(&mut self) -> &mut dyn Engine {
        match self {
            Bot::Reflexive(engine) => engine,
            Bot::MinimaxShallow(engine) | Bot::MinimaxDeep(engine) => engine,
        }
    }
}

impl Engine for Bot {
    fn name(&self) -> &str {
        match self {
            Bot::Reflexive(_) => "Reflexive",
            Bot::MinimaxShallow(_) => "Minimax (shallow)",
            Bot::MinimaxDeep(_) => "Minimax (deep)",
        }
    }

    fn new_game(&mut self) {
        self.engine().new_game();
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        self.engine().set_option(name, value)
    }

    fn choose_move(&mut self, game_state: &mut GameState) -> ChessResult<EngineOutput> {
        self.engine().choose_move(game_state)
    }
}

#[cfg(test)]
mod tests {
    use super::{Bot, Difficulty, DEEP_DEPTH, SHALLOW_DEPTH};
    use crate::chess_errors::ChessError;
    use crate::engines::engine_trait::Engine;
    use crate::game_state::chess_types::*;

    #[test]
    fn difficulty_names_parse_case_insensitively() {
        assert_eq!("Easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" medium ".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(
            "brutal".parse::<Difficulty>(),
            Err(ChessError::UnknownDifficulty("brutal".to_owned()))
        );
    }

    #[test]
    fn difficulties_map_to_tiers() {
        assert!(matches!(
            Bot::for_difficulty(Difficulty::Easy, None),
            Bot::Reflexive(_)
        ));
        match Bot::for_difficulty(Difficulty::Medium, None) {
            Bot::MinimaxShallow(engine) => assert_eq!(engine.config().depth, SHALLOW_DEPTH),
            _ => panic!("medium should be the shallow minimax tier"),
        }
        match Bot::for_difficulty(Difficulty::Hard, None) {
            Bot::MinimaxDeep(engine) => assert_eq!(engine.config().depth, DEEP_DEPTH),
            _ => panic!("hard should be the deep minimax tier"),
        }
    }

    #[test]
    fn bot_options_reach_the_wrapped_engine() {
        let mut bot = Bot::for_difficulty(Difficulty::Medium, None);
        bot.set_option("Depth", "1").expect("depth is a minimax option");
        assert!(bot.set_option("Seed", "1").is_err());

        let mut game = GameState::new_game();
        let mv = bot
            .select_move(&mut game)
            .expect("engine runs")
            .expect("a move exists");
        assert!(game.get_valid_moves().contains(&mv));
        assert!(game.move_log().is_empty());
    }
}
