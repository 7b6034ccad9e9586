//! Fixed-depth negamax with optional alpha-beta pruning.
//!
//! Every speculative move is applied to the caller's position through
//! [`GameState::simulate`], so the position is back in its original state
//! (forward-only flags included) when `search` returns. Scores are relative
//! to the side to move at the root.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{BoardScorer, MATE_SCORE};
use crate::search::move_ordering::{order_moves, MoveOrdering};

const INFINITY: i32 = MATE_SCORE + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u8,
    pub pruning: bool,
    pub ordering: MoveOrdering,
    /// Stop after visiting this many nodes.
    pub node_budget: Option<u64>,
    pub time_budget: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            pruning: true,
            ordering: MoveOrdering::MvvLva,
            node_budget: None,
            time_budget: None,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    /// `None` only when the root has no legal moves.
    pub best_move: Option<Move>,
    pub score: i32,
    pub nodes: u64,
    /// False when a budget cut the search short; `best_move` is then the
    /// best root move among those fully searched.
    pub completed: bool,
}

/// Pick the best move for the side to move.
pub fn search<S: BoardScorer + ?Sized>(
    game_state: &mut GameState,
    scorer: &S,
    config: &SearchConfig,
) -> SearchResult {
    let mut searcher = Searcher::new(scorer, config);

    let mut moves = generate_legal_moves(game_state);
    if moves.is_empty() {
        return SearchResult {
            best_move: None,
            score: terminal_score(game_state, 0),
            nodes: 1,
            completed: true,
        };
    }
    order_moves(&mut moves, config.ordering);

    let depth = config.depth.max(1);
    let mut alpha = -INFINITY;
    let beta = INFINITY;
    let mut best_move = None;
    let mut best_score = -INFINITY;

    for mv in moves {
        if best_move.is_some() && searcher.out_of_budget() {
            break;
        }

        let mv = mv.with_promotion(PieceKind::Queen);
        let score = {
            let mut child = game_state.simulate(mv);
            -searcher.negamax(&mut child, depth - 1, -beta, -alpha, 1)
        };

        if searcher.aborted {
            // A cut-short subtree is only trusted when nothing else is known.
            if best_move.is_none() {
                best_move = Some(mv);
                best_score = score;
            }
            break;
        }

        trace!(%mv, score, "root move searched");
        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
        if config.pruning {
            alpha = alpha.max(best_score);
        }
    }

    debug!(
        depth,
        nodes = searcher.nodes,
        score = best_score,
        completed = !searcher.aborted,
        elapsed_ms = searcher.started.elapsed().as_millis() as u64,
        "search finished"
    );

    SearchResult {
        best_move,
        score: best_score,
        nodes: searcher.nodes,
        completed: !searcher.aborted,
    }
}

struct Searcher<'a, S: ?Sized> {
    scorer: &'a S,
    config: &'a SearchConfig,
    nodes: u64,
    started: Instant,
    aborted: bool,
}

impl<'a, S: BoardScorer + ?Sized> Searcher<'a, S> {
    fn new(scorer: &'a S, config: &'a SearchConfig) -> Self {
        Self {
            scorer,
            config,
            nodes: 0,
            started: Instant::now(),
            aborted: false,
        }
    }

    fn out_of_budget(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        let nodes_spent = self.config.node_budget.is_some_and(|limit| self.nodes >= limit);
        let time_spent = self
            .config
            .time_budget
            .is_some_and(|limit| self.started.elapsed() >= limit);
        self.aborted = nodes_spent || time_spent;
        self.aborted
    }

    fn negamax(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: i32,
    ) -> i32 {
        self.nodes += 1;
        if self.out_of_budget() {
            return 0;
        }

        if game_state.is_threefold_repetition() {
            return 0;
        }
        if depth == 0 {
            return self.evaluate(game_state);
        }

        let mut moves = generate_legal_moves(game_state);
        if moves.is_empty() {
            return terminal_score(game_state, ply);
        }
        order_moves(&mut moves, self.config.ordering);

        let mut best = -INFINITY;
        for mv in moves {
            let score = {
                let mut child = game_state.simulate(mv.with_promotion(PieceKind::Queen));
                -self.negamax(&mut child, depth - 1, -beta, -alpha, ply + 1)
            };
            if self.aborted {
                return 0;
            }

            best = best.max(score);
            if self.config.pruning {
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
        }
        best
    }

    /// Scorer output turned to the side to move's point of view.
    fn evaluate(&self, game_state: &GameState) -> i32 {
        let white_view = self.scorer.score(&game_state.snapshot());
        match game_state.side_to_move() {
            Color::White => white_view,
            Color::Black => -white_view,
        }
    }
}

/// Score of a position without legal moves: mated (sooner is worse) or level.
fn terminal_score(game_state: &GameState, ply: i32) -> i32 {
    if is_in_check(game_state, game_state.side_to_move()) {
        -(MATE_SCORE - ply)
    } else {
        0
    }
}
