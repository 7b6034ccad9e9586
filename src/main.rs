use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use plum_tiers::chess_errors::ChessResult;
use plum_tiers::engines::bot::{Bot, Difficulty};
use plum_tiers::engines::engine_trait::Engine;
use plum_tiers::game_state::chess_types::{GameState, PieceKind};
use plum_tiers::utils::standard_algebraic::last_move_notation;

/// Self-play between two computer opponents.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Tier playing White: easy, medium or hard.
    #[arg(long, default_value_t = Difficulty::Medium)]
    white: Difficulty,

    /// Tier playing Black: easy, medium or hard.
    #[arg(long, default_value_t = Difficulty::Easy)]
    black: Difficulty,

    /// Stop after this many plies if the game has not ended.
    #[arg(long, default_value_t = 200)]
    max_plies: usize,

    /// Seed for the reflexive tier, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ChessResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut bots = [
        Bot::for_difficulty(cli.white, None),
        Bot::for_difficulty(cli.black, None),
    ];
    if let Some(seed) = cli.seed {
        for (offset, bot) in bots.iter_mut().enumerate() {
            if matches!(bot, Bot::Reflexive(_)) {
                bot.set_option("Seed", &(seed + offset as u64).to_string())?;
            }
        }
    }

    let mut game = GameState::new_game();
    let mut transcript = Vec::new();

    while game.move_log().len() < cli.max_plies {
        let bot = &mut bots[game.side_to_move().index()];
        let Some(mv) = bot.select_move(&mut game)? else {
            break;
        };

        game.play_move(mv.start, mv.end)?;
        if game.pending_promotion().is_some() {
            game.promote(mv.promotion_choice.unwrap_or(PieceKind::Queen))?;
        }
        if let Some(note) = last_move_notation(&mut game) {
            transcript.push(note);
        }
        if game.outcome().is_some() {
            break;
        }
    }

    println!("{game}");
    for (number, pair) in transcript.chunks(2).enumerate() {
        println!("{}. {}", number + 1, pair.join(" "));
    }

    match game.outcome() {
        Some(outcome) => info!(?outcome, plies = game.move_log().len(), "game finished"),
        None => info!(plies = game.move_log().len(), "ply limit reached"),
    }
    Ok(())
}
