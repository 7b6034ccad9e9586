use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use plum_tiers::game_state::chess_types::GameState;
use plum_tiers::search::board_scoring::MaterialTableScorer;
use plum_tiers::search::minimax::{search, SearchConfig};

fn italian_game() -> GameState {
    let mut game = GameState::new_game();
    for mv in ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5"] {
        game.play_coordinate(mv).expect("benchmark line should be legal");
    }
    game
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    for (name, pruning) in [("alpha_beta", true), ("plain", false)] {
        for depth in [2u8, 3] {
            let config = SearchConfig {
                depth,
                pruning,
                ..SearchConfig::default()
            };
            let mut game = italian_game();
            let reference = search(&mut game, &MaterialTableScorer, &config);
            assert!(reference.best_move.is_some(), "search should find a move");

            group.bench_with_input(
                BenchmarkId::new(name, depth),
                &config,
                |b, config| {
                    b.iter(|| {
                        let result = search(black_box(&mut game), &MaterialTableScorer, config);
                        assert_eq!(result.score, reference.score);
                        result.nodes
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
