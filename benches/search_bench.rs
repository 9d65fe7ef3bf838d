use criterion::{black_box, criterion_group, criterion_main, Criterion};

use connect_four_ai::ai::{score, Difficulty, SearchEngine, AI_PLAYER};
use connect_four_ai::game::Board;

fn bench_evaluator(c: &mut Criterion) {
    let profile = Difficulty::Hard.profile();
    let board = Board::from_moves(&[3, 3, 2, 4, 4, 2, 1, 5]).unwrap();
    c.bench_function("evaluate_midgame", |b| {
        b.iter(|| {
            score(
                black_box(&board),
                AI_PLAYER,
                &profile.weights,
                &profile.column_weights,
            )
        })
    });
}

fn bench_fixed_depth(c: &mut Criterion) {
    let board = Board::from_moves(&[3, 3, 2]).unwrap();
    let mut group = c.benchmark_group("fixed_depth");
    for tier in [Difficulty::Medium, Difficulty::Hard] {
        let profile = tier.profile();
        group.bench_function(tier.name(), |b| {
            b.iter(|| {
                let mut engine = SearchEngine::new(&profile, AI_PLAYER);
                engine.search_fixed_depth(black_box(&board), profile.max_depth)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_evaluator, bench_fixed_depth);
criterion_main!(benches);
