use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweeper_core::{Board, GameConfig, MineLayout};

/// Worst case for the reveal worklist: one mine in a corner, so a single
/// reveal floods almost the entire board.
fn flood_fill_full_board(c: &mut Criterion) {
    let layout = MineLayout::from_mine_coords((200, 200), &[(0, 0)]).unwrap();

    c.bench_function("flood_fill_200x200", |b| {
        b.iter(|| {
            let mut board = Board::with_layout(layout.clone());
            board.reveal(black_box((100, 100))).unwrap()
        })
    });
}

fn random_placement_expert(c: &mut Criterion) {
    let config = GameConfig::EXPERT;

    c.bench_function("first_reveal_expert", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            let mut board = Board::new(config, seed);
            board.reveal(black_box((8, 15))).unwrap()
        })
    });
}

criterion_group!(benches, flood_fill_full_board, random_placement_expert);
criterion_main!(benches);
