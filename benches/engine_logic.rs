use criterion::{black_box, criterion_group, criterion_main, Criterion};
use veggie_saga::core::{compact, find_matches, has_any_legal_move, Grid, SessionRng};
use veggie_saga::engine::{GameConfig, GameSession};
use veggie_saga::types::{Coord, Kind};

fn quiet_board() -> Grid {
    let rows: Vec<Vec<Option<Kind>>> = (0..8)
        .map(|y| (0..8).map(|x| Some(Kind::new(((x + 2 * y) % 5) as u8))).collect())
        .collect();
    Grid::from_rows(&rows).unwrap()
}

fn bench_find_matches(c: &mut Criterion) {
    let grid = quiet_board();

    c.bench_function("find_matches_8x8", |b| {
        b.iter(|| find_matches(black_box(&grid)))
    });
}

fn bench_legal_move_scan(c: &mut Criterion) {
    // Stuck board: the scan has to visit every cell.
    let grid = quiet_board();

    c.bench_function("has_any_legal_move_stuck_8x8", |b| {
        b.iter(|| has_any_legal_move(black_box(&grid)))
    });
}

fn bench_compact(c: &mut Criterion) {
    c.bench_function("compact_half_empty", |b| {
        b.iter(|| {
            let mut grid = quiet_board();
            for y in (0..8).step_by(2) {
                for x in 0..8 {
                    let _ = grid.set(x, y, None);
                }
            }
            compact(&mut grid)
        })
    });
}

fn bench_new_game(c: &mut Criterion) {
    let mut seed = 0u64;

    c.bench_function("new_game", |b| {
        b.iter(|| {
            seed += 1;
            GameSession::new(GameConfig::default().with_seed(seed)).unwrap()
        })
    });
}

fn bench_swap(c: &mut Criterion) {
    let session = GameSession::new(GameConfig::default().with_seed(12345)).unwrap();
    let grid = session.grid();
    let swap = (0..8)
        .flat_map(|x| (0..8).map(move |y| (Coord::new(x, y), Coord::new(x + 1, y))))
        .find(|&(a, b)| {
            grid.contains(b) && veggie_saga::core::is_legal_swap(grid, a, b).unwrap_or(false)
        });

    c.bench_function("request_swap", |b| {
        b.iter(|| {
            let mut game = session.clone();
            if let Some((from, to)) = swap {
                let _ = game.request_swap(from, to);
            }
            game
        })
    });
}

fn bench_rng_fill(c: &mut Criterion) {
    let mut rng = SessionRng::new(12345);

    c.bench_function("refill_empty_board", |b| {
        b.iter(|| {
            let mut grid = Grid::new(8, 8).unwrap();
            veggie_saga::core::generator::fill(&mut grid, 7, &mut rng);
            grid
        })
    });
}

criterion_group!(
    benches,
    bench_find_matches,
    bench_legal_move_scan,
    bench_compact,
    bench_new_game,
    bench_swap,
    bench_rng_fill
);
criterion_main!(benches);
