//! Move validation tests - adjacency, legality, and the stuck-board oracle

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use veggie_saga::core::moves::ONE_OFF_PATTERNS;
use veggie_saga::core::{
    find_matches, has_any_legal_move, has_match, is_adjacent, is_legal_swap, EngineError, Grid,
};
use veggie_saga::types::{Coord, Kind};

fn board(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Grid {
    let rows: Vec<Vec<Option<Kind>>> = (0..height)
        .map(|y| (0..width).map(|x| Some(Kind::new(f(x, y)))).collect())
        .collect();
    Grid::from_rows(&rows).unwrap()
}

/// Try every adjacent swap.
fn brute_force_has_move(grid: &Grid) -> bool {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    for x in 0..w {
        for y in 0..h {
            for (dx, dy) in [(1, 0), (0, 1)] {
                if x + dx >= w || y + dy >= h {
                    continue;
                }
                let mut trial = grid.clone();
                trial
                    .swap(Coord::new(x, y), Coord::new(x + dx, y + dy))
                    .unwrap();
                if has_match(&trial) {
                    return true;
                }
            }
        }
    }
    false
}

#[test]
fn test_three_kind_stripes_are_stuck() {
    for size in [3, 4, 6, 8] {
        let grid = board(size, size, |x, y| ((x + 2 * y) % 3) as u8);
        assert!(find_matches(&grid).is_empty());
        assert!(!has_any_legal_move(&grid), "size {}", size);
        assert!(!brute_force_has_move(&grid));
    }
}

#[test]
fn test_every_pattern_is_detected_in_both_orientations() {
    for (i, pattern) in ONE_OFF_PATTERNS.iter().enumerate() {
        for transposed in [false, true] {
            let mut grid = board(6, 6, |x, y| ((x + 2 * y) % 5) as u8);
            assert!(!has_any_legal_move(&grid));

            for &(dx, dy) in pattern {
                let (dx, dy) = if transposed { (dy, dx) } else { (dx, dy) };
                grid.set(1 + dx, 1 + dy, Some(Kind::new(5))).unwrap();
            }

            assert!(find_matches(&grid).is_empty());
            assert!(
                has_any_legal_move(&grid),
                "pattern {} transposed={}",
                i,
                transposed
            );
            assert!(brute_force_has_move(&grid));
        }
    }
}

#[test]
fn test_oracle_agrees_with_brute_force() {
    let mut checked = 0;
    for seed in 0..400 {
        let mut rng = StdRng::seed_from_u64(seed);
        let width = rng.random_range(3..=7);
        let height = rng.random_range(3..=7);
        let grid = board(width, height, |_, _| rng.random_range(0..4));
        if has_match(&grid) {
            continue;
        }
        checked += 1;
        assert_eq!(
            has_any_legal_move(&grid),
            brute_force_has_move(&grid),
            "seed {}\n{}",
            seed,
            grid
        );
    }
    assert!(checked > 0);
}

#[test]
fn test_distance_two_is_not_adjacent() {
    assert_eq!(is_adjacent(Coord::new(0, 0), Coord::new(2, 0)), None);

    let grid = board(4, 4, |x, y| ((x + 2 * y) % 5) as u8);
    let err = is_legal_swap(&grid, Coord::new(0, 0), Coord::new(2, 0)).unwrap_err();
    assert_eq!(
        err,
        EngineError::IllegalSwap {
            a: Coord::new(0, 0),
            b: Coord::new(2, 0)
        }
    );
}

#[test]
fn test_extreme_coordinates_are_not_adjacent() {
    let (max, min) = (Coord::new(i32::MAX, 0), Coord::new(i32::MIN, 0));
    assert_eq!(is_adjacent(max, min), None);
    assert_eq!(is_adjacent(min, max), None);
    assert_eq!(
        is_adjacent(Coord::new(0, i32::MIN), Coord::new(0, i32::MAX)),
        None
    );
    assert_eq!(
        is_adjacent(Coord::new(i32::MAX, i32::MAX), Coord::new(i32::MIN, i32::MIN)),
        None
    );
    // Real neighbors at the edge of the coordinate range still count.
    assert!(is_adjacent(Coord::new(i32::MAX - 1, 0), max).is_some());
}

#[test]
fn test_is_legal_swap_does_not_mutate() {
    // Swapping (0,1) up into (0,0) completes the top row.
    let grid = Grid::from_ascii(&["211", "103", "342"]).unwrap();
    let before = grid.clone();

    assert!(is_legal_swap(&grid, Coord::new(0, 0), Coord::new(0, 1)).unwrap());
    assert!(!is_legal_swap(&grid, Coord::new(2, 1), Coord::new(2, 2)).unwrap());
    assert_eq!(grid, before);
}

#[test]
fn test_is_legal_swap_rejects_off_board() {
    let grid = board(3, 3, |x, y| ((x + 2 * y) % 5) as u8);
    assert!(matches!(
        is_legal_swap(&grid, Coord::new(2, 2), Coord::new(3, 2)),
        Err(EngineError::OutOfBounds { x: 3, y: 2, .. })
    ));
}
