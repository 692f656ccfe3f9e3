//! Property tests for the selection and scoring invariants.

use proptest::prelude::*;

use mandarin_ten::core::{Grid, MemoryStore, RoundController};
use mandarin_ten::types::{CellPos, Phase, Point, Rect, TARGET_SUM};

const LAYOUT: f32 = 100.0;

fn values() -> impl Strategy<Value = [[u8; 10]; 10]> {
    prop::array::uniform10(prop::array::uniform10(1u8..=9))
}

fn point() -> impl Strategy<Value = Point> {
    (-10.0f32..110.0, -10.0f32..110.0).prop_map(|(x, y)| Point::new(x, y))
}

fn positions(grid: &Grid, rect: Rect) -> Vec<CellPos> {
    let mut out: Vec<CellPos> = grid.cells_within(rect).iter().map(|c| c.pos()).collect();
    out.sort();
    out
}

fn round_on(values: &[[u8; 10]; 10]) -> RoundController {
    let mut round = RoundController::new(MemoryStore::new(), LAYOUT, LAYOUT, 1);
    round.restart_with(Grid::from_values(LAYOUT, LAYOUT, values).unwrap());
    round
}

proptest! {
    #[test]
    fn prop_cells_within_ignores_drag_direction(v in values(), a in point(), b in point()) {
        let grid = Grid::from_values(LAYOUT, LAYOUT, &v).unwrap();
        let forward = positions(&grid, Rect::from_corners(a, b));
        prop_assert_eq!(&forward, &positions(&grid, Rect::from_corners(b, a)));

        // The other diagonal of the same box.
        let anti = Rect::from_corners(Point::new(a.x, b.y), Point::new(b.x, a.y));
        prop_assert_eq!(&forward, &positions(&grid, anti));
    }

    #[test]
    fn prop_release_scores_exactly_when_sum_is_ten(v in values(), a in point(), b in point()) {
        let mut round = round_on(&v);
        let before = round.grid().clone();
        let rect = Rect::from_corners(a, b);

        let inside = before.cells_within(rect);
        let total: u32 = inside.iter().filter(|c| !c.collected).map(|c| c.value as u32).sum();
        let count = inside.iter().filter(|c| !c.collected).count() as u32;

        let result = round.on_drag_released(rect).unwrap();
        if total == TARGET_SUM {
            prop_assert!(result.is_match());
            prop_assert_eq!(round.score(), count);
            prop_assert_eq!(round.grid().remaining(), 100 - count as usize);
        } else {
            prop_assert!(!result.is_match());
            prop_assert_eq!(round.score(), 0);
            prop_assert_eq!(round.grid(), &before);
        }
    }

    #[test]
    fn prop_collected_cells_stay_collected(
        v in values(),
        drags in prop::collection::vec((point(), point()), 1..12),
    ) {
        let mut round = round_on(&v);
        for (a, b) in drags {
            let before = round.grid().clone();
            round.on_drag_released(Rect::from_corners(a, b));

            for (old, new) in before.cells().iter().zip(round.grid().cells()) {
                prop_assert!(!old.collected || new.collected);
            }
            // One point per cleared cell, so score always mirrors the board.
            prop_assert_eq!(round.score() as usize, 100 - round.grid().remaining());
        }
    }

    #[test]
    fn prop_best_score_never_decreases(
        seed in any::<u32>(),
        ops in prop::collection::vec((0u8..4, point(), point()), 1..40),
    ) {
        let mut round = RoundController::new(MemoryStore::new(), LAYOUT, LAYOUT, seed);
        round.start();
        let mut best = round.best_score();

        for (op, a, b) in ops {
            match op {
                0 => round.restart(),
                1 => {
                    round.advance(30_000);
                }
                _ => {
                    round.on_drag_released(Rect::from_corners(a, b));
                }
            }
            prop_assert!(round.best_score() >= best);
            prop_assert!(round.best_score() >= round.score());
            best = round.best_score();
            if round.phase() == Phase::Ended {
                round.start();
            }
        }
    }

    #[test]
    fn prop_click_without_drag_never_matches(v in values(), p in point()) {
        let mut round = round_on(&v);
        round.pointer_down(p);
        let result = round.pointer_up().unwrap();
        prop_assert!(!result.is_match());
        prop_assert_eq!(round.score(), 0);
    }
}
