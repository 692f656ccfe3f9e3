//! Match rule - sum-to-ten evaluation
//!
//! Rules:
//! - Already-collected cells are ignored before summing; they can neither help
//!   nor spoil a selection.
//! - A selection matches iff the remaining values sum to exactly `TARGET_SUM`
//!   and at least one cell remains.
//! - Each cleared cell is worth one point, whatever digits made up the sum.
//! - A non-matching selection is a normal outcome, not an error.

use arrayvec::ArrayVec;

use crate::grid::Cell;
use crate::types::{CellPos, MAX_MATCH_CELLS, TARGET_SUM};

/// Cells cleared by one match
pub type MatchedCells = ArrayVec<CellPos, MAX_MATCH_CELLS>;

/// Outcome of evaluating one selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Match {
        cells: MatchedCells,
        score_delta: u32,
    },
    NoMatch {
        /// Sum of the uncollected values that were considered (may stop early
        /// once it exceeds the target)
        total: u32,
    },
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Match { .. })
    }

    pub fn score_delta(&self) -> u32 {
        match self {
            MatchResult::Match { score_delta, .. } => *score_delta,
            MatchResult::NoMatch { .. } => 0,
        }
    }
}

/// Points awarded for clearing `cleared` cells
pub fn score_for_cells(cleared: usize) -> u32 {
    cleared as u32
}

/// Evaluate a candidate cell set against the sum-to-ten rule
pub fn evaluate<'a, I>(cells: I) -> MatchResult
where
    I: IntoIterator<Item = &'a Cell>,
{
    let mut total = 0u32;
    let mut remaining = MatchedCells::new();

    for cell in cells.into_iter().filter(|c| !c.collected) {
        total += cell.value as u32;
        if total > TARGET_SUM {
            return MatchResult::NoMatch { total };
        }
        // Values are at least 1, so a set within the target never overflows
        // MAX_MATCH_CELLS; a zero value would be rejected here instead.
        if remaining.try_push(cell.pos()).is_err() {
            return MatchResult::NoMatch { total };
        }
    }

    if total == TARGET_SUM && !remaining.is_empty() {
        let score_delta = score_for_cells(remaining.len());
        MatchResult::Match {
            cells: remaining,
            score_delta,
        }
    } else {
        MatchResult::NoMatch { total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: u8, col: u8, value: u8) -> Cell {
        Cell {
            row,
            col,
            x: col as f32,
            y: row as f32,
            value,
            collected: false,
            size: 1.0,
        }
    }

    #[test]
    fn test_pair_summing_to_ten_matches() {
        let cells = [cell(0, 0, 4), cell(0, 1, 6)];
        match evaluate(cells.iter()) {
            MatchResult::Match { cells, score_delta } => {
                assert_eq!(score_delta, 2);
                assert_eq!(cells.as_slice(), &[CellPos::new(0, 0), CellPos::new(0, 1)]);
            }
            other => panic!("expected match, got {:?}", other),
        }
    }

    #[test]
    fn test_score_is_per_cell_not_per_value() {
        let four = [cell(0, 0, 1), cell(0, 1, 2), cell(0, 2, 3), cell(0, 3, 4)];
        assert_eq!(evaluate(four.iter()).score_delta(), 4);

        let two = [cell(0, 0, 2), cell(0, 1, 8)];
        assert_eq!(evaluate(two.iter()).score_delta(), 2);
    }

    #[test]
    fn test_wrong_sum_is_no_match() {
        let cells = [cell(0, 0, 4)];
        assert_eq!(evaluate(cells.iter()), MatchResult::NoMatch { total: 4 });

        let cells = [cell(0, 0, 9), cell(0, 1, 9)];
        assert!(!evaluate(cells.iter()).is_match());
    }

    #[test]
    fn test_empty_set_is_no_match() {
        let none: [Cell; 0] = [];
        assert_eq!(evaluate(none.iter()), MatchResult::NoMatch { total: 0 });
    }

    #[test]
    fn test_collected_cells_are_ignored() {
        let mut cleared = cell(0, 1, 5);
        cleared.collected = true;
        let cells = [cell(0, 0, 3), cleared, cell(0, 2, 7)];

        match evaluate(cells.iter()) {
            MatchResult::Match { cells, score_delta } => {
                assert_eq!(score_delta, 2);
                assert!(!cells.contains(&CellPos::new(0, 1)));
            }
            other => panic!("expected match, got {:?}", other),
        }
    }

    #[test]
    fn test_only_collected_cells_never_match() {
        let mut a = cell(0, 0, 4);
        let mut b = cell(0, 1, 6);
        a.collected = true;
        b.collected = true;
        assert!(!evaluate([a, b].iter()).is_match());
    }

    #[test]
    fn test_ten_ones_is_the_largest_match() {
        let cells: Vec<Cell> = (0..10).map(|c| cell(0, c, 1)).collect();
        assert_eq!(evaluate(cells.iter()).score_delta(), 10);

        let cells: Vec<Cell> = (0..11).map(|c| cell(0, c, 1)).collect();
        assert!(!evaluate(cells.iter()).is_match());
    }
}
