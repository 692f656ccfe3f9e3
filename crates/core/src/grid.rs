//! Grid module - the 10x10 field of numbered cells
//!
//! The playing field is partitioned into `GRID_ROWS x GRID_COLS` equal tiles.
//! Each cell sits at the centre of its tile, and hit-testing compares that centre
//! against a selection rectangle, so the drawn glyph size never matters.
//! Storage is a flat row-major array; queries return stack-only collections.

use arrayvec::ArrayVec;

use crate::error::InvalidState;
use crate::rng::SimpleRng;
use crate::types::{
    CellPos, Point, Rect, GRID_COLS, GRID_ROWS, GRID_SIZE, MAX_CELL_VALUE, MIN_CELL_VALUE,
};

/// Fraction of the smaller tile side used as the drawn radius
const CELL_SIZE_RATIO: f32 = 0.4;

/// One numbered cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
    /// Tile centre, in layout units
    pub x: f32,
    pub y: f32,
    pub value: u8,
    pub collected: bool,
    /// Cosmetic radius for renderers; not used for hit-testing
    pub size: f32,
}

impl Cell {
    pub fn pos(&self) -> CellPos {
        CellPos::new(self.row, self.col)
    }
}

/// Result of a rectangle query (at most every cell on the grid)
pub type CellSet<'a> = ArrayVec<&'a Cell, GRID_SIZE>;

/// The grid of cells for one round
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; GRID_SIZE],
    width: f32,
    height: f32,
}

impl Grid {
    /// Generate a fresh grid over a `width x height` layout area.
    ///
    /// Values are drawn independently; the grid is not guaranteed to contain any
    /// rectangle that sums to the target.
    pub fn generate(width: f32, height: f32, rng: &mut SimpleRng) -> Self {
        Self::layout(width, height, |_| rng.next_digit())
    }

    /// Build a grid with explicit values, `values[row][col]`
    pub fn from_values(
        width: f32,
        height: f32,
        values: &[[u8; GRID_COLS as usize]; GRID_ROWS as usize],
    ) -> Result<Self, InvalidState> {
        for (row, line) in values.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if !(MIN_CELL_VALUE..=MAX_CELL_VALUE).contains(&value) {
                    return Err(InvalidState::ValueOutOfRange {
                        pos: CellPos::new(row as u8, col as u8),
                        value,
                    });
                }
            }
        }

        Ok(Self::layout(width, height, |pos| {
            values[pos.row as usize][pos.col as usize]
        }))
    }

    fn layout(width: f32, height: f32, mut value_at: impl FnMut(CellPos) -> u8) -> Self {
        let tile_w = width / GRID_COLS as f32;
        let tile_h = height / GRID_ROWS as f32;
        let size = tile_w.min(tile_h) * CELL_SIZE_RATIO;

        // Row-major fill keeps the RNG draw order stable for a given seed.
        let mut cells = [Cell {
            row: 0,
            col: 0,
            x: 0.0,
            y: 0.0,
            value: MIN_CELL_VALUE,
            collected: false,
            size,
        }; GRID_SIZE];

        for (index, cell) in cells.iter_mut().enumerate() {
            let Some(pos) = CellPos::from_index(index) else {
                continue;
            };
            cell.row = pos.row;
            cell.col = pos.col;
            cell.x = pos.col as f32 * tile_w + tile_w / 2.0;
            cell.y = pos.row as f32 * tile_h + tile_h / 2.0;
            cell.value = value_at(pos);
        }

        Self {
            cells,
            width,
            height,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Size of one tile as (width, height)
    pub fn tile_size(&self) -> (f32, f32) {
        (
            self.width / GRID_COLS as f32,
            self.height / GRID_ROWS as f32,
        )
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, pos: CellPos) -> Option<&Cell> {
        pos.index().map(|i| &self.cells[i])
    }

    /// Every cell (collected or not) whose tile centre lies inside `rect`.
    ///
    /// Bounds are inclusive. Pure query.
    pub fn cells_within(&self, rect: Rect) -> CellSet<'_> {
        let mut out = CellSet::new();
        for cell in self.cells.iter() {
            if rect.contains(Point::new(cell.x, cell.y)) {
                out.push(cell);
            }
        }
        out
    }

    /// Mark cells as collected.
    ///
    /// All positions are validated before anything changes, so on error the grid
    /// is untouched.
    pub fn mark_collected(&mut self, cells: &[CellPos]) -> Result<(), InvalidState> {
        let mut seen = [false; GRID_SIZE];
        for &pos in cells {
            let index = pos.index().ok_or(InvalidState::OutOfGrid(pos))?;
            if seen[index] {
                return Err(InvalidState::DuplicateCell(pos));
            }
            if self.cells[index].collected {
                return Err(InvalidState::AlreadyCollected(pos));
            }
            seen[index] = true;
        }

        for (index, marked) in seen.iter().enumerate() {
            if *marked {
                self.cells[index].collected = true;
            }
        }
        Ok(())
    }

    /// Number of cells not yet collected
    pub fn remaining(&self) -> usize {
        self.cells.iter().filter(|c| !c.collected).count()
    }
}
