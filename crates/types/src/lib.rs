//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, async service).
//!
//! # Grid Dimensions
//!
//! - **Rows**: 10 (indexed 0-9, top to bottom)
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Values**: every cell holds a digit in `1..=9`
//!
//! # Round Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ROUND_SECONDS` | 90 | Countdown length of one round |
//! | `ROUND_TICK_MS` | 1000 | Period of the countdown tick |
//! | `FRAME_MS` | 16 | Fixed frame/poll interval (~60 FPS) |
//! | `MATCH_TOAST_MS` | 1200 | How long a `+N` message stays up |
//! | `SUMMARY_TOAST_MS` | 4000 | How long the final-score banner stays up |
//!
//! # Examples
//!
//! ```
//! use mandarin_types::{Point, Rect, Phase, GameAction, GRID_ROWS, GRID_COLS};
//!
//! // Rectangles are normalized regardless of drag direction
//! let a = Rect::from_corners(Point::new(8.0, 1.0), Point::new(2.0, 5.0));
//! let b = Rect::from_corners(Point::new(2.0, 5.0), Point::new(8.0, 1.0));
//! assert_eq!(a, b);
//! assert!(a.contains(Point::new(2.0, 1.0)));
//!
//! assert_eq!(GameAction::Restart.as_str(), "restart");
//!
//! assert_eq!(Phase::Idle.as_str(), "idle");
//! assert_eq!(GRID_ROWS * GRID_COLS, 100);
//! ```

/// Grid height in cells (10 rows)
pub const GRID_ROWS: u8 = 10;

/// Grid width in cells (10 columns)
pub const GRID_COLS: u8 = 10;

/// Total number of cells on the grid
pub const GRID_SIZE: usize = (GRID_ROWS as usize) * (GRID_COLS as usize);

/// Smallest digit a cell can hold
pub const MIN_CELL_VALUE: u8 = 1;

/// Largest digit a cell can hold
pub const MAX_CELL_VALUE: u8 = 9;

/// The sum a selection must hit exactly to clear its cells
pub const TARGET_SUM: u32 = 10;

/// Upper bound on the size of a matching selection.
///
/// Every value is at least `MIN_CELL_VALUE`, so no more than
/// `TARGET_SUM / MIN_CELL_VALUE` cells can sum to the target.
pub const MAX_MATCH_CELLS: usize = (TARGET_SUM as usize) / (MIN_CELL_VALUE as usize);

/// Countdown length of a round in seconds
pub const ROUND_SECONDS: u32 = 90;

/// Countdown tick period (1 second)
pub const ROUND_TICK_MS: u32 = 1000;

/// Fixed frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Lifetime of the `+N` message after a match
pub const MATCH_TOAST_MS: u32 = 1200;

/// Lifetime of the end-of-round banner
pub const SUMMARY_TOAST_MS: u32 = 4000;

/// Remaining seconds above which the time bar is in the "plenty" band
pub const TIME_PLENTY_ABOVE: u32 = 45;

/// Remaining seconds above which the time bar is in the "warning" band
pub const TIME_WARNING_ABOVE: u32 = 15;

/// A point in layout space (same units the grid was generated with)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with inclusive bounds.
///
/// Always normalized: `left <= right` and `top <= bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    /// Build a normalized rectangle from two opposite corners in any order
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            right: a.x.max(b.x),
            top: a.y.min(b.y),
            bottom: a.y.max(b.y),
        }
    }

    /// Inclusive containment test
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// True when the rectangle covers no area (a click without drag)
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }
}

/// Grid coordinate of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub row: u8,
    pub col: u8,
}

impl CellPos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major index into a `GRID_ROWS x GRID_COLS` array
    pub fn index(&self) -> Option<usize> {
        if self.row >= GRID_ROWS || self.col >= GRID_COLS {
            return None;
        }
        Some((self.row as usize) * (GRID_COLS as usize) + (self.col as usize))
    }

    /// Inverse of [`CellPos::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= GRID_SIZE {
            return None;
        }
        Some(Self {
            row: (index / GRID_COLS as usize) as u8,
            col: (index % GRID_COLS as usize) as u8,
        })
    }
}

impl std::fmt::Display for CellPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// In-progress drag.
///
/// The inert value is all zeros with `active = false`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Selection {
    pub start: Point,
    pub end: Point,
    pub active: bool,
}

impl Selection {
    /// Normalized rectangle of the drag, or None when inert
    pub fn rect(&self) -> Option<Rect> {
        if self.active {
            Some(Rect::from_corners(self.start, self.end))
        } else {
            None
        }
    }
}

/// Round lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Ended,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Ended => "ended",
        }
    }
}

/// Player actions that are not pointer input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Start,
    Restart,
    Share,
}

impl GameAction {
    /// Name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Start => "start",
            GameAction::Restart => "restart",
            GameAction::Share => "share",
        }
    }
}

/// Final numbers of a round, emitted when it ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoundSummary {
    pub round_id: u32,
    pub score: u32,
    pub best_score: u32,
}

/// Colour band of the time bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBand {
    Plenty,
    Warning,
    Critical,
}

impl TimeBand {
    pub fn from_remaining(seconds: u32) -> Self {
        if seconds > TIME_PLENTY_ABOVE {
            TimeBand::Plenty
        } else if seconds > TIME_WARNING_ABOVE {
            TimeBand::Warning
        } else {
            TimeBand::Critical
        }
    }
}
