//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the selection-and-scoring engine of Mandarin 10: a 10x10
//! grid of digits, a drag rectangle, the sum-to-ten rule, and the 90 second round.
//! It has **zero dependencies** on terminals, storage or networking, which makes it:
//!
//! - **Deterministic**: the same seed produces the same grids
//! - **Testable**: every rule runs headless
//! - **Portable**: terminal front end, async service, or anything else can drive it
//!
//! # Module Structure
//!
//! - [`grid`]: the cell array, tile geometry, hit-testing and collection
//! - [`selection`]: drag state machine producing normalized rectangles
//! - [`rules`]: the sum-to-ten match rule and score delta
//! - [`round`]: phases, countdown, score and best score bookkeeping
//! - [`timer`]: single-handle periodic countdown timer
//! - [`store`]: best-score persistence port
//! - [`rng`]: seedable digit generator
//! - [`snapshot`]: read-only view for renderers
//!
//! # Game Rules
//!
//! - Every cell holds a digit 1-9, drawn independently; a grid may have no solution
//! - Releasing a drag evaluates every uncollected cell whose tile centre is inside
//!   the rectangle
//! - If those digits sum to exactly 10 the cells are cleared, one point each
//! - A round lasts 90 seconds; the best score survives across rounds
//!
//! # Example
//!
//! ```
//! use mandarin_core::{Grid, MemoryStore, RoundController};
//! use mandarin_types::{Phase, Point};
//!
//! let mut values = [[9u8; 10]; 10];
//! values[0][0] = 4;
//! values[0][1] = 6;
//! let grid = Grid::from_values(100.0, 100.0, &values).unwrap();
//!
//! let mut round = RoundController::new(MemoryStore::new(), 100.0, 100.0, 12345);
//! round.restart_with(grid);
//!
//! // Drag across the centres of (0,0) and (0,1).
//! round.pointer_down(Point::new(5.0, 5.0));
//! round.pointer_move(Point::new(15.0, 5.0));
//! let result = round.pointer_up().unwrap();
//!
//! assert!(result.is_match());
//! assert_eq!(round.score(), 2);
//! assert_eq!(round.phase(), Phase::Running);
//! ```
//!
//! # Timing
//!
//! Call [`RoundController::advance`](round::RoundController::advance) every frame
//! with the elapsed milliseconds, or deliver ticks from an external timer through
//! [`RoundController::tick_from`](round::RoundController::tick_from).

pub mod error;
pub mod grid;
pub mod rng;
pub mod round;
pub mod rules;
pub mod selection;
pub mod snapshot;
pub mod store;
pub mod timer;

pub use mandarin_types as types;

// Re-export commonly used types for convenience
pub use error::{InvalidState, PersistenceError};
pub use grid::{Cell, CellSet, Grid};
pub use rng::SimpleRng;
pub use round::{RoundController, RoundEvent};
pub use rules::{evaluate, MatchResult, MatchedCells};
pub use selection::SelectionEngine;
pub use snapshot::RoundSnapshot;
pub use store::{BestScoreStore, MemoryStore};
pub use timer::{PeriodicTimer, TimerHandle};
