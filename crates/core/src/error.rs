//! Error types for the round engine.
//!
//! `InvalidState` marks a sequencing bug in the caller and is never shown to the
//! player. `PersistenceError` is the only failure the outside world can cause; the
//! round controller degrades to an in-memory best score when it happens.

use thiserror::Error;

use crate::types::CellPos;

/// An operation was invoked in a state that forbids it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidState {
    #[error("cell {0} is already collected")]
    AlreadyCollected(CellPos),

    #[error("cell {0} is outside the grid")]
    OutOfGrid(CellPos),

    #[error("cell {0} listed more than once")]
    DuplicateCell(CellPos),

    #[error("value {value} at {pos} is outside 1..=9")]
    ValueOutOfRange { pos: CellPos, value: u8 },
}

/// The best-score store could not be read or written
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("best-score store unavailable: {0}")]
    Unavailable(String),

    #[error("best-score store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
