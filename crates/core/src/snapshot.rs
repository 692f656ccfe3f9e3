//! Read-only round snapshot for renderers.
//!
//! The fingerprint lets the front end skip frames whose content did not change.

use std::hash::{Hash, Hasher};

use crate::grid::Grid;
use crate::types::{Phase, Rect};

/// Read-only view of a round, as consumed by renderers and UI glue
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    pub grid: Grid,
    /// Live drag rectangle, None when no drag is in progress
    pub selection: Option<Rect>,
    pub phase: Phase,
    pub score: u32,
    pub best_score: u32,
    pub time_remaining: u32,
    pub round_id: u32,
    pub persistence_degraded: bool,
}

impl RoundSnapshot {
    /// Whether numbers should be visible and input accepted
    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Stable 64-bit digest of everything a frame depends on.
    ///
    /// Two snapshots that render identically have the same fingerprint.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1aHasher::new();
        self.phase.hash(&mut h);
        self.score.hash(&mut h);
        self.best_score.hash(&mut h);
        self.time_remaining.hash(&mut h);
        self.round_id.hash(&mut h);
        self.persistence_degraded.hash(&mut h);
        for cell in self.grid.cells() {
            cell.value.hash(&mut h);
            cell.collected.hash(&mut h);
        }
        match self.selection {
            Some(r) => {
                1u8.hash(&mut h);
                for v in [r.left, r.right, r.top, r.bottom] {
                    v.to_bits().hash(&mut h);
                }
            }
            None => 0u8.hash(&mut h),
        }
        h.finish()
    }
}

/// FNV-1a; `DefaultHasher` output is not guaranteed stable across releases.
#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}
