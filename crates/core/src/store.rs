//! Best-score persistence port.
//!
//! The controller only ever stores one integer. Implementations report failures
//! as [`PersistenceError`]; the controller decides how to degrade.

use crate::error::PersistenceError;

/// Storage for the best score across sessions
pub trait BestScoreStore {
    /// Load the stored best score. Absent or unreadable data loads as 0.
    fn load_best_score(&mut self) -> Result<u32, PersistenceError>;

    /// Persist a new best score
    fn save_best_score(&mut self, best: u32) -> Result<(), PersistenceError>;
}

impl<S: BestScoreStore + ?Sized> BestScoreStore for Box<S> {
    fn load_best_score(&mut self) -> Result<u32, PersistenceError> {
        (**self).load_best_score()
    }

    fn save_best_score(&mut self, best: u32) -> Result<(), PersistenceError> {
        (**self).save_best_score(best)
    }
}

/// Session-only store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    best: u32,
    saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u32) -> Self {
        Self { best, saves: 0 }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Number of successful saves (lets callers check save frequency)
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl BestScoreStore for MemoryStore {
    fn load_best_score(&mut self) -> Result<u32, PersistenceError> {
        Ok(self.best)
    }

    fn save_best_score(&mut self, best: u32) -> Result<(), PersistenceError> {
        self.best = best;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_best_score().unwrap(), 0);
        store.save_best_score(12).unwrap();
        assert_eq!(store.load_best_score().unwrap(), 12);
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn BestScoreStore> = Box::new(MemoryStore::with_best(5));
        assert_eq!(store.load_best_score().unwrap(), 5);
        store.save_best_score(6).unwrap();
        assert_eq!(store.load_best_score().unwrap(), 6);
    }
}
