//! JSON file persistence for the best score.
//!
//! The record is a small versioned JSON object:
//!
//! ```json
//! {"version":1,"best_score":42}
//! ```
//!
//! A missing file loads as 0. A file that does not parse, or carries another
//! version, is logged and also loads as 0; the next new best overwrites it.
//! Other I/O failures are reported so the controller can degrade to a
//! session-only best score.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use mandarin_core::{BestScoreStore, PersistenceError};

/// Current on-disk record version.
pub const BEST_SCORE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScoreRecord {
    pub version: u32,
    pub best_score: u32,
}

/// Best-score store backed by one JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, raw: &str) -> u32 {
        match serde_json::from_str::<BestScoreRecord>(raw) {
            Ok(record) if record.version == BEST_SCORE_VERSION => record.best_score,
            Ok(record) => {
                log::warn!(
                    "best score file {} has version {}, expected {}; starting from 0",
                    self.path.display(),
                    record.version,
                    BEST_SCORE_VERSION
                );
                0
            }
            Err(e) => {
                log::warn!(
                    "best score file {} is unreadable ({e}); starting from 0",
                    self.path.display()
                );
                0
            }
        }
    }
}

impl BestScoreStore for JsonFileStore {
    fn load_best_score(&mut self) -> Result<u32, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let best = self.parse(&raw);
                log::debug!("loaded best score {best} from {}", self.path.display());
                Ok(best)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(PersistenceError::Io(e)),
        }
    }

    fn save_best_score(&mut self, best: u32) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let record = BestScoreRecord {
            version: BEST_SCORE_VERSION,
            best_score: best,
        };
        let json = serde_json::to_string(&record)
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;

        // Write then rename so a crash never leaves a half-written record.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("saved best score {best} to {}", self.path.display());
        Ok(())
    }
}
