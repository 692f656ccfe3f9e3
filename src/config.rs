//! Runtime configuration.
//!
//! Environment variables are read first (`AppConfig::from_env`), then command
//! line flags override them (`parse_args`).

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use log::LevelFilter;

use crate::types::FRAME_MS;

pub const USAGE: &str = "\
usage: mandarin-ten [options]

options:
  --seed N                 RNG seed for grid values (MANDARIN_SEED)
  --best-score-path PATH   best score file (MANDARIN_BEST_SCORE_PATH)
  --no-persist             keep the best score in memory only
  --share-path PATH        write share text to PATH (MANDARIN_SHARE_PATH)
  --log-path PATH          JSON-lines log file (MANDARIN_LOG_PATH)
  --help                   print this message

environment:
  MANDARIN_LOG             off|error|warn|info|debug|trace (default info)
  MANDARIN_FRAME_MS        frame interval in ms (default 16)
";

/// Resolved settings for one run of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Grid seed; None derives one from the clock.
    pub seed: Option<u32>,
    /// Explicit best score file.
    pub best_score_path: Option<PathBuf>,
    /// `$HOME`, used for the default best score location.
    pub home: Option<PathBuf>,
    pub persist: bool,
    pub share_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub frame_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            best_score_path: None,
            home: None,
            persist: true,
            share_path: None,
            log_path: None,
            log_level: LevelFilter::Info,
            frame_ms: FRAME_MS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unparseable values fall back
    /// to their defaults.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            get(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let defaults = Self::default();
        Self {
            seed: non_empty("MANDARIN_SEED").and_then(|s| s.parse().ok()),
            best_score_path: non_empty("MANDARIN_BEST_SCORE_PATH").map(PathBuf::from),
            home: non_empty("HOME").map(PathBuf::from),
            persist: true,
            share_path: non_empty("MANDARIN_SHARE_PATH").map(PathBuf::from),
            log_path: non_empty("MANDARIN_LOG_PATH").map(PathBuf::from),
            log_level: non_empty("MANDARIN_LOG")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.log_level),
            frame_ms: non_empty("MANDARIN_FRAME_MS")
                .and_then(|s| s.parse::<u32>().ok())
                .filter(|&ms| ms > 0)
                .unwrap_or(defaults.frame_ms),
        }
    }

    /// Where the best score lives, or None for an in-memory store.
    pub fn resolved_best_score_path(&self) -> Option<PathBuf> {
        if !self.persist {
            return None;
        }
        self.best_score_path.clone().or_else(|| {
            self.home.as_ref().map(|home| {
                home.join(".local")
                    .join("share")
                    .join("mandarin-ten")
                    .join("best_score.json")
            })
        })
    }
}

/// Apply command line flags on top of `base`.
///
/// Returns `Ok(None)` when `--help` was requested. `args` excludes the
/// program name.
pub fn parse_args(mut base: AppConfig, args: &[String]) -> Result<Option<AppConfig>> {
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(None),
            "--seed" => {
                let v = value_of(args, &mut i)?;
                base.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--best-score-path" => {
                base.best_score_path = Some(PathBuf::from(value_of(args, &mut i)?));
            }
            "--no-persist" => base.persist = false,
            "--share-path" => {
                base.share_path = Some(PathBuf::from(value_of(args, &mut i)?));
            }
            "--log-path" => {
                base.log_path = Some(PathBuf::from(value_of(args, &mut i)?));
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Some(base))
}

fn value_of<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}
