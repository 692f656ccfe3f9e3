//! JSON-lines file logger.
//!
//! Library crates log through the `log` facade. The binary installs this
//! logger only when a log path is configured; nothing may reach the terminal
//! while the alternate screen is active.
//!
//! Each record is one line:
//!
//! ```json
//! {"ts_ms":1700000000000,"level":"INFO","target":"mandarin_core::round","msg":"round 1 started"}
//! ```

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};
use serde::Serialize;

use crate::config::AppConfig;

#[derive(Serialize)]
struct LogLine<'a> {
    ts_ms: u64,
    level: &'a str,
    target: &'a str,
    msg: String,
}

/// `log::Log` implementation writing one JSON object per record.
pub struct JsonLinesLogger<W: Write + Send> {
    level: LevelFilter,
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesLogger<W> {
    pub fn new(out: W, level: LevelFilter) -> Self {
        Self {
            level,
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn write_line(&self, record: &Record) -> io::Result<()> {
        let line = LogLine {
            ts_ms: now_ms(),
            level: record.level().as_str(),
            target: record.target(),
            msg: record.args().to_string(),
        };
        let Ok(mut out) = self.out.lock() else {
            return Ok(());
        };
        serde_json::to_writer(&mut *out, &line)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

impl<W: Write + Send> Log for JsonLinesLogger<W> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // A broken log file must never take the game down.
            let _ = self.write_line(record);
        }
    }

    fn flush(&self) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.flush();
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Install the file logger if `config.log_path` is set.
///
/// Returns whether a logger was installed.
pub fn init(config: &AppConfig) -> Result<bool> {
    let Some(path) = config.log_path.as_ref() else {
        return Ok(false);
    };
    if config.log_level == LevelFilter::Off {
        return Ok(false);
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let logger = JsonLinesLogger::new(file, config.log_level);
    log::set_boxed_logger(Box::new(logger)).context("install logger")?;
    log::set_max_level(config.log_level);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_record_is_one_json_line() {
        let logger = JsonLinesLogger::new(Vec::new(), LevelFilter::Info);
        logger.log(
            &Record::builder()
                .args(format_args!("round {} started", 3))
                .level(Level::Info)
                .target("mandarin_core::round")
                .build(),
        );

        let out = String::from_utf8(logger.into_inner()).unwrap();
        assert!(out.ends_with('\n'));
        assert_eq!(out.lines().count(), 1);

        let v: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(v["level"], "INFO");
        assert_eq!(v["target"], "mandarin_core::round");
        assert_eq!(v["msg"], "round 3 started");
        assert!(v["ts_ms"].as_u64().unwrap() > 0);
    }

    #[test]
    fn test_records_below_level_are_skipped() {
        let logger = JsonLinesLogger::new(Vec::new(), LevelFilter::Warn);
        logger.log(
            &Record::builder()
                .args(format_args!("cleared 2 cells"))
                .level(Level::Debug)
                .target("mandarin_core::round")
                .build(),
        );
        assert!(logger.into_inner().is_empty());
    }

    #[test]
    fn test_init_without_path_is_a_no_op() {
        assert!(!init(&AppConfig::default()).unwrap());
    }
}
