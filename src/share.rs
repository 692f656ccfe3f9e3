//! Sharing a finished round.
//!
//! A terminal has no share sheet or clipboard we can rely on, so the summary
//! is written to a configured file. Without a file, or when writing fails,
//! the text itself is returned for the UI to show.

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::RoundSummary;

/// Scores worth sharing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareSummary {
    pub score: u32,
    pub best_score: u32,
}

impl From<RoundSummary> for ShareSummary {
    fn from(summary: RoundSummary) -> Self {
        Self {
            score: summary.score,
            best_score: summary.best_score,
        }
    }
}

impl ShareSummary {
    pub fn text(&self) -> String {
        format!(
            "I scored {} points in Mandarin 10! My best is {} points.\n\n\
             Drag a box around mandarins that add up to 10. Can you beat me?\n",
            self.score, self.best_score
        )
    }

    /// One line, short enough for the toast row.
    pub fn short_text(&self) -> String {
        format!("Mandarin 10: {} pts, best {}", self.score, self.best_score)
    }
}

/// Result of an export attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Written(PathBuf),
    /// Nothing was exported; show this text instead.
    TextOnly(String),
}

/// Where share text goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareTarget {
    path: Option<PathBuf>,
}

impl ShareTarget {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn export(&self, summary: ShareSummary) -> ShareOutcome {
        let Some(path) = self.path.as_ref() else {
            return ShareOutcome::TextOnly(summary.short_text());
        };

        match fs::write(path, summary.text()) {
            Ok(()) => {
                log::info!("share text written to {}", path.display());
                ShareOutcome::Written(path.clone())
            }
            Err(e) => {
                log::warn!("could not write share text to {}: {}", path.display(), e);
                ShareOutcome::TextOnly(summary.short_text())
            }
        }
    }
}

impl ShareOutcome {
    pub fn toast_text(&self) -> String {
        match self {
            ShareOutcome::Written(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                format!("shared to {}", name)
            }
            ShareOutcome::TextOnly(text) => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> ShareSummary {
        ShareSummary {
            score: 12,
            best_score: 30,
        }
    }

    #[test]
    fn test_text_mentions_score_and_best() {
        let text = summary().text();
        assert!(text.contains("12 points"));
        assert!(text.contains("best is 30"));
        assert_eq!(summary().short_text(), "Mandarin 10: 12 pts, best 30");
    }

    #[test]
    fn test_no_path_is_text_only() {
        let outcome = ShareTarget::default().export(summary());
        assert_eq!(
            outcome,
            ShareOutcome::TextOnly("Mandarin 10: 12 pts, best 30".to_string())
        );
    }

    #[test]
    fn test_write_to_file() {
        let path = std::env::temp_dir().join(format!(
            "mandarin-share-test-{}.txt",
            std::process::id()
        ));
        let outcome = ShareTarget::new(Some(path.clone())).export(summary());
        assert_eq!(outcome, ShareOutcome::Written(path.clone()));
        assert!(outcome.toast_text().starts_with("shared to mandarin-share-test-"));
        assert_eq!(fs::read_to_string(&path).unwrap(), summary().text());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unwritable_path_falls_back_to_text() {
        let path = std::env::temp_dir()
            .join("mandarin-share-missing-dir")
            .join("nested")
            .join("share.txt");
        let outcome = ShareTarget::new(Some(path)).export(summary());
        assert!(matches!(outcome, ShareOutcome::TextOnly(_)));
    }
}
