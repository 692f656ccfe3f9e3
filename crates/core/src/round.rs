//! Round controller - owns the whole game state for one session
//!
//! This module ties together the grid, the selection engine, the match rule, the
//! countdown timer and the best-score store. It is the only thing that mutates
//! any of them, which keeps "no double collection" and "best score never drops"
//! true without locking.
//!
//! Phases:
//!
//! ```text
//! Idle --start--> Running --tick to 0--> Ended --start/restart--> Running
//!                    ^                                               |
//!                    +------------------- restart -------------------+
//! ```

use std::collections::VecDeque;

use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::rules::{self, MatchResult};
use crate::selection::SelectionEngine;
use crate::snapshot::RoundSnapshot;
use crate::store::{BestScoreStore, MemoryStore};
use crate::timer::{PeriodicTimer, TimerHandle};
use crate::types::{Phase, Point, Rect, RoundSummary, ROUND_SECONDS, ROUND_TICK_MS};

/// Oldest events are dropped once this many are waiting to be drained
const EVENT_CAPACITY: usize = 256;

/// Notifications for UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    Started { round_id: u32 },
    Ticked { time_remaining: u32 },
    Matched {
        cells: usize,
        score_delta: u32,
        score: u32,
    },
    NewBest { best_score: u32 },
    Ended(RoundSummary),
    /// The best score could not be loaded or saved; it now lives in memory only
    PersistenceDegraded,
}

/// Complete round state
#[derive(Debug)]
pub struct RoundController<S: BestScoreStore = MemoryStore> {
    grid: Grid,
    selection: SelectionEngine,
    timer: PeriodicTimer,
    rng: SimpleRng,
    store: S,
    layout_w: f32,
    layout_h: f32,
    phase: Phase,
    score: u32,
    best_score: u32,
    time_remaining: u32,
    /// Monotonic round id (0 is the preview grid shown before the first start)
    round_id: u32,
    persistence_degraded: bool,
    /// The stored best was never read; saving could overwrite a higher value
    load_failed: bool,
    last_summary: Option<RoundSummary>,
    events: VecDeque<RoundEvent>,
}

impl<S: BestScoreStore> RoundController<S> {
    /// Create an idle controller over a `width x height` layout.
    ///
    /// Loads the best score from `store`; a failing store starts at 0 and marks
    /// persistence as degraded. After a failed load nothing is saved for the
    /// lifetime of the controller.
    pub fn new(mut store: S, width: f32, height: f32, seed: u32) -> Self {
        let mut events = VecDeque::new();
        let (best_score, persistence_degraded) = match store.load_best_score() {
            Ok(best) => (best, false),
            Err(e) => {
                log::warn!("best score unavailable, keeping it in memory only: {}", e);
                events.push_back(RoundEvent::PersistenceDegraded);
                (0, true)
            }
        };

        let mut rng = SimpleRng::new(seed);
        let grid = Grid::generate(width, height, &mut rng);

        Self {
            grid,
            selection: SelectionEngine::new(),
            timer: PeriodicTimer::new(ROUND_TICK_MS),
            rng,
            store,
            layout_w: width,
            layout_h: height,
            phase: Phase::Idle,
            score: 0,
            best_score,
            time_remaining: ROUND_SECONDS,
            round_id: 0,
            persistence_degraded,
            load_failed: persistence_degraded,
            last_summary: None,
            events,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn persistence_degraded(&self) -> bool {
        self.persistence_degraded
    }

    /// Summary of the most recently ended round (cleared when a new one starts)
    pub fn last_summary(&self) -> Option<RoundSummary> {
        self.last_summary
    }

    /// Handle of the armed countdown, None unless Running
    pub fn timer_handle(&self) -> Option<TimerHandle> {
        self.timer.active()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start a round from Idle or Ended. No-op while Running.
    pub fn start(&mut self) -> bool {
        if self.phase == Phase::Running {
            return false;
        }
        let grid = Grid::generate(self.layout_w, self.layout_h, &mut self.rng);
        self.begin_round(grid);
        true
    }

    /// Start a fresh round from any phase, discarding the current one
    pub fn restart(&mut self) {
        let grid = Grid::generate(self.layout_w, self.layout_h, &mut self.rng);
        self.begin_round(grid);
    }

    /// Start a fresh round on a prepared grid (replays, fixed puzzles).
    ///
    /// Collected flags on `grid` are kept as given.
    pub fn restart_with(&mut self, grid: Grid) {
        self.begin_round(grid);
    }

    fn begin_round(&mut self, grid: Grid) {
        // Replacing the handle cancels the previous round's countdown.
        self.timer.arm();
        self.round_id = self.round_id.wrapping_add(1);
        self.grid = grid;
        self.selection.reset();
        self.score = 0;
        self.time_remaining = ROUND_SECONDS;
        self.phase = Phase::Running;
        self.last_summary = None;

        log::info!(
            "round {} started ({} s, best {})",
            self.round_id,
            self.time_remaining,
            self.best_score
        );
        self.push_event(RoundEvent::Started {
            round_id: self.round_id,
        });
    }

    /// One countdown step. Running only; returns false when ignored.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        self.push_event(RoundEvent::Ticked {
            time_remaining: self.time_remaining,
        });

        if self.time_remaining == 0 {
            self.end_round();
        }
        true
    }

    /// Deliver a tick from an external timer.
    ///
    /// Ticks from a cancelled handle (an earlier round, or after the round
    /// ended) are dropped.
    pub fn tick_from(&mut self, handle: TimerHandle) -> bool {
        if !self.timer.is_current(handle) {
            return false;
        }
        self.tick()
    }

    /// Feed wall-clock time; runs every countdown tick that became due.
    ///
    /// Returns the number of ticks processed.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let due = self.timer.advance(elapsed_ms);
        let mut processed = 0;
        for _ in 0..due {
            if !self.tick() {
                break;
            }
            processed += 1;
        }
        processed
    }

    fn end_round(&mut self) {
        self.timer.cancel();
        self.selection.reset();
        self.phase = Phase::Ended;

        let summary = RoundSummary {
            round_id: self.round_id,
            score: self.score,
            best_score: self.best_score,
        };
        self.last_summary = Some(summary);

        log::info!(
            "round {} ended: score {}, best {}",
            summary.round_id,
            summary.score,
            summary.best_score
        );
        self.push_event(RoundEvent::Ended(summary));
    }

    /// Pointer pressed. Starts a drag only while Running.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        self.selection.begin(point, self.phase)
    }

    /// Pointer moved. Updates the drag if one is in progress.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        self.selection.update(point)
    }

    /// Pointer released. Evaluates the finished drag, if any.
    pub fn pointer_up(&mut self) -> Option<MatchResult> {
        let rect = self.selection.end()?;
        self.on_drag_released(rect)
    }

    /// Evaluate a finished selection rectangle.
    ///
    /// Running only; returns None when ignored. On a match the cells are
    /// collected, the score grows by one per cell and a new best is persisted.
    pub fn on_drag_released(&mut self, rect: Rect) -> Option<MatchResult> {
        if self.phase != Phase::Running {
            return None;
        }

        let result = rules::evaluate(self.grid.cells_within(rect));
        let MatchResult::Match { cells, score_delta } = &result else {
            return Some(result);
        };

        if let Err(e) = self.grid.mark_collected(cells) {
            // The rule filters collected cells, so this is a sequencing bug.
            log::error!("match rejected by grid: {}", e);
            return Some(MatchResult::NoMatch { total: 0 });
        }

        self.score = self.score.saturating_add(*score_delta);
        log::debug!(
            "round {}: cleared {} cells, score {}",
            self.round_id,
            cells.len(),
            self.score
        );
        self.push_event(RoundEvent::Matched {
            cells: cells.len(),
            score_delta: *score_delta,
            score: self.score,
        });
        self.record_best();

        Some(result)
    }

    fn record_best(&mut self) {
        if self.score <= self.best_score {
            return;
        }
        self.best_score = self.score;
        self.push_event(RoundEvent::NewBest {
            best_score: self.best_score,
        });

        if self.load_failed {
            return;
        }
        match self.store.save_best_score(self.best_score) {
            Ok(()) => self.persistence_degraded = false,
            Err(e) => {
                if !self.persistence_degraded {
                    log::warn!("could not save best score, keeping it in memory: {}", e);
                    self.push_event(RoundEvent::PersistenceDegraded);
                }
                self.persistence_degraded = true;
            }
        }
    }

    fn push_event(&mut self, event: RoundEvent) {
        if self.events.len() >= EVENT_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Take all pending events in order
    pub fn drain_events(&mut self) -> std::collections::vec_deque::Drain<'_, RoundEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        out.grid.clone_from(&self.grid);
        out.selection = self.selection.current_rect();
        out.phase = self.phase;
        out.score = self.score;
        out.best_score = self.best_score;
        out.time_remaining = self.time_remaining;
        out.round_id = self.round_id;
        out.persistence_degraded = self.persistence_degraded;
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            grid: self.grid.clone(),
            selection: self.selection.current_rect(),
            phase: self.phase,
            score: self.score,
            best_score: self.best_score,
            time_remaining: self.time_remaining,
            round_id: self.round_id,
            persistence_degraded: self.persistence_degraded,
        }
    }
}
