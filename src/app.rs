//! UI collaborator: glues input, the round controller, toasts and sharing.
//!
//! `App` is synchronous and owns the controller directly; the terminal
//! binary drives it from a single-threaded poll loop.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::config::AppConfig;
use crate::core::{BestScoreStore, MemoryStore, RoundController, RoundEvent, RoundSnapshot};
use crate::input::{handle_key_event, should_quit, PointerEvent, PointerKind};
use crate::share::{ShareOutcome, ShareSummary, ShareTarget};
use crate::store::JsonFileStore;
use crate::term::{FrameBuffer, GameView, HudView, Viewport};
use crate::types::{GameAction, Phase, MATCH_TOAST_MS, SUMMARY_TOAST_MS};

/// Short-lived message under the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub remaining_ms: u32,
    pub highlight: bool,
}

pub type BoxedStore = Box<dyn BestScoreStore>;

pub struct App {
    round: RoundController<BoxedStore>,
    view: GameView,
    share: ShareTarget,
    toast: Option<Toast>,
    last_share: Option<ShareOutcome>,
    snap: RoundSnapshot,
    events: Vec<RoundEvent>,
    /// Set when something outside the snapshot (the toast) changed.
    dirty: bool,
}

impl App {
    /// Build from configuration: file-backed best score unless persistence
    /// is off or no location is known.
    pub fn new(config: &AppConfig, seed: u32) -> Self {
        let store: BoxedStore = match config.resolved_best_score_path() {
            Some(path) => {
                log::info!("best score file: {}", path.display());
                Box::new(JsonFileStore::new(path))
            }
            None => {
                log::info!("best score kept in memory only");
                Box::new(MemoryStore::new())
            }
        };
        Self::with_parts(
            store,
            GameView::default(),
            ShareTarget::new(config.share_path.clone()),
            seed,
        )
    }

    pub fn with_parts(store: BoxedStore, view: GameView, share: ShareTarget, seed: u32) -> Self {
        let (w, h) = view.layout_size();
        let round = RoundController::new(store, w, h, seed);
        let snap = round.snapshot();
        let mut app = Self {
            round,
            view,
            share,
            toast: None,
            last_share: None,
            snap,
            events: Vec::new(),
            dirty: true,
        };
        app.pump_events();
        app
    }

    pub fn round(&self) -> &RoundController<BoxedStore> {
        &self.round
    }

    pub fn round_mut(&mut self) -> &mut RoundController<BoxedStore> {
        &mut self.round
    }

    pub fn view(&self) -> &GameView {
        &self.view
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn last_share(&self) -> Option<&ShareOutcome> {
        self.last_share.as_ref()
    }

    /// Returns and clears the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Returns false when the key asks to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return true;
        }
        if should_quit(key) {
            return false;
        }
        if let Some(action) = handle_key_event(key) {
            self.handle_action(action);
        }
        true
    }

    pub fn handle_action(&mut self, action: GameAction) {
        log::debug!(
            "action {} in phase {}",
            action.as_str(),
            self.round.phase().as_str()
        );
        match action {
            GameAction::Start => {
                // The start key doubles as restart mid-round.
                if self.round.phase() == Phase::Running {
                    self.round.restart();
                } else {
                    self.round.start();
                }
            }
            GameAction::Restart => self.round.restart(),
            GameAction::Share => self.share_last_round(),
        }
        self.pump_events();
    }

    fn share_last_round(&mut self) {
        if self.round.phase() != Phase::Ended {
            return;
        }
        let Some(summary) = self.round.last_summary() else {
            return;
        };
        let outcome = self.share.export(ShareSummary::from(summary));
        self.show_toast(outcome.toast_text(), SUMMARY_TOAST_MS, true);
        self.last_share = Some(outcome);
    }

    pub fn handle_pointer(&mut self, viewport: Viewport, event: PointerEvent) {
        match event.kind {
            PointerKind::Down => {
                if let Some(p) = self.view.hit_board(viewport, event.column, event.row) {
                    self.round.pointer_down(p);
                }
            }
            PointerKind::Drag => {
                let p = self.view.to_layout_point(viewport, event.column, event.row);
                self.round.pointer_move(p);
            }
            PointerKind::Up => {
                let p = self.view.to_layout_point(viewport, event.column, event.row);
                self.round.pointer_move(p);
                self.round.pointer_up();
            }
        }
        self.pump_events();
    }

    /// Feed wall-clock time to the round and the toast.
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.round.advance(elapsed_ms);
        if let Some(toast) = self.toast.as_mut() {
            toast.remaining_ms = toast.remaining_ms.saturating_sub(elapsed_ms);
            if toast.remaining_ms == 0 {
                self.toast = None;
                self.dirty = true;
            }
        }
        self.pump_events();
    }

    fn pump_events(&mut self) {
        let mut events = std::mem::take(&mut self.events);
        events.extend(self.round.drain_events());
        for event in events.drain(..) {
            self.on_event(event);
        }
        self.events = events;
    }

    fn on_event(&mut self, event: RoundEvent) {
        match event {
            RoundEvent::Started { .. } => {
                if self.toast.take().is_some() {
                    self.dirty = true;
                }
            }
            RoundEvent::Matched { score_delta, .. } => {
                self.show_toast(format!("+{}", score_delta), MATCH_TOAST_MS, false);
            }
            RoundEvent::NewBest { .. } => {
                if let Some(toast) = self.toast.as_mut() {
                    toast.text.push_str(" new best!");
                    toast.highlight = true;
                }
            }
            RoundEvent::Ended(summary) => {
                self.show_toast(
                    format!("final score {}", summary.score),
                    SUMMARY_TOAST_MS,
                    true,
                );
            }
            RoundEvent::PersistenceDegraded => {
                if self.toast.is_none() {
                    self.show_toast("best score not saved".to_string(), MATCH_TOAST_MS, false);
                }
            }
            RoundEvent::Ticked { .. } => {}
        }
    }

    fn show_toast(&mut self, text: String, duration_ms: u32, highlight: bool) {
        self.toast = Some(Toast {
            text,
            remaining_ms: duration_ms,
            highlight,
        });
        self.dirty = true;
    }

    /// Refresh and return the render snapshot.
    pub fn snapshot(&mut self) -> &RoundSnapshot {
        self.round.snapshot_into(&mut self.snap);
        &self.snap
    }

    pub fn render_into(&mut self, viewport: Viewport, fb: &mut FrameBuffer) {
        self.round.snapshot_into(&mut self.snap);
        let hud = self.toast.as_ref().map(|t| HudView {
            toast: Some(t.text.as_str()),
            highlight: t.highlight,
        });
        self.view.render_into(&self.snap, hud.as_ref(), viewport, fb);
    }
}
