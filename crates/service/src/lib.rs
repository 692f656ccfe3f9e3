//! Async round service.
//!
//! Bridges a `RoundController` into a tokio runtime for hosts where input,
//! rendering and timing live on different tasks or threads.
//!
//! # Module Structure
//!
//! One owning task holds the controller; nothing else can touch it. Callers
//! talk to it through a cloneable [`RoundHandle`]:
//!
//! - commands go over a bounded `mpsc` channel, and requests that need an
//!   answer carry a `oneshot` sender
//! - the latest [`RoundStatus`] is published on a `watch` channel
//! - every [`RoundEvent`] is fanned out on a `broadcast` channel
//!
//! While a round is running a ticker task sends one tick per second into the
//! same command channel. Each tick carries the `TimerHandle` it was spawned
//! for, and the ticker is aborted whenever the controller re-arms or cancels
//! its timer, so a restart never inherits the old countdown.
//!
//! # Example
//!
//! ```no_run
//! use mandarin_core::{MemoryStore, RoundController};
//! use mandarin_service::RoundService;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let controller = RoundController::new(MemoryStore::new(), 30.0, 10.0, 7);
//! let (handle, task) = RoundService::spawn(controller);
//! handle.start().await?;
//! let status = handle.status();
//! assert_eq!(status.time_remaining, 90);
//! handle.shutdown().await?;
//! let _controller = task.await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use mandarin_core::{
    BestScoreStore, MatchResult, RoundController, RoundEvent, RoundSnapshot, TimerHandle,
};
use mandarin_types::{Phase, Point, ROUND_TICK_MS};

pub use mandarin_core as core;
pub use mandarin_types as types;

/// Pending commands before senders start waiting.
const COMMAND_CAPACITY: usize = 64;

/// Buffered events per subscriber; slow subscribers see `Lagged`.
const EVENT_CAPACITY: usize = 256;

/// Command payload.
#[derive(Debug)]
pub enum RoundCommand {
    Start,
    Restart,
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(oneshot::Sender<Option<MatchResult>>),
    Snapshot(oneshot::Sender<RoundSnapshot>),
    Shutdown,
}

#[derive(Debug)]
enum Envelope {
    Command(RoundCommand),
    Tick(TimerHandle),
}

/// Compact state published after every processed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundStatus {
    pub phase: Phase,
    pub score: u32,
    pub best_score: u32,
    pub time_remaining: u32,
    pub round_id: u32,
    pub persistence_degraded: bool,
}

impl RoundStatus {
    fn of<S: BestScoreStore>(controller: &RoundController<S>) -> Self {
        Self {
            phase: controller.phase(),
            score: controller.score(),
            best_score: controller.best_score(),
            time_remaining: controller.time_remaining(),
            round_id: controller.round_id(),
            persistence_degraded: controller.persistence_degraded(),
        }
    }
}

/// Client side of a running service.
#[derive(Debug, Clone)]
pub struct RoundHandle {
    tx: mpsc::Sender<Envelope>,
    status: watch::Receiver<RoundStatus>,
    events: broadcast::Sender<RoundEvent>,
}

impl RoundHandle {
    async fn send(&self, cmd: RoundCommand) -> Result<()> {
        self.tx
            .send(Envelope::Command(cmd))
            .await
            .map_err(|_| anyhow!("round service stopped"))
    }

    pub async fn start(&self) -> Result<()> {
        self.send(RoundCommand::Start).await
    }

    pub async fn restart(&self) -> Result<()> {
        self.send(RoundCommand::Restart).await
    }

    pub async fn pointer_down(&self, point: Point) -> Result<()> {
        self.send(RoundCommand::PointerDown(point)).await
    }

    pub async fn pointer_move(&self, point: Point) -> Result<()> {
        self.send(RoundCommand::PointerMove(point)).await
    }

    /// Release the pointer and wait for the evaluated drag (None if ignored).
    pub async fn pointer_up(&self) -> Result<Option<MatchResult>> {
        let (reply, rx) = oneshot::channel();
        self.send(RoundCommand::PointerUp(reply)).await?;
        rx.await.map_err(|_| anyhow!("round service dropped the reply"))
    }

    pub async fn snapshot(&self) -> Result<RoundSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(RoundCommand::Snapshot(reply)).await?;
        rx.await.map_err(|_| anyhow!("round service dropped the reply"))
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.send(RoundCommand::Shutdown).await
    }

    /// Latest published status.
    pub fn status(&self) -> RoundStatus {
        *self.status.borrow()
    }

    pub fn watch_status(&self) -> watch::Receiver<RoundStatus> {
        self.status.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RoundEvent> {
        self.events.subscribe()
    }
}

pub struct RoundService;

impl RoundService {
    /// Move `controller` into a new owning task.
    ///
    /// Must be called from inside a tokio runtime. The task ends on
    /// `Shutdown` or when every handle is dropped, and yields the controller
    /// back.
    pub fn spawn<S>(controller: RoundController<S>) -> (RoundHandle, JoinHandle<RoundController<S>>)
    where
        S: BestScoreStore + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(COMMAND_CAPACITY);
        let (status_tx, status_rx) = watch::channel(RoundStatus::of(&controller));
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);

        let owner = Owner {
            controller,
            tick_tx: tx.downgrade(),
            ticker: None,
            status_tx,
            events_tx: events_tx.clone(),
        };
        let task = tokio::spawn(owner.run(rx));

        let handle = RoundHandle {
            tx,
            status: status_rx,
            events: events_tx,
        };
        (handle, task)
    }
}

struct Ticker {
    handle: TimerHandle,
    task: JoinHandle<()>,
}

struct Owner<S: BestScoreStore> {
    controller: RoundController<S>,
    tick_tx: mpsc::WeakSender<Envelope>,
    ticker: Option<Ticker>,
    status_tx: watch::Sender<RoundStatus>,
    events_tx: broadcast::Sender<RoundEvent>,
}

impl<S: BestScoreStore + Send + 'static> Owner<S> {
    async fn run(mut self, mut rx: mpsc::Receiver<Envelope>) -> RoundController<S> {
        self.sync_ticker();
        self.publish();

        while let Some(msg) = rx.recv().await {
            match msg {
                Envelope::Command(RoundCommand::Shutdown) => break,
                Envelope::Command(cmd) => self.apply(cmd),
                Envelope::Tick(handle) => {
                    if !self.controller.tick_from(handle) {
                        log::trace!("dropped stale tick for timer {}", handle.generation());
                    }
                }
            }
            self.sync_ticker();
            self.publish();
        }

        if let Some(ticker) = self.ticker.take() {
            ticker.task.abort();
        }
        log::debug!("round service stopped");
        self.controller
    }

    fn apply(&mut self, cmd: RoundCommand) {
        match cmd {
            RoundCommand::Start => {
                self.controller.start();
            }
            RoundCommand::Restart => self.controller.restart(),
            RoundCommand::PointerDown(p) => {
                self.controller.pointer_down(p);
            }
            RoundCommand::PointerMove(p) => {
                self.controller.pointer_move(p);
            }
            RoundCommand::PointerUp(reply) => {
                let _ = reply.send(self.controller.pointer_up());
            }
            RoundCommand::Snapshot(reply) => {
                let _ = reply.send(self.controller.snapshot());
            }
            RoundCommand::Shutdown => {}
        }
    }

    /// Keep exactly one ticker, matching the controller's armed timer.
    fn sync_ticker(&mut self) {
        let wanted = self.controller.timer_handle();
        if self.ticker.as_ref().map(|t| t.handle) == wanted {
            return;
        }
        if let Some(old) = self.ticker.take() {
            old.task.abort();
        }
        if let Some(handle) = wanted {
            let task = tokio::spawn(run_ticker(self.tick_tx.clone(), handle));
            self.ticker = Some(Ticker { handle, task });
        }
    }

    fn publish(&mut self) {
        for event in self.controller.drain_events() {
            // No subscribers is fine.
            let _ = self.events_tx.send(event);
        }
        let status = RoundStatus::of(&self.controller);
        self.status_tx.send_if_modified(|current| {
            if *current == status {
                return false;
            }
            *current = status;
            true
        });
    }
}

async fn run_ticker(tx: mpsc::WeakSender<Envelope>, handle: TimerHandle) {
    let period = Duration::from_millis(ROUND_TICK_MS as u64);
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
    loop {
        interval.tick().await;
        let Some(tx) = tx.upgrade() else {
            break;
        };
        if tx.send(Envelope::Tick(handle)).await.is_err() {
            break;
        }
    }
}
