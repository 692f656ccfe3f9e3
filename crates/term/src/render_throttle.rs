//! Frame pacing: skip redraws that would not change the screen.

/// Decides when the main loop should render a new frame.
///
/// A frame is drawn when the snapshot fingerprint changes, and otherwise at
/// most once per heartbeat interval so external terminal damage gets repaired.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    heartbeat_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(heartbeat_ms: u64) -> Self {
        Self {
            heartbeat_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Forget the last frame; the next call always renders (resize, toast change).
    pub fn invalidate(&mut self) {
        self.has_rendered = false;
    }

    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        if !self.has_rendered || fingerprint != self.last_fingerprint {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
            return true;
        }

        if now_ms.saturating_sub(self.last_render_ms) >= self.heartbeat_ms {
            self.last_render_ms = now_ms;
            return true;
        }

        false
    }
}
